//! Loyalty tier bands and points accrual.
//!
//! Tiers form an ordered ladder over total billing with fixed, half-open
//! monetary bands. A total sitting exactly on a boundary belongs to the
//! higher band. This module is the only place tier classification lives -
//! views must never compute their own.

use crate::core::billing::total_billing;
use crate::models::Customer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the silver band.
pub const SILVER_MINIMUM: f64 = 5_000.0;
/// Lower bound of the gold band.
pub const GOLD_MINIMUM: f64 = 20_000.0;
/// Lower bound of the platinum band.
pub const PLATINUM_MINIMUM: f64 = 50_000.0;
/// Points accrue at 15% of total billing, floored.
pub const POINTS_RATE: f64 = 0.15;

/// Loyalty tier, ordered bronze < silver < gold < platinum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    /// [0, 5000)
    Bronze,
    /// [5000, 20000)
    Silver,
    /// [20000, 50000)
    Gold,
    /// [50000, ∞) - terminal, no further tier.
    Platinum,
}

impl LoyaltyTier {
    /// Classifies a total billing amount into its tier. Boundaries are
    /// inclusive on the lower side: exactly 5000 is silver, exactly 50000
    /// is platinum.
    #[must_use]
    pub fn classify(total_billing: f64) -> Self {
        if total_billing >= PLATINUM_MINIMUM {
            Self::Platinum
        } else if total_billing >= GOLD_MINIMUM {
            Self::Gold
        } else if total_billing >= SILVER_MINIMUM {
            Self::Silver
        } else {
            Self::Bronze
        }
    }

    /// Lower bound of this tier's band.
    #[must_use]
    pub const fn minimum(self) -> f64 {
        match self {
            Self::Bronze => 0.0,
            Self::Silver => SILVER_MINIMUM,
            Self::Gold => GOLD_MINIMUM,
            Self::Platinum => PLATINUM_MINIMUM,
        }
    }

    /// The next tier up the ladder, or `None` at platinum.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => Some(Self::Platinum),
            Self::Platinum => None,
        }
    }

    /// The wire token for this tier, e.g. `bronze`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points accrued for a total billing amount: `floor(total * 0.15)`.
/// Negative inputs are clamped to zero before the rate is applied.
#[must_use]
pub fn accrued_points(total_billing: f64) -> i64 {
    // Cast safety: the floored product of a finite non-negative total and
    // 0.15 fits i64 for any realistic billing figure.
    #[allow(clippy::cast_possible_truncation)]
    let points = (total_billing.max(0.0) * POINTS_RATE).floor() as i64;
    points
}

/// Tier and points for a given total, bundled for loyalty program creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierAssessment {
    /// Tier the total falls into.
    pub tier: LoyaltyTier,
    /// Points accrued at the 15% rate.
    pub points: i64,
    /// The total the assessment was computed from.
    pub total_billing: f64,
}

/// Classifies a total billing amount and computes its points in one step.
#[must_use]
pub fn assess(total_billing: f64) -> TierAssessment {
    TierAssessment {
        tier: LoyaltyTier::classify(total_billing),
        points: accrued_points(total_billing),
        total_billing,
    }
}

/// Live tier assessment for a customer snapshot, transactions included.
#[must_use]
pub fn assess_customer(customer: &Customer) -> TierAssessment {
    assess(total_billing(customer))
}

/// How many of a company's customers sit in each tier, computed from
/// transaction-inclusive totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierDistribution {
    /// Customers in the bronze band.
    pub bronze: usize,
    /// Customers in the silver band.
    pub silver: usize,
    /// Customers in the gold band.
    pub gold: usize,
    /// Customers in the platinum band.
    pub platinum: usize,
}

impl TierDistribution {
    /// Count for one tier.
    #[must_use]
    pub const fn count(&self, tier: LoyaltyTier) -> usize {
        match tier {
            LoyaltyTier::Bronze => self.bronze,
            LoyaltyTier::Silver => self.silver,
            LoyaltyTier::Gold => self.gold,
            LoyaltyTier::Platinum => self.platinum,
        }
    }

    /// Total customers counted.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.bronze + self.silver + self.gold + self.platinum
    }
}

/// Tier distribution for the customers of a single company.
#[must_use]
pub fn tier_distribution(customers: &[Customer], company: &str) -> TierDistribution {
    let mut counts = TierDistribution::default();
    for customer in customers {
        if customer.company_name.as_deref() != Some(company) {
            continue;
        }
        match assess_customer(customer).tier {
            LoyaltyTier::Bronze => counts.bronze += 1,
            LoyaltyTier::Silver => counts.silver += 1,
            LoyaltyTier::Gold => counts.gold += 1,
            LoyaltyTier::Platinum => counts.platinum += 1,
        }
    }
    counts
}
