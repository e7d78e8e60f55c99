//! Tier progression - distance and percentage progress to the next band.

use crate::core::tier::LoyaltyTier;

/// Progress toward the next loyalty tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TierProgress {
    /// Already at platinum. Terminal, not an error.
    AtMaximum,
    /// Still climbing the ladder.
    Toward {
        /// The next tier up.
        next_tier: LoyaltyTier,
        /// Lower bound of the next tier's band.
        next_tier_minimum: f64,
        /// Amount still needed, floored at zero.
        amount_needed: f64,
        /// Progress percentage, capped at 100.
        percent: f64,
    },
}

/// Computes progression for a total billing amount.
///
/// Platinum is short-circuited before any arithmetic, so the percentage
/// division can never see a zero denominator (every non-terminal band has a
/// next minimum of at least [`crate::core::tier::SILVER_MINIMUM`]).
#[must_use]
pub fn progression(total_billing: f64) -> TierProgress {
    let tier = LoyaltyTier::classify(total_billing);
    let Some(next_tier) = tier.next() else {
        return TierProgress::AtMaximum;
    };

    let next_tier_minimum = next_tier.minimum();
    TierProgress::Toward {
        next_tier,
        next_tier_minimum,
        amount_needed: (next_tier_minimum - total_billing).max(0.0),
        percent: (total_billing / next_tier_minimum * 100.0).min(100.0),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn bronze_progresses_toward_silver() {
        let TierProgress::Toward {
            next_tier,
            next_tier_minimum,
            amount_needed,
            percent,
        } = progression(2_500.0)
        else {
            panic!("bronze must have a next tier");
        };
        assert_eq!(next_tier, LoyaltyTier::Silver);
        assert_eq!(next_tier_minimum, 5_000.0);
        assert_eq!(amount_needed, 2_500.0);
        assert_eq!(percent, 50.0);
    }

    #[test]
    fn gold_progresses_toward_platinum() {
        let TierProgress::Toward {
            next_tier,
            amount_needed,
            percent,
            ..
        } = progression(40_000.0)
        else {
            panic!("gold must have a next tier");
        };
        assert_eq!(next_tier, LoyaltyTier::Platinum);
        assert_eq!(amount_needed, 10_000.0);
        assert_eq!(percent, 80.0);
    }

    #[test]
    fn platinum_is_terminal_and_never_divides() {
        assert_eq!(progression(50_000.0), TierProgress::AtMaximum);
        assert_eq!(progression(2_000_000.0), TierProgress::AtMaximum);
    }

    #[test]
    fn amount_needed_floors_at_zero_and_percent_caps_at_100() {
        // A silver total that already exceeds the silver minimum still
        // reports sane numbers toward gold.
        let TierProgress::Toward {
            amount_needed,
            percent,
            ..
        } = progression(19_999.0)
        else {
            panic!("silver must have a next tier");
        };
        assert_eq!(amount_needed, 1.0);
        assert!(percent < 100.0);

        // Zero total: 0% of the way, full band needed.
        let TierProgress::Toward {
            amount_needed,
            percent,
            ..
        } = progression(0.0)
        else {
            panic!("zero total is bronze");
        };
        assert_eq!(amount_needed, 5_000.0);
        assert_eq!(percent, 0.0);
    }
}
