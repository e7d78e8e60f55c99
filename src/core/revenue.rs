//! Per-company revenue aggregation and campaign budget allocation.
//!
//! Revenue here deliberately sums each customer's base `billing_amount`
//! only. The loyalty and ticket views use the transaction-inclusive total,
//! but campaign budgets have always been based on locked-in base revenue;
//! the divergence is intentional and must not be silently unified.

use crate::models::Customer;
use std::cmp::Ordering;

/// Campaigns are budgeted at 8% of a company's aggregated revenue.
pub const BUDGET_RATE: f64 = 0.08;

/// Aggregated revenue and allocated budget for one company.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyRevenue {
    /// Company name from the configured roster.
    pub company: String,
    /// Sum of member customers' base billing amounts.
    pub revenue: f64,
    /// `floor(revenue * 0.08)`.
    pub budget: f64,
}

/// Revenue allocation across the whole company roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueAllocation {
    /// Companies sorted descending by revenue; ties keep roster order.
    pub companies: Vec<CompanyRevenue>,
    /// Revenue summed across the roster.
    pub total_revenue: f64,
    /// `total_revenue * 0.08`, unfloored (the per-company budgets are
    /// floored individually, so the two need not agree to the rupee).
    pub total_budget: f64,
}

/// Aggregates revenue per roster company and derives the 8% budget each.
///
/// Customers whose `company_name` is missing or outside the roster are
/// ignored. Companies with no customers appear with zero revenue.
#[must_use]
pub fn allocate_budgets(customers: &[Customer], roster: &[String]) -> RevenueAllocation {
    let mut companies: Vec<CompanyRevenue> = roster
        .iter()
        .map(|company| {
            let revenue: f64 = customers
                .iter()
                .filter(|c| c.company_name.as_deref() == Some(company.as_str()))
                .map(|c| c.billing_amount)
                .sum();
            CompanyRevenue {
                company: company.clone(),
                revenue,
                budget: (revenue * BUDGET_RATE).floor(),
            }
        })
        .collect();

    let total_revenue: f64 = companies.iter().map(|c| c.revenue).sum();

    // Stable sort keeps roster order for equal revenues.
    companies.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(Ordering::Equal)
    });

    RevenueAllocation {
        companies,
        total_revenue,
        total_budget: total_revenue * BUDGET_RATE,
    }
}
