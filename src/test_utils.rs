//! Shared test utilities.
//!
//! Builders for snapshot fixtures with sensible defaults, used by the
//! inline tests across the core modules.

use crate::models::{BillingTransaction, Customer};

/// Builds a customer snapshot with the given base billing amount and one
/// transaction per entry in `tx_amounts`.
#[must_use]
pub fn customer_with_billing(
    id: i64,
    company: &str,
    billing_amount: f64,
    tx_amounts: &[f64],
) -> Customer {
    Customer {
        id,
        first_name: format!("Customer{id}"),
        last_name: "Test".to_string(),
        email: format!("customer{id}@example.com"),
        phone: None,
        address: None,
        city: None,
        state: None,
        country: None,
        zipcode: None,
        company_name: Some(company.to_string()),
        date_of_purchase: None,
        billing_amount,
        billing_transactions: tx_amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| BillingTransaction {
                id: id * 1000 + i64::try_from(i).unwrap_or(0),
                customer: id,
                amount,
                description: None,
                created_at: None,
            })
            .collect(),
    }
}

/// Builds a company roster from string literals.
#[must_use]
pub fn roster(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}
