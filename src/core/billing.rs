//! Monetary aggregation - the single definition of a customer's total billing.
//!
//! The total is never stored anywhere: it is recomputed from the latest
//! snapshot so it can't go stale when a transaction is added or removed.
//! Malformed amounts were already coerced to zero at the serde boundary, so
//! aggregation itself has no failure mode.

use crate::models::Customer;

/// Base billing amount plus the sum of all incremental transaction amounts.
///
/// Order of transactions is irrelevant; the result is a plain arithmetic sum.
#[must_use]
pub fn total_billing(customer: &Customer) -> f64 {
    total_from_parts(
        customer.billing_amount,
        customer.billing_transactions.iter().map(|tx| tx.amount),
    )
}

/// Same aggregation for callers that hold the raw parts rather than a
/// [`Customer`] snapshot, e.g. an edit view that just fetched the
/// transaction list separately.
#[must_use]
pub fn total_from_parts(base: f64, amounts: impl IntoIterator<Item = f64>) -> f64 {
    base + amounts.into_iter().sum::<f64>()
}
