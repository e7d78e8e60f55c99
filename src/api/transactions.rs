//! Billing transaction operations.
//!
//! Transactions are append-only from the desk's perspective: they are
//! created and deleted, never edited. Totals are always recomputed via
//! [`crate::core::billing`] from the latest snapshot rather than stored.

use crate::api::gateway::Gateway;
use crate::errors::{Error, Result};
use crate::models::BillingTransaction;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TransactionDraft<'a> {
    customer: i64,
    amount: f64,
    description: Option<&'a str>,
}

impl Gateway {
    /// Fetches the billing transactions for one customer.
    pub async fn list_billing_transactions(
        &self,
        customer_id: i64,
    ) -> Result<Vec<BillingTransaction>> {
        self.get_json(&format!("api/billing-transactions/?customer={customer_id}"))
            .await
    }

    /// Appends an incremental billing transaction to a customer.
    pub async fn create_billing_transaction(
        &self,
        customer_id: i64,
        amount: f64,
        description: Option<&str>,
    ) -> Result<BillingTransaction> {
        if amount < 0.0 {
            return Err(Error::Validation {
                detail: "Transaction amount cannot be negative".to_string(),
            });
        }
        let draft = TransactionDraft {
            customer: customer_id,
            amount,
            description,
        };
        self.post_json("api/billing-transactions/", &draft).await
    }

    /// Deletes a billing transaction. The customer's total changes on the
    /// next recomputation; nothing cached needs invalidating.
    pub async fn delete_billing_transaction(&self, id: i64) -> Result<()> {
        self.delete(&format!("api/billing-transactions/{id}/")).await
    }
}
