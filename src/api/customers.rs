//! Customer CRUD against the remote API.
//!
//! Required fields are validated before anything reaches the wire, matching
//! the inline form checks the desk has always applied.

use crate::api::gateway::Gateway;
use crate::errors::{Error, Result};
use crate::models::{Customer, CustomerDraft};

fn validate_draft(draft: &CustomerDraft) -> Result<()> {
    if draft.first_name.trim().is_empty() || draft.last_name.trim().is_empty() {
        return Err(Error::Validation {
            detail: "First and last name are required".to_string(),
        });
    }
    if draft.email.trim().is_empty() {
        return Err(Error::Validation {
            detail: "Email is required".to_string(),
        });
    }
    if draft.company_name.trim().is_empty() {
        return Err(Error::Validation {
            detail: "Please select a company".to_string(),
        });
    }
    if draft.billing_amount < 0.0 {
        return Err(Error::Validation {
            detail: "Billing amount cannot be negative".to_string(),
        });
    }
    Ok(())
}

impl Gateway {
    /// Fetches all customer snapshots, transactions included.
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.get_json("api/customers/").await
    }

    /// Fetches a single customer snapshot.
    pub async fn get_customer(&self, id: i64) -> Result<Customer> {
        self.get_json(&format!("api/customers/{id}/")).await
    }

    /// Creates a customer record.
    pub async fn create_customer(&self, draft: &CustomerDraft) -> Result<Customer> {
        validate_draft(draft)?;
        self.post_json("api/customers/", draft).await
    }

    /// Replaces a customer record.
    pub async fn update_customer(&self, id: i64, draft: &CustomerDraft) -> Result<Customer> {
        validate_draft(draft)?;
        self.put_json(&format!("api/customers/{id}/"), draft).await
    }

    /// Updates just the base billing amount, as the loyalty view does when
    /// the figure is edited inline. Tier is never sent - it is always
    /// recomputed from the returned snapshot.
    pub async fn set_billing_amount(&self, id: i64, amount: f64) -> Result<Customer> {
        if amount < 0.0 {
            return Err(Error::Validation {
                detail: "Billing amount cannot be negative".to_string(),
            });
        }
        let body = serde_json::json!({ "billing_amount": amount });
        self.patch_json(&format!("api/customers/{id}/"), &body).await
    }

    /// Deletes a customer record.
    pub async fn delete_customer(&self, id: i64) -> Result<()> {
        self.delete(&format!("api/customers/{id}/")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_name_email_and_company() {
        let mut draft = CustomerDraft {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            company_name: "Titan".to_string(),
            billing_amount: 100.0,
            ..CustomerDraft::default()
        };
        assert!(validate_draft(&draft).is_ok());

        draft.email = "  ".to_string();
        assert!(validate_draft(&draft).is_err());

        draft.email = "asha@example.com".to_string();
        draft.company_name = String::new();
        assert!(matches!(
            validate_draft(&draft),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn negative_billing_amount_is_rejected_locally() {
        let draft = CustomerDraft {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            email: "asha@example.com".to_string(),
            company_name: "Titan".to_string(),
            billing_amount: -1.0,
            ..CustomerDraft::default()
        };
        assert!(validate_draft(&draft).is_err());
    }
}
