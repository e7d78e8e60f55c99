//! Loyalty program operations.
//!
//! A customer may hold at most one program, and its tier and points are
//! computed here - once, at creation time, from the transaction-inclusive
//! total - and then frozen. Callers never pick tier or points themselves,
//! which keeps every call site consistent with the classifier.

use crate::api::gateway::Gateway;
use crate::core::{billing, tier};
use crate::errors::{Error, Result};
use crate::models::{Customer, LoyaltyProgram, LoyaltyProgramDraft};
use tracing::info;

impl Gateway {
    /// Fetches all loyalty programs.
    pub async fn list_loyalty_programs(&self) -> Result<Vec<LoyaltyProgram>> {
        self.get_json("api/loyalty-programs/").await
    }

    /// Creates a loyalty program for a customer, deriving tier and points
    /// from the customer's current total billing.
    ///
    /// Fails with a conflict if the customer already has a program - checked
    /// against the fetched list before the write, and mapped from the API's
    /// uniqueness rejection as a backstop - regardless of what tier or
    /// points would have been submitted.
    pub async fn create_loyalty_program(&self, customer: &Customer) -> Result<LoyaltyProgram> {
        let existing = self.list_loyalty_programs().await?;
        if existing.iter().any(|p| p.customer == customer.id) {
            return Err(Error::Conflict {
                detail: format!(
                    "Customer {} already has a loyalty program; points cannot be reassigned",
                    customer.full_name()
                ),
            });
        }

        let assessment = tier::assess(billing::total_billing(customer));
        let draft = LoyaltyProgramDraft {
            customer: customer.id,
            tier: assessment.tier,
            total_points: assessment.points,
            points_balance: assessment.points,
        };

        match self.post_json("api/loyalty-programs/", &draft).await {
            Ok(program) => {
                info!(
                    customer = customer.id,
                    tier = %assessment.tier,
                    points = assessment.points,
                    "Loyalty program created"
                );
                Ok(program)
            }
            // The API enforces the one-program rule as a 400 on the
            // customer field; surface it as the conflict it is.
            Err(Error::Validation { detail }) if detail.contains("customer") => {
                Err(Error::Conflict { detail })
            }
            Err(e) => Err(e),
        }
    }
}
