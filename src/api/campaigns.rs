//! Marketing campaign CRUD.
//!
//! Budgets for campaign planning come from the pure allocator in
//! [`crate::core::revenue`]; this module only moves campaign records.

use crate::api::gateway::Gateway;
use crate::errors::{Error, Result};
use crate::models::{Campaign, CampaignDraft};

fn validate_draft(draft: &CampaignDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(Error::Validation {
            detail: "Campaign name is required".to_string(),
        });
    }
    if draft.subject_line.trim().is_empty() {
        return Err(Error::Validation {
            detail: "Subject line is required".to_string(),
        });
    }
    Ok(())
}

impl Gateway {
    /// Fetches all campaigns.
    pub async fn list_campaigns(&self) -> Result<Vec<Campaign>> {
        self.get_json("api/campaigns/").await
    }

    /// Creates a campaign.
    pub async fn create_campaign(&self, draft: &CampaignDraft) -> Result<Campaign> {
        validate_draft(draft)?;
        self.post_json("api/campaigns/", draft).await
    }

    /// Replaces an existing campaign.
    pub async fn update_campaign(&self, id: i64, draft: &CampaignDraft) -> Result<Campaign> {
        validate_draft(draft)?;
        self.put_json(&format!("api/campaigns/{id}/"), draft).await
    }

    /// Deletes a campaign.
    pub async fn delete_campaign(&self, id: i64) -> Result<()> {
        self.delete(&format!("api/campaigns/{id}/")).await
    }
}
