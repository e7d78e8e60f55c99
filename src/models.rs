//! Wire models for the entities owned by the remote CRM API.
//!
//! Every record here is a read snapshot: the API is the source of truth and
//! nothing is cached or recomputed into stored fields on this side. Monetary
//! amounts are deserialized leniently - the API serializes decimals as JSON
//! strings, and partially-loaded rows may carry `null` or omit the field
//! entirely - so any missing or non-numeric amount coerces to `0.0`.

use crate::core::tier::LoyaltyTier;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Coerces a raw JSON value into a monetary amount, treating anything that is
/// not a number or a numeric string as zero.
pub(crate) fn coerce_amount(value: Option<&serde_json::Value>) -> f64 {
    match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(coerce_amount(value.as_ref()))
}

/// A customer record with its base billing amount and billing transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier assigned by the API.
    pub id: i64,
    /// Customer's first name.
    pub first_name: String,
    /// Customer's last name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// State or province.
    #[serde(default)]
    pub state: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub zipcode: Option<String>,
    /// Company the customer belongs to, e.g. "Titan". Free-form on the wire;
    /// the known roster lives in [`crate::config::AppConfig::companies`].
    #[serde(default)]
    pub company_name: Option<String>,
    /// Date of the customer's first purchase.
    #[serde(default)]
    pub date_of_purchase: Option<NaiveDate>,
    /// Base billing amount, before incremental transactions.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub billing_amount: f64,
    /// Incremental billing transactions, append-only within a session.
    #[serde(default)]
    pub billing_transactions: Vec<BillingTransaction>,
}

impl Customer {
    /// "First Last", trimmed - the display name used across list views.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Fields for creating or replacing a customer record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerDraft {
    /// First name (required).
    pub first_name: String,
    /// Last name (required).
    pub last_name: String,
    /// Contact email (required).
    pub email: String,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or province.
    pub state: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// Postal code.
    pub zipcode: Option<String>,
    /// Company name (required, one of the configured roster).
    pub company_name: String,
    /// Date of first purchase.
    pub date_of_purchase: Option<NaiveDate>,
    /// Base billing amount.
    pub billing_amount: f64,
}

/// An incremental billing transaction. Immutable once created; deletion is
/// the only mutation the desk anticipates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingTransaction {
    /// Unique identifier assigned by the API.
    pub id: i64,
    /// Owning customer id.
    pub customer: i64,
    /// Transaction amount.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    /// Optional free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A loyalty program ledger entry. At most one per customer; tier and points
/// are frozen at creation time and never recomputed client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoyaltyProgram {
    /// Unique identifier assigned by the API.
    pub id: i64,
    /// Owning customer id (unique across programs).
    pub customer: i64,
    /// Customer display name, annotated by the API for list views.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Customer email, annotated by the API for list views.
    #[serde(default)]
    pub customer_email: Option<String>,
    /// Tier assigned at creation.
    pub tier: LoyaltyTier,
    /// Lifetime points granted at creation.
    #[serde(default)]
    pub total_points: i64,
    /// Spendable points balance.
    #[serde(default)]
    pub points_balance: i64,
}

/// Payload for creating a loyalty program.
#[derive(Debug, Clone, Serialize)]
pub struct LoyaltyProgramDraft {
    /// Customer the program is for.
    pub customer: i64,
    /// Tier computed from the customer's total billing.
    pub tier: LoyaltyTier,
    /// Points granted, `floor(total_billing * 0.15)`.
    pub total_points: i64,
    /// Initial balance, equal to `total_points`.
    pub points_balance: i64,
}

/// Support ticket category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketCategory {
    /// Billing questions and disputes.
    Billing,
    /// Technical problems.
    Technical,
    /// General inquiries.
    General,
    /// Complaints.
    Complaint,
    /// Feature requests.
    FeatureRequest,
    /// Feedback.
    Feedback,
}

/// Support ticket priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    /// Low priority.
    Low,
    /// Medium priority (the default for new tickets).
    Medium,
    /// High priority.
    High,
    /// Urgent.
    Urgent,
}

/// Support ticket lifecycle status. Legal transitions are governed by
/// [`crate::core::ticket`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Newly created, awaiting triage.
    Open,
    /// Being worked on.
    InProgress,
    /// Waiting on the customer.
    Waiting,
    /// Fixed; only closing remains.
    Resolved,
    /// Terminal. No further changes of any kind.
    Closed,
}

impl TicketStatus {
    /// The wire token for this status, e.g. `in_progress`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Waiting => "waiting",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A support ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportTicket {
    /// Unique identifier assigned by the API.
    pub id: i64,
    /// Owning customer id.
    pub customer: i64,
    /// Short subject line.
    pub subject: String,
    /// Full problem description.
    #[serde(default)]
    pub description: Option<String>,
    /// Ticket category.
    pub category: TicketCategory,
    /// Ticket priority.
    pub priority: TicketPriority,
    /// Current lifecycle status.
    pub status: TicketStatus,
    /// Comments in creation order.
    #[serde(default)]
    pub comments: Vec<TicketComment>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields for creating a support ticket. New tickets start `open`.
#[derive(Debug, Clone, Serialize)]
pub struct SupportTicketDraft {
    /// Customer the ticket is for.
    pub customer: i64,
    /// Short subject line.
    pub subject: String,
    /// Full problem description.
    pub description: String,
    /// Ticket category.
    pub category: TicketCategory,
    /// Ticket priority.
    pub priority: TicketPriority,
    /// Initial status, always [`TicketStatus::Open`].
    pub status: TicketStatus,
}

/// A comment appended to a support ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketComment {
    /// Unique identifier assigned by the API.
    pub id: i64,
    /// Owning ticket id.
    pub ticket: i64,
    /// Comment body.
    pub comment_text: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Marketing campaign channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    /// Email campaign.
    Email,
    /// SMS campaign.
    Sms,
    /// Push notification.
    Push,
    /// Social media.
    Social,
    /// Discount offer.
    Discount,
    /// Event.
    Event,
}

/// Marketing campaign status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    /// Being drafted, not yet running.
    Draft,
    /// Currently running.
    Active,
    /// Temporarily paused.
    Paused,
    /// Finished.
    Completed,
}

/// A marketing campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    /// Unique identifier assigned by the API.
    pub id: i64,
    /// Campaign name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Delivery channel.
    pub campaign_type: CampaignType,
    /// Current status.
    pub status: CampaignStatus,
    /// Subject line shown to recipients.
    #[serde(default)]
    pub subject_line: Option<String>,
    /// Campaign body content.
    #[serde(default)]
    pub content: Option<String>,
    /// Company this campaign targets, if any.
    #[serde(default)]
    pub target_company: Option<String>,
}

/// Fields for creating or replacing a campaign.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignDraft {
    /// Campaign name (required).
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Delivery channel.
    pub campaign_type: CampaignType,
    /// Status, usually [`CampaignStatus::Draft`] for new campaigns.
    pub status: CampaignStatus,
    /// Subject line shown to recipients (required).
    pub subject_line: String,
    /// Campaign body content.
    pub content: String,
    /// Company this campaign targets, if any.
    pub target_company: Option<String>,
}

/// Fields for registering a new desk user.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationDraft {
    /// Full display name.
    pub full_name: String,
    /// Login email.
    pub email: String,
    /// Login username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Password confirmation, must match `password`.
    pub password2: String,
}
