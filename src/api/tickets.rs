//! Support ticket operations.
//!
//! Status changes and comments are gated by the lifecycle state machine in
//! [`crate::core::ticket`] before any request is issued, so an illegal
//! change never reaches the API. A successful write returns the
//! authoritative record, which callers use to reconcile any optimistic
//! local state.

use crate::api::gateway::Gateway;
use crate::core::ticket;
use crate::errors::{Error, Result};
use crate::models::{SupportTicket, SupportTicketDraft, TicketComment, TicketStatus};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct CommentDraft<'a> {
    ticket: i64,
    comment_text: &'a str,
}

impl Gateway {
    /// Fetches all support tickets.
    pub async fn list_support_tickets(&self) -> Result<Vec<SupportTicket>> {
        self.get_json("api/support-tickets/").await
    }

    /// Creates a support ticket. New tickets always start `open`.
    pub async fn create_support_ticket(&self, draft: &SupportTicketDraft) -> Result<SupportTicket> {
        if draft.subject.trim().is_empty() {
            return Err(Error::Validation {
                detail: "Subject is required".to_string(),
            });
        }
        if draft.status != TicketStatus::Open {
            return Err(Error::Validation {
                detail: "New tickets must start open".to_string(),
            });
        }
        self.post_json("api/support-tickets/", draft).await
    }

    /// Moves a ticket to a new lifecycle status.
    ///
    /// The transition is validated locally first; only a legal change is
    /// persisted, and the returned ticket reflects the authoritative state.
    pub async fn update_ticket_status(
        &self,
        current: &SupportTicket,
        status: TicketStatus,
    ) -> Result<SupportTicket> {
        ticket::validate_transition(current.status, status)?;
        let body = serde_json::json!({ "status": status });
        let updated: SupportTicket = self
            .patch_json(&format!("api/support-tickets/{}/", current.id), &body)
            .await?;
        info!(
            ticket = current.id,
            from = %current.status,
            to = %updated.status,
            "Ticket status updated"
        );
        Ok(updated)
    }

    /// Appends a comment to a ticket that still accepts discussion.
    pub async fn add_ticket_comment(
        &self,
        current: &SupportTicket,
        text: &str,
    ) -> Result<TicketComment> {
        if !ticket::can_comment(current.status) {
            return Err(Error::CommentsClosed {
                status: current.status,
            });
        }
        if text.trim().is_empty() {
            return Err(Error::Validation {
                detail: "Comment text cannot be empty".to_string(),
            });
        }
        let draft = CommentDraft {
            ticket: current.id,
            comment_text: text,
        };
        self.post_json("api/ticket-comments/", &draft).await
    }

    /// Deletes a support ticket.
    pub async fn delete_support_ticket(&self, id: i64) -> Result<()> {
        self.delete(&format!("api/support-tickets/{id}/")).await
    }
}
