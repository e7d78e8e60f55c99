//! Unified error types for the loyalty desk.
//!
//! The domain calculators never fail on malformed numeric input (amounts are
//! coerced to zero at the serde boundary), so every variant here comes from
//! either configuration, the state machine, or the collaborator API.

use crate::models::TicketStatus;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration file or environment problem.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration.
        message: String,
    },

    /// A required field is missing or malformed. Surfaced inline, never retried.
    #[error("Validation failed: {detail}")]
    Validation {
        /// Field-level detail, verbatim from the API where available.
        detail: String,
    },

    /// The access token was rejected. Internal trigger for the single
    /// refresh-and-retry pass in the gateway; callers normally see
    /// [`Error::SessionExpired`] instead.
    #[error("Access token rejected by the API")]
    AuthExpired,

    /// The refresh attempt failed or the retried request was rejected again.
    /// Terminal for the operation; the user must re-authenticate.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// The API refused the write because it conflicts with existing state,
    /// e.g. a second loyalty program for the same customer.
    #[error("Conflict: {detail}")]
    Conflict {
        /// Verbatim conflict description.
        detail: String,
    },

    /// The requested ticket status change is not a legal lifecycle transition.
    #[error("Illegal ticket transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the ticket currently has.
        from: TicketStatus,
        /// Status that was requested.
        to: TicketStatus,
    },

    /// The requested status equals the current one. Rejected explicitly
    /// rather than silently succeeding.
    #[error("Ticket is already {status}")]
    NoOpTransition {
        /// The unchanged status.
        status: TicketStatus,
    },

    /// Comments may not be appended while the ticket is resolved or closed.
    #[error("Comments are not accepted while the ticket is {status}")]
    CommentsClosed {
        /// Status that blocks commenting.
        status: TicketStatus,
    },

    /// The collaborator API was unreachable. Not retried automatically.
    #[error("Network error calling {endpoint}: {detail}")]
    Transient {
        /// Logical endpoint path, e.g. `api/customers/`.
        endpoint: String,
        /// Underlying transport failure.
        detail: String,
    },

    /// The API answered with an unexpected non-2xx status.
    #[error("API {endpoint} returned {status}: {body}")]
    Api {
        /// Logical endpoint path.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response body could not be decoded into the expected model.
    #[error("Failed to decode response from {endpoint}: {detail}")]
    Decode {
        /// Logical endpoint path.
        endpoint: String,
        /// Deserialization failure detail.
        detail: String,
    },

    /// I/O error, e.g. while reading the persisted token store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error from the token store or request building.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for failures that should be shown next to the offending input
    /// rather than treated as infrastructure trouble.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// True for rejections caused by existing state, including the local
    /// state-machine checks.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Conflict { .. }
                | Self::InvalidTransition { .. }
                | Self::NoOpTransition { .. }
                | Self::CommentsClosed { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_classification_covers_state_machine_rejections() {
        let err = Error::InvalidTransition {
            from: TicketStatus::Closed,
            to: TicketStatus::Open,
        };
        assert!(err.is_conflict());
        assert!(!err.is_validation());

        let err = Error::NoOpTransition {
            status: TicketStatus::Open,
        };
        assert!(err.is_conflict());

        let err = Error::Validation {
            detail: "email required".to_string(),
        };
        assert!(err.is_validation());
        assert!(!err.is_conflict());
    }

    #[test]
    fn display_includes_enough_detail_to_distinguish_kinds() {
        let transient = Error::Transient {
            endpoint: "api/customers/".to_string(),
            detail: "connection refused".to_string(),
        };
        assert!(transient.to_string().contains("api/customers/"));
        assert!(transient.to_string().contains("connection refused"));

        let validation = Error::Validation {
            detail: "company_name: required".to_string(),
        };
        assert!(validation.to_string().contains("company_name"));
    }
}
