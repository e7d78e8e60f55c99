//! Support-ticket lifecycle state machine.
//!
//! Lifecycle: `open -> in_progress -> waiting -> resolved -> closed`, where
//! `closed` is terminal and `resolved` is near-terminal (only closing
//! remains). Any other pairing among the five states is legal. A no-op
//! "transition" to the current status is rejected as a user-visible error
//! rather than a silent success.
//!
//! The gateway calls these checks before issuing the corresponding write,
//! so an illegal change never reaches the wire.

use crate::errors::{Error, Result};
use crate::models::TicketStatus;

/// Validates a requested status change against the lifecycle rules.
pub fn validate_transition(from: TicketStatus, to: TicketStatus) -> Result<()> {
    if from == to {
        return Err(Error::NoOpTransition { status: from });
    }
    match from {
        TicketStatus::Closed => Err(Error::InvalidTransition { from, to }),
        TicketStatus::Resolved if to != TicketStatus::Closed => {
            Err(Error::InvalidTransition { from, to })
        }
        _ => Ok(()),
    }
}

/// Whether comments may be appended in the given status. Resolved and
/// closed tickets accept no further discussion.
#[must_use]
pub const fn can_comment(status: TicketStatus) -> bool {
    !matches!(status, TicketStatus::Resolved | TicketStatus::Closed)
}
