//! Core business logic - pure, synchronous, framework-agnostic.
//!
//! Everything in this module operates on immutable snapshots fetched by the
//! gateway and is recomputed from scratch on every call. Nothing here touches
//! the network or holds state, which is what keeps the tier and lifecycle
//! rules consistent across every call site.

/// Monetary aggregation over a customer's base amount and transactions
pub mod billing;
/// Tier progression toward the next loyalty band
pub mod progression;
/// Per-company revenue aggregation and campaign budget allocation
pub mod revenue;
/// Support-ticket lifecycle state machine
pub mod ticket;
/// Loyalty tier bands, points accrual, and company tier distribution
pub mod tier;
