//! REST gateway - authenticated access to the remote CRM API.
//!
//! The API owns all persistence; this module owns the transport, the
//! credential lifecycle, and the mapping from HTTP failures onto the error
//! taxonomy. Resource operations are grouped per entity as `impl Gateway`
//! blocks in the submodules.
//!
//! Independent collection fetches may run concurrently (`tokio::join!`),
//! but each write to a single entity is awaited to completion before that
//! entity is treated as settled. There is no cancellation primitive:
//! navigating away simply discards a late response.

/// Campaign CRUD
pub mod campaigns;
/// Customer CRUD
pub mod customers;
/// The HTTP client and request policy
pub mod gateway;
/// Loyalty program listing and creation
pub mod loyalty;
/// Explicit session/credential context
pub mod session;
/// Support ticket operations
pub mod tickets;
/// Billing transaction operations
pub mod transactions;

pub use gateway::Gateway;
pub use session::{AuthTokens, Session};
