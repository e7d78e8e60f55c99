//! `LoyaltyDesk` - domain core and REST gateway for a small CRM product
//!
//! This crate consolidates the business rules of a customer-relationship-management
//! desk - loyalty tier classification, points accrual, tier progression, campaign
//! budget allocation, and the support-ticket lifecycle - into a pure,
//! framework-agnostic core, plus an authenticated HTTP gateway against the remote
//! CRM API that owns all persistence.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    // Documentation - missing docs should be added gradually
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Complexity and readability
    clippy::cognitive_complexity,
    clippy::large_enum_variant,
    clippy::match_same_arms,
    clippy::too_many_lines,

    // Style consistency
    clippy::enum_glob_use,
    clippy::inconsistent_struct_constructor,
    clippy::must_use_candidate,
    clippy::redundant_closure_for_method_calls,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// REST gateway - authenticated HTTP access to the remote CRM API
pub mod api;
/// Configuration management for the API endpoint, company roster, and session store
pub mod config;
/// Core business logic - pure loyalty, billing, revenue, and ticket-lifecycle rules
pub mod core;
/// Unified error types and result handling
pub mod errors;
/// Wire models for the entities owned by the remote API
pub mod models;

#[cfg(test)]
pub mod test_utils;
