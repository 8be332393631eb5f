//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (errors, state machine, timestamps)
//! - `preferences` - Notification preference matrix, codec and aggregation

pub mod foundation;
pub mod preferences;
