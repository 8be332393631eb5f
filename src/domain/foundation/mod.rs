//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary, the state machine trait and the
//! timestamp value object shared by the preference domain.

mod errors;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
