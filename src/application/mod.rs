//! Application layer - Workspace and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers share one `SettingsWorkspace` per edited user.

mod errors;
pub mod handlers;
mod workspace;

pub use errors::SettingsError;
pub use handlers::{
    LoadSettingsHandler, LoadSettingsResult, ResetOutcome, ResetSettingsHandler,
    SaveSettingsHandler, SaveSettingsResult,
};
pub use workspace::SettingsWorkspace;
