//! Application handlers.
//!
//! Command handlers that orchestrate the settings workflows.

pub mod load_settings;
pub mod reset_settings;
pub mod save_settings;

pub use load_settings::{LoadSettingsHandler, LoadSettingsResult};
pub use reset_settings::{ResetOutcome, ResetSettingsHandler};
pub use save_settings::{SaveSettingsHandler, SaveSettingsResult};
