//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `NotificationSettingsRepository` - Load and persist user settings
//! - `DeliveryMethodReader` - Platform-wide delivery method allow list
//!
//! ## Interaction Ports
//!
//! - `Confirmer` - Yes/no confirmation prompts
//! - `Translator` - Translation key lookup

mod confirmer;
mod delivery_method_reader;
mod settings_repository;
mod translator;

pub use confirmer::{ConfirmPrompt, Confirmer};
pub use delivery_method_reader::DeliveryMethodReader;
pub use settings_repository::{NotificationSettingsRepository, StoreError};
pub use translator::Translator;
