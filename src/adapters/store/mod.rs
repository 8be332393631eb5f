//! Settings Store Adapters
//!
//! Implementations of the `NotificationSettingsRepository` and
//! `DeliveryMethodReader` ports.
//!
//! ## Available Adapters
//!
//! - **RestSettingsStore** - Talks to the platform's REST API
//! - **InMemorySettingsStore** - Keeps settings in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::store::{InMemorySettingsStore, RestSettingsStore, RestStoreConfig};
//!
//! // Production: REST-backed store
//! let store = RestSettingsStore::new(RestStoreConfig::new("https://iot.example.com"))?;
//!
//! // Testing: in-memory store
//! let store = InMemorySettingsStore::new();
//! ```

mod in_memory_settings_store;
mod rest_settings_store;

pub use in_memory_settings_store::InMemorySettingsStore;
pub use rest_settings_store::{RestSettingsStore, RestStoreConfig};
