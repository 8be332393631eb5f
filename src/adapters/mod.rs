//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `store` - Settings store implementations (REST, in-memory)
//! - `interaction` - Headless translator and confirmer

pub mod interaction;
pub mod store;

pub use interaction::{FixedConfirmer, StaticTranslator};
pub use store::{InMemorySettingsStore, RestSettingsStore, RestStoreConfig};
