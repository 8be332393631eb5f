//! Preference domain - the notification preference matrix.
//!
//! # Module Organization
//!
//! - `delivery_method` - Delivery channels and the editable catalog
//! - `row` - One notification type and its per-method flags
//! - `codec` - Keyed wire format <-> ordered row list
//! - `matrix` - The editable row list with batch writes
//! - `aggregate` - Tri-state "select all" derivation
//! - `reset_phase` - Reset workflow state machine

pub mod aggregate;
mod codec;
mod delivery_method;
mod errors;
mod matrix;
mod reset_phase;
mod row;

pub use aggregate::{CheckState, Column};
pub use codec::{NotificationUserSettings, RawPreference, SettingsCodec, WirePrefs};
pub use delivery_method::{DeliveryMethod, DeliveryMethodCatalog};
pub use errors::PreferenceError;
pub use matrix::PreferenceMatrix;
pub use reset_phase::ResetPhase;
pub use row::PreferenceRow;
