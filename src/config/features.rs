//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FeatureFlags {
    /// Refuse saves until the delivery method allow list has loaded
    #[serde(default)]
    pub defer_save_until_allow_list: bool,
}
