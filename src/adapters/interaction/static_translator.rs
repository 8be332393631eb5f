//! Static Translator Adapter
//!
//! Serves the built-in English strings for the settings screen. Extra
//! entries can be layered on top; unknown keys echo back unchanged.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::ports::Translator;

static ENGLISH: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("notification.settings.reset-all-title", "Reset all notification settings"),
        (
            "notification.settings.reset-all-text",
            "All notification types will be enabled for every delivery method. Continue?",
        ),
        ("action.no", "No"),
        ("action.yes", "Yes"),
        ("notification.delivery-method.web", "Web"),
        ("notification.delivery-method.email", "Email"),
        ("notification.delivery-method.sms", "SMS"),
        ("notification.delivery-method.slack", "Slack"),
        ("notification.delivery-method.microsoft-teams", "Microsoft Teams"),
        ("notification.delivery-method.mobile-app", "Mobile app"),
    ])
});

/// Translator over a fixed string table.
#[derive(Debug, Clone, Default)]
pub struct StaticTranslator {
    overrides: HashMap<String, String>,
}

impl StaticTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a string.
    pub fn with_entry(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), text.into());
        self
    }
}

impl Translator for StaticTranslator {
    fn translate(&self, key: &str) -> String {
        self.overrides
            .get(key)
            .map(String::as_str)
            .or_else(|| ENGLISH.get(key).copied())
            .unwrap_or(key)
            .to_string()
    }
}
