//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `NOTIFY_PREFS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use notification_prefs::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Settings store at {}", config.store.base_url);
//! ```

mod error;
mod features;
mod logging;
mod store;

pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use logging::LoggingConfig;
pub use store::StoreConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration pointing at a local platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote settings store (base URL, timeout)
    #[serde(default)]
    pub store: StoreConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NOTIFY_PREFS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `NOTIFY_PREFS__STORE__BASE_URL=https://iot.example.com` -> `store.base_url`
    /// - `NOTIFY_PREFS__FEATURES__DEFER_SAVE_UNTIL_ALLOW_LIST=true` -> `features.defer_save_until_allow_list`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NOTIFY_PREFS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.store.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("NOTIFY_PREFS__STORE__BASE_URL");
        env::remove_var("NOTIFY_PREFS__STORE__REQUEST_TIMEOUT_SECS");
        env::remove_var("NOTIFY_PREFS__LOGGING__LEVEL");
        env::remove_var("NOTIFY_PREFS__FEATURES__DEFER_SAVE_UNTIL_ALLOW_LIST");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.store.base_url, "http://localhost:8080");
        assert_eq!(config.logging.level, "info");
        assert!(!config.features.defer_save_until_allow_list);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NOTIFY_PREFS__STORE__BASE_URL", "https://iot.example.com");
        env::set_var("NOTIFY_PREFS__STORE__REQUEST_TIMEOUT_SECS", "30");
        env::set_var("NOTIFY_PREFS__FEATURES__DEFER_SAVE_UNTIL_ALLOW_LIST", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.store.base_url, "https://iot.example.com");
        assert_eq!(config.store.request_timeout_secs, 30);
        assert!(config.features.defer_save_until_allow_list);
    }

    #[test]
    fn test_validate_rejects_bad_log_level() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("NOTIFY_PREFS__LOGGING__LEVEL", "chatty");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidLogLevel(_))
        ));
    }
}
