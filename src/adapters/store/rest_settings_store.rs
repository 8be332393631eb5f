//! REST settings store adapter.
//!
//! Implements `NotificationSettingsRepository` and `DeliveryMethodReader`
//! against the platform's notification API:
//!
//! - `GET  {base}/api/notification/settings/user`
//! - `POST {base}/api/notification/settings/user`
//! - `GET  {base}/api/notification/deliveryMethods`
//!
//! Authentication is left to the caller (e.g. a reverse proxy or a
//! pre-configured client).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::preferences::{DeliveryMethod, NotificationUserSettings};
use crate::ports::{DeliveryMethodReader, NotificationSettingsRepository, StoreError};

const USER_SETTINGS_PATH: &str = "/api/notification/settings/user";
const DELIVERY_METHODS_PATH: &str = "/api/notification/deliveryMethods";

/// REST store configuration.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Base URL of the platform, without trailing path.
    base_url: String,

    /// Per-request timeout.
    request_timeout: Duration,
}

impl RestStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// Settings store backed by the platform REST API.
pub struct RestSettingsStore {
    config: RestStoreConfig,
    http_client: reqwest::Client,
}

impl RestSettingsStore {
    /// Create a new REST store.
    ///
    /// # Errors
    /// Returns `StoreError::Transport` if the HTTP client cannot be built.
    pub fn new(config: RestStoreConfig) -> Result<Self, StoreError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| StoreError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<T, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(url = %url, status = status.as_u16(), "Settings store rejected request");
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(url = %url, "Failed to parse settings store response: {}", e);
            StoreError::InvalidResponse(e.to_string())
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let url = self.config.endpoint(path);
        tracing::debug!(url = %url, "GET settings store");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!(url = %url, "Settings store unreachable: {}", e);
            StoreError::Transport(e.to_string())
        })?;

        self.read_json(&url, response).await
    }
}

#[async_trait]
impl NotificationSettingsRepository for RestSettingsStore {
    async fn load_user_settings(&self) -> Result<NotificationUserSettings, StoreError> {
        self.get_json(USER_SETTINGS_PATH).await
    }

    async fn save_user_settings(
        &self,
        settings: &NotificationUserSettings,
    ) -> Result<NotificationUserSettings, StoreError> {
        let url = self.config.endpoint(USER_SETTINGS_PATH);
        tracing::debug!(url = %url, "POST settings store");

        let response = self
            .http_client
            .post(&url)
            .json(settings)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(url = %url, "Settings store unreachable: {}", e);
                StoreError::Transport(e.to_string())
            })?;

        self.read_json(&url, response).await
    }
}

#[async_trait]
impl DeliveryMethodReader for RestSettingsStore {
    async fn available_delivery_methods(&self) -> Result<Vec<DeliveryMethod>, StoreError> {
        self.get_json(DELIVERY_METHODS_PATH).await
    }
}
