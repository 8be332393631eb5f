//! LoadSettingsHandler - initial fetch of the user's settings and the
//! platform's delivery method allow list.
//!
//! The two fetches are independent. `handle` runs them concurrently and
//! waits for both; callers that must not wait on the allow list can call
//! `load_settings` and `load_allowed_methods` separately.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::{SettingsError, SettingsWorkspace};
use crate::ports::{DeliveryMethodReader, NotificationSettingsRepository};

/// Result of the initial load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSettingsResult {
    pub row_count: usize,
    pub allow_list_loaded: bool,
}

/// Handler for loading notification settings into the workspace.
pub struct LoadSettingsHandler {
    workspace: Arc<SettingsWorkspace>,
    repository: Arc<dyn NotificationSettingsRepository>,
    methods: Arc<dyn DeliveryMethodReader>,
}

impl LoadSettingsHandler {
    pub fn new(
        workspace: Arc<SettingsWorkspace>,
        repository: Arc<dyn NotificationSettingsRepository>,
        methods: Arc<dyn DeliveryMethodReader>,
    ) -> Self {
        Self {
            workspace,
            repository,
            methods,
        }
    }

    /// Fetches settings and allow list concurrently.
    ///
    /// A failed allow-list fetch is logged and tolerated; the workspace then
    /// keeps treating every method as allowed.
    pub async fn handle(&self) -> Result<LoadSettingsResult, SettingsError> {
        let (row_count, allow_list_loaded) =
            tokio::join!(self.load_settings(), self.load_allowed_methods());
        Ok(LoadSettingsResult {
            row_count: row_count?,
            allow_list_loaded,
        })
    }

    /// Fetches and installs the user's settings. Returns the row count.
    pub async fn load_settings(&self) -> Result<usize, SettingsError> {
        let settings = self.repository.load_user_settings().await?;
        let row_count = self.workspace.load(settings).await?;
        info!(rows = row_count, "Notification settings loaded");
        Ok(row_count)
    }

    /// Fetches the allow list. Returns whether it was installed.
    pub async fn load_allowed_methods(&self) -> bool {
        match self.methods.available_delivery_methods().await {
            Ok(methods) => {
                info!(count = methods.len(), "Delivery method allow list loaded");
                self.workspace.set_allowed_methods(methods).await;
                true
            }
            Err(e) => {
                warn!(error = %e, "Delivery method allow list unavailable");
                false
            }
        }
    }
}
