//! SaveSettingsHandler - persists the preference matrix and re-hydrates it
//! from the store's authoritative answer.

use std::sync::Arc;
use tracing::{info, warn};

use crate::application::{SettingsError, SettingsWorkspace};
use crate::domain::foundation::Timestamp;
use crate::domain::preferences::NotificationUserSettings;
use crate::ports::NotificationSettingsRepository;

/// Result of a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveSettingsResult {
    /// Settings as accepted by the store.
    pub settings: NotificationUserSettings,
    pub row_count: usize,
    pub saved_at: Timestamp,
}

/// Handler for saving notification settings.
pub struct SaveSettingsHandler {
    workspace: Arc<SettingsWorkspace>,
    repository: Arc<dyn NotificationSettingsRepository>,
    defer_until_allow_list: bool,
}

impl SaveSettingsHandler {
    pub fn new(
        workspace: Arc<SettingsWorkspace>,
        repository: Arc<dyn NotificationSettingsRepository>,
    ) -> Self {
        Self {
            workspace,
            repository,
            defer_until_allow_list: false,
        }
    }

    /// Refuse to save until the delivery method allow list has loaded.
    pub fn with_allow_list_deferral(mut self, defer: bool) -> Self {
        self.defer_until_allow_list = defer;
        self
    }

    /// Saves the current matrix.
    ///
    /// # Errors
    ///
    /// - `SaveInProgress` if another save or reset is talking to the store.
    /// - `Store` if the store fails; the matrix keeps its unsaved edits.
    /// - `Preference` if the matrix cannot be encoded or the answer decoded.
    pub async fn handle(&self) -> Result<SaveSettingsResult, SettingsError> {
        let _request = self.workspace.begin_request()?;
        self.persist().await
    }

    /// Encode, submit and re-hydrate. The caller holds the request slot.
    pub(crate) async fn persist(&self) -> Result<SaveSettingsResult, SettingsError> {
        if self.defer_until_allow_list && self.workspace.allowed_methods().await.is_none() {
            return Err(SettingsError::AllowListPending);
        }

        // 1. Encode
        let request = {
            let matrix = self.workspace.matrix().read().await;
            self.workspace.codec().encode_settings(matrix.rows())?
        };
        let sent_rows = request.prefs.as_ref().map_or(0, |prefs| prefs.len());
        info!(rows = sent_rows, "Saving notification settings");

        // 2. Submit
        let accepted = self
            .repository
            .save_user_settings(&request)
            .await
            .map_err(|e| {
                warn!(error = %e, "Notification settings save failed; keeping unsaved edits");
                e
            })?;

        // 3. Re-hydrate from what the store accepted
        let rows = self.workspace.codec().decode_settings(&accepted)?;
        let row_count = rows.len();
        {
            let mut matrix = self.workspace.matrix().write().await;
            matrix.replace_all(rows)?;
            matrix.mark_pristine();
        }

        let saved_at = Timestamp::now();
        self.workspace.record_save(saved_at).await;
        info!(rows = row_count, "Notification settings saved");

        Ok(SaveSettingsResult {
            settings: accepted,
            row_count,
            saved_at,
        })
    }
}
