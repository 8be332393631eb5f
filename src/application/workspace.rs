//! SettingsWorkspace - shared editing state for one user's notification settings.
//!
//! Holds the editable matrix, the settings exactly as first loaded from the
//! store (the reset source), the platform allow list and the guard that keeps
//! at most one store request in flight.
//!
//! User edits are refused with `SaveInProgress` while a save or reset is
//! talking to the store.
//!
//! The allow list loads independently of the settings. Until it resolves,
//! every catalog method may be toggled and saves are not held back (unless
//! the save handler is configured to defer).

use tokio::sync::{Mutex, MutexGuard, RwLock};

use super::SettingsError;
use crate::domain::foundation::Timestamp;
use crate::domain::preferences::{
    CheckState, Column, DeliveryMethod, DeliveryMethodCatalog, NotificationUserSettings,
    PreferenceError, PreferenceMatrix, PreferenceRow, SettingsCodec,
};

pub struct SettingsWorkspace {
    codec: SettingsCodec,
    matrix: RwLock<PreferenceMatrix>,
    original: RwLock<NotificationUserSettings>,
    allowed: RwLock<Option<Vec<DeliveryMethod>>>,
    last_saved_at: RwLock<Option<Timestamp>>,
    in_flight: Mutex<()>,
}

impl SettingsWorkspace {
    pub fn new(catalog: DeliveryMethodCatalog) -> Self {
        Self {
            codec: SettingsCodec::new(catalog.clone()),
            matrix: RwLock::new(PreferenceMatrix::new(catalog)),
            original: RwLock::new(NotificationUserSettings::default()),
            allowed: RwLock::new(None),
            last_saved_at: RwLock::new(None),
            in_flight: Mutex::new(()),
        }
    }

    pub fn codec(&self) -> &SettingsCodec {
        &self.codec
    }

    /// Installs freshly loaded settings as both the reset source and the
    /// editable matrix. Returns the number of rows.
    pub async fn load(&self, settings: NotificationUserSettings) -> Result<usize, PreferenceError> {
        let rows = self.codec.decode_settings(&settings)?;
        let count = rows.len();
        {
            let mut matrix = self.matrix.write().await;
            matrix.replace_all(rows)?;
            matrix.mark_pristine();
        }
        *self.original.write().await = settings;
        Ok(count)
    }

    /// Settings as first loaded, untouched by edits and saves.
    pub async fn original(&self) -> NotificationUserSettings {
        self.original.read().await.clone()
    }

    pub async fn set_allowed_methods(&self, methods: Vec<DeliveryMethod>) {
        *self.allowed.write().await = Some(methods);
    }

    /// `None` while the allow list has not been fetched.
    pub async fn allowed_methods(&self) -> Option<Vec<DeliveryMethod>> {
        self.allowed.read().await.clone()
    }

    /// Every method counts as allowed until the allow list resolves.
    pub async fn is_method_allowed(&self, method: DeliveryMethod) -> bool {
        match self.allowed.read().await.as_ref() {
            Some(methods) => methods.contains(&method),
            None => true,
        }
    }

    pub async fn rows(&self) -> Vec<PreferenceRow> {
        self.matrix.read().await.rows().to_vec()
    }

    pub async fn check_state(&self, column: Column) -> CheckState {
        self.matrix.read().await.check_state(column)
    }

    pub async fn is_fully_checked(&self, column: Column) -> bool {
        self.matrix.read().await.is_fully_checked(column)
    }

    pub async fn has_any_checked(&self) -> bool {
        self.matrix.read().await.has_any_checked()
    }

    pub async fn is_indeterminate(&self, column: Column) -> bool {
        self.matrix.read().await.is_indeterminate(column)
    }

    /// True when there are edits the store has not accepted yet.
    pub async fn has_unsaved_changes(&self) -> bool {
        self.matrix.read().await.is_dirty()
    }

    pub async fn last_saved_at(&self) -> Option<Timestamp> {
        *self.last_saved_at.read().await
    }

    pub async fn set_row_enabled(&self, name: &str, value: bool) -> Result<(), SettingsError> {
        self.edit(|matrix| matrix.set_row_enabled(name, value)).await
    }

    pub async fn set_cell_enabled(
        &self,
        name: &str,
        method: DeliveryMethod,
        value: bool,
    ) -> Result<(), SettingsError> {
        self.ensure_allowed(method).await?;
        self.edit(|matrix| matrix.set_cell_enabled(name, method, value)).await
    }

    /// "Select all" for a column.
    pub async fn set_column_enabled(&self, column: Column, value: bool) -> Result<(), SettingsError> {
        if let Column::Method(method) = column {
            self.ensure_allowed(method).await?;
        }
        self.edit(|matrix| matrix.set_column_enabled(column, value)).await
    }

    pub(crate) fn matrix(&self) -> &RwLock<PreferenceMatrix> {
        &self.matrix
    }

    pub(crate) async fn record_save(&self, at: Timestamp) {
        *self.last_saved_at.write().await = Some(at);
    }

    /// Claims the single store-request slot.
    pub(crate) fn begin_request(&self) -> Result<MutexGuard<'_, ()>, SettingsError> {
        self.in_flight
            .try_lock()
            .map_err(|_| SettingsError::SaveInProgress)
    }

    /// Applies a user edit. Refused while a store request is in flight: the
    /// store's answer replaces the matrix when that request ends.
    async fn edit<F>(&self, apply: F) -> Result<(), SettingsError>
    where
        F: FnOnce(&mut PreferenceMatrix) -> Result<(), PreferenceError>,
    {
        let mut matrix = self.matrix.write().await;
        if self.in_flight.try_lock().is_err() {
            return Err(SettingsError::SaveInProgress);
        }
        apply(&mut matrix)?;
        Ok(())
    }

    async fn ensure_allowed(&self, method: DeliveryMethod) -> Result<(), SettingsError> {
        if self.is_method_allowed(method).await {
            Ok(())
        } else {
            Err(SettingsError::MethodNotAllowed(method))
        }
    }
}

impl Default for SettingsWorkspace {
    fn default() -> Self {
        Self::new(DeliveryMethodCatalog::standard().clone())
    }
}
