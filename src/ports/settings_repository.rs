//! Settings Repository Port - loading and persisting a user's notification settings.

use async_trait::async_trait;

use crate::domain::foundation::ErrorCode;
use crate::domain::preferences::NotificationUserSettings;

/// Errors reported by settings store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Settings store unreachable: {0}")]
    Transport(String),

    #[error("Settings store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Settings store returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::Transport(_) => ErrorCode::StoreUnavailable,
            StoreError::Rejected { .. } => ErrorCode::StoreRejected,
            StoreError::InvalidResponse(_) => ErrorCode::InternalError,
        }
    }
}

/// Port for the remote store holding the current user's notification settings.
#[async_trait]
pub trait NotificationSettingsRepository: Send + Sync {
    /// Load the current user's settings.
    ///
    /// # Errors
    /// Returns `StoreError` if the store cannot be reached or answers badly
    async fn load_user_settings(&self) -> Result<NotificationUserSettings, StoreError>;

    /// Persist settings and return what the store actually accepted.
    ///
    /// The returned settings are authoritative and may differ from `settings`.
    ///
    /// # Errors
    /// Returns `StoreError` on transport or validation failure
    async fn save_user_settings(
        &self,
        settings: &NotificationUserSettings,
    ) -> Result<NotificationUserSettings, StoreError>;
}
