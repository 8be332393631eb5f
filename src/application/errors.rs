//! Application-level error type for the settings workflows.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::preferences::{DeliveryMethod, PreferenceError};
use crate::ports::StoreError;

/// Errors surfaced by the settings workspace and its handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("A settings request is already in progress")]
    SaveInProgress,

    #[error("Delivery method allow list has not loaded yet")]
    AllowListPending,

    #[error("Delivery method {0} is disabled on this platform")]
    MethodNotAllowed(DeliveryMethod),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl SettingsError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SettingsError::InvalidState(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SettingsError::Preference(err) => err.code(),
            SettingsError::Store(err) => err.code(),
            SettingsError::SaveInProgress => ErrorCode::SaveInProgress,
            SettingsError::AllowListPending => ErrorCode::AllowListPending,
            SettingsError::MethodNotAllowed(_) => ErrorCode::Forbidden,
            SettingsError::InvalidState(_) => ErrorCode::InvalidStateTransition,
        }
    }
}

impl From<ValidationError> for SettingsError {
    fn from(err: ValidationError) -> Self {
        SettingsError::InvalidState(err.to_string())
    }
}
