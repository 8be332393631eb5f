//! Preference-specific error types.

use thiserror::Error;

use super::DeliveryMethod;
use crate::domain::foundation::ErrorCode;

/// Errors raised by the codec and the preference matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    #[error("Malformed settings for '{name}': {reason}")]
    MalformedSettings { name: String, reason: String },

    #[error("Duplicate notification type '{0}'")]
    DuplicateName(String),

    #[error("Unknown notification type '{0}'")]
    UnknownRow(String),

    #[error("Delivery method {0} is not editable")]
    UnsupportedMethod(DeliveryMethod),

    #[error("Failed to serialize settings: {0}")]
    Serialization(String),
}

impl PreferenceError {
    pub fn malformed(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PreferenceError::MalformedSettings {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            PreferenceError::MalformedSettings { .. } => ErrorCode::MalformedSettings,
            PreferenceError::DuplicateName(_) => ErrorCode::DuplicateName,
            PreferenceError::UnknownRow(_) => ErrorCode::PreferenceNotFound,
            PreferenceError::UnsupportedMethod(_) => ErrorCode::UnsupportedMethod,
            PreferenceError::Serialization(_) => ErrorCode::InternalError,
        }
    }
}
