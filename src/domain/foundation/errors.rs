//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    MalformedSettings,
    DuplicateName,
    UnsupportedMethod,

    // Not found errors
    PreferenceNotFound,

    // State errors
    InvalidStateTransition,
    SaveInProgress,
    AllowListPending,

    // Authorization errors
    Forbidden,

    // Infrastructure errors
    StoreUnavailable,
    StoreRejected,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::MalformedSettings => "MALFORMED_SETTINGS",
            ErrorCode::DuplicateName => "DUPLICATE_NAME",
            ErrorCode::UnsupportedMethod => "UNSUPPORTED_METHOD",
            ErrorCode::PreferenceNotFound => "PREFERENCE_NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::SaveInProgress => "SAVE_IN_PROGRESS",
            ErrorCode::AllowListPending => "ALLOW_LIST_PENDING",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::StoreRejected => "STORE_REJECTED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
