//! Helper functions for creating specific error types

use super::types::HubError;

impl HubError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn missing_permission<S: Into<String>>(permission: S) -> Self {
        Self::MissingPermission(permission.into())
    }

    pub fn check_failure<S: Into<String>>(message: S) -> Self {
        Self::CheckFailure(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    pub fn edit_window_expired() -> Self {
        Self::EditWindowExpired { remaining_ms: 0 }
    }
}
