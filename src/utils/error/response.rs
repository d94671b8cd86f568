//! HTTP response handling for errors

use super::types::HubError;
use actix_web::{HttpResponse, ResponseError, http::StatusCode};

impl ResponseError for HubError {
    fn status_code(&self) -> StatusCode {
        match self {
            HubError::Unauthenticated | HubError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            HubError::NoRole
            | HubError::InvalidRole
            | HubError::MissingPermission(_)
            | HubError::EntityMismatch
            | HubError::SuperAdminProtected
            | HubError::EditWindowExpired { .. } => StatusCode::FORBIDDEN,
            HubError::Validation(_) | HubError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HubError::NotFound(_) => StatusCode::NOT_FOUND,
            HubError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Internal failures must not leak their cause to the client
            HubError::CheckFailure(_) => "Authorization check failed".to_string(),
            HubError::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        let details = match self {
            HubError::EditWindowExpired { remaining_ms } => {
                Some(serde_json::json!({ "remaining_ms": remaining_ms }))
            }
            _ => None,
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code().to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                details,
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
