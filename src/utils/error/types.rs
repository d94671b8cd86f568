//! Error types for MessHub

use thiserror::Error;

/// Result type alias for MessHub
pub type Result<T> = std::result::Result<T, HubError>;

/// Main error type for MessHub
#[derive(Error, Debug)]
pub enum HubError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing, invalid, or expired credential; also covers tokens that
    /// reference a user that no longer exists
    #[error("Authentication required")]
    Unauthenticated,

    /// Wrong email or password at login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Actor has no role assigned
    #[error("No role assigned")]
    NoRole,

    /// Actor references a role that does not exist
    #[error("Invalid role")]
    InvalidRole,

    /// Actor's role does not grant the required permission
    #[error("Permission denied: {0} required")]
    MissingPermission(String),

    /// Resource belongs to a different entity than the actor
    #[error("Access denied")]
    EntityMismatch,

    /// Target user is a super admin and the actor is not
    #[error("Cannot modify Super Admin")]
    SuperAdminProtected,

    /// Meal price edit attempted outside the mutability window
    #[error("Cannot edit meal prices more than 6 hours after last update")]
    EditWindowExpired {
        /// Milliseconds left in the window; always zero once expired
        remaining_ms: i64,
    },

    /// A guard failed internally (e.g. storage error during a lookup);
    /// always maps to a deny, never a pass-through
    #[error("Authorization check failed: {0}")]
    CheckFailure(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),

    /// JWT errors (token issuance; verification failures never surface here)
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Password hashing errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HubError {
    /// Stable machine-readable code for the error taxonomy
    pub fn code(&self) -> &'static str {
        match self {
            HubError::Config(_) => "CONFIG_ERROR",
            HubError::Unauthenticated => "UNAUTHENTICATED",
            HubError::InvalidCredentials => "INVALID_CREDENTIALS",
            HubError::NoRole => "FORBIDDEN_NO_ROLE",
            HubError::InvalidRole => "FORBIDDEN_INVALID_ROLE",
            HubError::MissingPermission(_) => "FORBIDDEN_MISSING_PERMISSION",
            HubError::EntityMismatch => "FORBIDDEN_ENTITY_MISMATCH",
            HubError::SuperAdminProtected => "FORBIDDEN_SUPER_ADMIN_PROTECTED",
            HubError::EditWindowExpired { .. } => "EDIT_WINDOW_EXPIRED",
            HubError::CheckFailure(_) => "INTERNAL_CHECK_FAILURE",
            HubError::Validation(_) => "VALIDATION_ERROR",
            HubError::NotFound(_) => "NOT_FOUND",
            HubError::Conflict(_) => "CONFLICT",
            HubError::BadRequest(_) => "BAD_REQUEST",
            HubError::Internal(_) => "INTERNAL_ERROR",
            HubError::Jwt(_) => "TOKEN_ERROR",
            HubError::Crypto(_) => "CRYPTO_ERROR",
            HubError::Serialization(_) => "SERIALIZATION_ERROR",
            HubError::Io(_) => "IO_ERROR",
        }
    }
}
