//! HTTP route modules
//!
//! All route handlers return `Result<HttpResponse, HubError>`; denies from
//! the guard chain short-circuit through `?` and render via the error
//! taxonomy's `ResponseError` impl.

pub mod auth;
pub mod entities;
pub mod feedback;
pub mod health;
pub mod meal_prices;
pub mod meals;
pub mod members;
pub mod payments;
pub mod roles;
pub mod users;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}
