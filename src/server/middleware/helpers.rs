//! Helper functions for middleware

use actix_web::http::header::HeaderMap;

/// Extract the bearer token from the Authorization header, if present
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

/// Check if a route is public (doesn't require authentication)
pub fn is_public_route(path: &str) -> bool {
    const PUBLIC_ROUTES: &[&str] = &["/health", "/api/auth/login", "/api/auth/register"];

    PUBLIC_ROUTES.iter().any(|&route| path == route)
}
