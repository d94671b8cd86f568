//! HTTP middleware implementations
//!
//! - Authentication: verifies the bearer credential and attaches the
//!   request-scoped authorization context
//! - Request ID tracking

mod auth;
mod helpers;
mod request_id;

pub use auth::{AuthMiddleware, AuthMiddlewareService};
pub use helpers::{extract_bearer_token, is_public_route};
pub use request_id::{RequestIdMiddleware, RequestIdMiddlewareService};
