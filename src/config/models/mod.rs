//! Configuration models

mod auth;
mod server;

pub use auth::{AuthConfig, ScopeConfig};
pub use server::{CorsConfig, ServerConfig};
