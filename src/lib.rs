//! # MessHub
//!
//! Multi-tenant mess management backend with role-based access control for
//! hostels and corporate offices.
//!
//! The interesting part is the authorization core in [`auth`]:
//!
//! - **Credentials**: signed, expiring bearer tokens bound to a user id
//! - **Identity**: a verified token resolves to a user and their role
//!   exactly once per request, producing an [`auth::AuthContext`]
//! - **Permissions**: super-admin override or role-based grants from a
//!   closed vocabulary, checked as per-route gates
//! - **Entity scoping**: tenant isolation on `(entity_type, entity_id)`,
//!   with silent narrowing on reads and explicit denial on writes
//! - **Edit window**: meal prices stay mutable for a rolling 6-hour window
//!   after their last change, derived lazily from timestamps
//!
//! Everything else is the CRUD surface those guards compose in front of,
//! backed by the [`storage::Store`] trait.
//!
//! ```rust,no_run
//! use messhub::config::Config;
//! use messhub::server::HttpServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let server = HttpServer::new(&config)?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{HubError, Result};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
