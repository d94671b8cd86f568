//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::storage::DynStore;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are cheap to clone and shared read-only across workers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication and authorization system
    pub auth: Arc<AuthSystem>,
    /// Storage backend
    pub store: DynStore,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, auth: AuthSystem, store: DynStore) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
            store,
        }
    }
}
