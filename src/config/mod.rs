//! Configuration management for MessHub
//!
//! Configuration is loaded once at startup, validated eagerly, and shared
//! read-only from then on. A missing or known-insecure token secret is a
//! fatal configuration error, not a runtime-recoverable one.

pub mod models;

pub use models::{AuthConfig, CorsConfig, ScopeConfig, ServerConfig};

use crate::utils::error::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for MessHub
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication and authorization configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// `SESSION_SECRET` in the environment overrides the file's secret.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| HubError::config(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_yaml::from_str(&content)
            .map_err(|e| HubError::config(format!("Failed to parse config: {}", e)))?;

        if let Ok(secret) = std::env::var("SESSION_SECRET") {
            config.auth.jwt_secret = secret;
        }

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// `SESSION_SECRET` is required; `MESSHUB_HOST` and `MESSHUB_PORT`
    /// override the server defaults.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let jwt_secret = std::env::var("SESSION_SECRET").map_err(|_| {
            HubError::config("SESSION_SECRET environment variable must be set to a secure value")
        })?;

        let mut config = Config {
            auth: AuthConfig {
                jwt_secret,
                ..AuthConfig::default()
            },
            ..Config::default()
        };

        if let Ok(host) = std::env::var("MESSHUB_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("MESSHUB_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| HubError::config(format!("Invalid MESSHUB_PORT: {}", port)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| HubError::config(format!("Server config error: {}", e)))?;

        self.auth
            .validate()
            .map_err(|e| HubError::config(format!("Auth config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }
}
