//! Server startup: configuration loading and run loop

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use std::path::PathBuf;
use tracing::info;

/// Run the server.
///
/// With a config path, configuration comes from that YAML file (the
/// `SESSION_SECRET` environment variable still overrides the secret);
/// otherwise everything comes from the environment, and a missing
/// `SESSION_SECRET` is fatal.
pub async fn run_server(config_path: Option<PathBuf>) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    let server = HttpServer::new(&config)?;
    info!(
        "MessHub starting at http://{}:{}",
        config.server.host, config.server.port
    );

    server.start().await
}
