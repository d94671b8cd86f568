//! MessHub - multi-tenant mess management backend

use clap::Parser;
use messhub::server::builder::run_server;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "messhub", version, about)]
struct Args {
    /// Path to a YAML configuration file; environment-only when omitted
    #[arg(long, env = "MESSHUB_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    match run_server(args.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
