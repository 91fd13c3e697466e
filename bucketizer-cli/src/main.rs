//! Bucketizer - Main entry point

use anyhow::Result;
use bucketizer_cli::{CliConfig, Pipeline};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing on stderr, stdout carries members
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration from environment
    let config = CliConfig::from_env()?;
    let mut pipeline = Pipeline::new(config)?;

    let shutdown = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    pipeline
        .run(tokio::io::stdin(), tokio::io::stdout(), shutdown)
        .await
}
