//! Runs the HTTP service.

use std::sync::Arc;

use clap::Parser;
use thiserror::Error;

use crate::{
    config::AppConfig,
    http_server::{self, ServerError},
};

/// Errors that stop the `serve` command.
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    /// The server failed.
    #[error("Server error: {0}")]
    Server(#[from] ServerError),
}

/// Arguments of the `serve` command.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Directory holding `app.yaml`.
    #[arg(long)]
    pub config_dir: Option<String>,
}

/// Loads the configuration and serves until a shutdown signal arrives.
pub async fn execute(args: ServeArgs) -> Result<(), Error> {
    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(args.config_dir.as_deref())?;
    tracing::info!(
        listen_address = %config.server.listen_address,
        execution_timeout = ?config.sandbox.execution_timeout,
        max_heap_size = ?config.sandbox.max_heap_size,
        "Configuration loaded."
    );

    http_server::run_server_from_config(Arc::new(config)).await?;
    Ok(())
}
