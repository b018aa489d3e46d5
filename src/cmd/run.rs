//! Evaluates one script against one input from the command line.

use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::{Value, json};
use thiserror::Error;
use tokio::io::AsyncReadExt;

use crate::{
    config::{AppConfig, SandboxConfig},
    sandbox::{Sandbox, TransformError},
};

/// Errors that stop the `run` command.
#[derive(Error, Debug)]
pub enum Error {
    /// Reading the script or the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    /// The input is not JSON, or the report could not be written.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// The transformation failed. Already reported on stdout.
    #[error("Transformation failed: {0}")]
    Transform(#[from] TransformError),
}

/// Arguments of the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the transformation script.
    #[arg(short, long)]
    pub script: PathBuf,
    /// Path to the JSON input. Standard input is read when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Directory holding `app.yaml`. The sandbox runs without a budget when
    /// omitted.
    #[arg(long)]
    pub config_dir: Option<String>,
}

/// Runs the transformation and prints its report to stdout.
///
/// Fails with [`Error::Transform`] when the script did, so the process exits
/// non-zero after the report has been printed.
pub async fn execute(args: RunArgs) -> Result<(), Error> {
    let sandbox_config = match args.config_dir.as_deref() {
        Some(dir) => AppConfig::new(Some(dir))?.sandbox,
        None => SandboxConfig::default(),
    };

    let script = tokio::fs::read_to_string(&args.script).await?;
    let input = read_input(args.input.as_deref()).await?;

    tracing::debug!(script = %args.script.display(), "Evaluating script...");
    let outcome =
        Sandbox::from_config(sandbox_config).transform_blocking(script, input).await;

    println!("{}", serde_json::to_string_pretty(&report(&outcome))?);
    outcome.map(|_| ()).map_err(Error::from)
}

async fn read_input(path: Option<&Path>) -> Result<Value, Error> {
    let text = match path {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };
    Ok(serde_json::from_str(&text)?)
}

/// Builds the JSON report printed for a transformation outcome.
pub fn report(outcome: &Result<Option<String>, TransformError>) -> Value {
    match outcome {
        Ok(result) => json!({ "result": result }),
        Err(err) => json!({ "error": { "kind": err.kind(), "message": err.message() } }),
    }
}
