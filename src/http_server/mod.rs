//! HTTP server module

mod error;
mod identity;
mod transform;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    response::IntoResponse,
    routing::{get, post},
};
pub use error::ApiError;
use serde_json::json;
use thiserror::Error;
use tokio::signal;

use crate::{config::AppConfig, identity::IdentityService, sandbox::Sandbox};

/// Errors that prevent the HTTP server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured listen address could not be parsed.
    #[error("Invalid server.listen_address '{address}': {source}")]
    InvalidAddress {
        /// The address as configured.
        address: String,
        /// The underlying parse error.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Binding or serving failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct ApiState {
    /// Evaluates caller-supplied transformation scripts.
    pub sandbox: Sandbox,

    /// Derives document identities, when a factory is configured.
    pub identity: Option<IdentityService>,
}

impl ApiState {
    /// Builds the handler state from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let sandbox = Sandbox::from_config(config.sandbox.clone());
        let identity = config
            .identity_factory
            .clone()
            .map(|factory| IdentityService::new(sandbox.clone(), factory));
        Self { sandbox, identity }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Builds the application router.
pub fn router(state: ApiState, max_payload_size: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/transform", post(transform::transform))
        .route("/api/identity", post(identity::identity))
        .layer(DefaultBodyLimit::max(max_payload_size))
        .with_state(state)
}

/// Runs the HTTP server based on the provided application configuration.
///
/// Returns once a shutdown signal has been received and in-flight requests
/// have completed.
pub async fn run_server_from_config(config: Arc<AppConfig>) -> Result<(), ServerError> {
    let address = &config.server.listen_address;
    let addr: SocketAddr = address
        .parse()
        .map_err(|source| ServerError::InvalidAddress { address: address.clone(), source })?;

    let app = router(ApiState::from_config(&config), config.server.max_payload_size);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "HTTP server listening.");

    axum::serve(listener, app.into_make_service()).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("HTTP server stopped.");
    Ok(())
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C.");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to listen for SIGTERM."),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received, shutting down."),
        _ = terminate => tracing::info!("SIGTERM received, shutting down."),
    }
}
