//! HTTP adapter
//!
//! Exposes the scan engine over a small JSON API built on axum.

pub mod routes;

pub use routes::{router, AppState, DetectRequest};

use crate::anonymization::ScanEngine;
use crate::config::ServerConfig;
use crate::domain::{PiiGuardError, Result};
use std::sync::Arc;
use tokio::sync::watch;

/// Run the HTTP server until `shutdown` flips to `true`
///
/// # Errors
///
/// Returns an error if the bind address is invalid or cannot be bound, or if
/// the server fails while running.
pub async fn serve(
    config: &ServerConfig,
    engine: Arc<ScanEngine>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let addr = config.socket_addr().map_err(PiiGuardError::Configuration)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| PiiGuardError::Server(format!("Failed to bind {addr}: {e}")))?;

    let local_addr = listener.local_addr()?;
    tracing::info!(
        address = %local_addr,
        request_timeout_ms = config.request_timeout_ms,
        max_body_bytes = config.max_body_bytes,
        "PII detection server listening"
    );

    let app = router(
        AppState::new(engine, config.request_timeout()),
        config.max_body_bytes,
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            tracing::info!("Shutting down PII detection server");
        })
        .await
        .map_err(|e| PiiGuardError::Server(e.to_string()))?;

    Ok(())
}
