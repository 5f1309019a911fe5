//! HTTP routes
//!
//! - `POST /api/piidetection/detect` detects and masks PII in a text
//! - `GET /health` reports liveness

use crate::anonymization::{ScanEngine, ScanResult};
use crate::domain::{PiiGuardError, Result};
use crate::log_scan_complete;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;

/// Path of the detection endpoint
pub const DETECT_PATH: &str = "/api/piidetection/detect";

/// Path of the health endpoint
pub const HEALTH_PATH: &str = "/health";

/// Body returned when the request text is missing or empty
pub const EMPTY_TEXT_MESSAGE: &str = "Text cannot be empty";

/// Body returned for any internal failure
pub const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing your request";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    engine: Arc<ScanEngine>,
    request_timeout: Duration,
}

impl AppState {
    /// Create application state around a scan engine
    pub fn new(engine: Arc<ScanEngine>, request_timeout: Duration) -> Self {
        Self {
            engine,
            request_timeout,
        }
    }

    /// Scan `text` off the async runtime, bounded by the request timeout
    ///
    /// Address recognition runs afterwards under its own time limit.
    async fn scan(&self, text: String) -> Result<ScanResult> {
        let engine = self.engine.clone();
        let task = tokio::task::spawn_blocking(move || {
            let core = engine.scan_core(&text);
            (text, core)
        });

        let (text, core) = tokio::time::timeout(self.request_timeout, task)
            .await
            .map_err(|_| {
                PiiGuardError::Server(format!(
                    "Detection timed out after {}ms",
                    self.request_timeout.as_millis()
                ))
            })?
            .map_err(|e| PiiGuardError::Server(format!("Detection task failed: {e}")))?;

        Ok(self.engine.add_address_findings(&text, core).await)
    }
}

/// Detection request body
#[derive(Debug, Default, Deserialize)]
pub struct DetectRequest {
    /// Text to scan
    #[serde(default)]
    pub text: Option<String>,
}

/// Health response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    address_recognizer: bool,
}

/// Build the application router
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route(DETECT_PATH, post(detect_handler))
        .route(HEALTH_PATH, get(health_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Detect and mask PII in the request text
///
/// Returns 400 when the text is missing or empty and 500 on any internal
/// failure. Failure details are logged, never returned.
pub async fn detect_handler(
    State(state): State<AppState>,
    Json(request): Json<DetectRequest>,
) -> Response {
    let Some(text) = request.text.filter(|text| !text.is_empty()) else {
        return (StatusCode::BAD_REQUEST, EMPTY_TEXT_MESSAGE).into_response();
    };

    let started = Instant::now();
    let text_len = text.len();

    match state.scan(text).await {
        Ok(result) => {
            log_scan_complete!("request", result.detected_entities.len(), started.elapsed());
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, text_len, "Error detecting PII in text");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE).into_response()
        }
    }
}

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        address_recognizer: state.engine.has_address_recognizer(),
    })
}
