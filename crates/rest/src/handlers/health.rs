//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use atlas_persistence::core::ProductStorage;
use tracing::{debug, warn};

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` - `{ "status": "healthy", "backend": ..., "timestamp": ... }`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: ProductStorage + Send + Sync,
{
    debug!("Processing health check request");

    let backend_name = state.storage().backend_name();

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": backend_name,
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for a liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for a readiness probe.
///
/// Pings the database; an unreachable database yields 503.
///
/// # HTTP Request
///
/// `GET [base]/readiness`
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: ProductStorage + Send + Sync,
{
    debug!("Processing readiness check request");

    let backend_name = state.storage().backend_name();

    match state.storage().health_check().await {
        Ok(()) => {
            let response = serde_json::json!({
                "status": "ready",
                "backend": backend_name,
                "checks": {
                    "storage": "ok"
                }
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!(backend = backend_name, error = %e, "Readiness check failed");
            let response = serde_json::json!({
                "status": "unavailable",
                "backend": backend_name,
                "checks": {
                    "storage": e.to_string()
                }
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
        }
    }
}
