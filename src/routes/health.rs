use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::SystemTime;

/// Global server start time for uptime calculation
static SERVER_START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Health check endpoint (liveness)
/// Returns 200 if server is running
pub async fn health_check() -> impl IntoResponse {
    let uptime = SERVER_START_TIME
        .elapsed()
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(json!({
        "status": "healthy",
        "service": "intake-relay",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime,
    }))
}

/// Readiness check endpoint
///
/// Ready means the board credential is configured; without it every
/// submission would fail before reaching the platform.
pub async fn readiness_check(
    State(state): State<Arc<ServerState>>,
) -> ServerResult<impl IntoResponse> {
    let credential = if state.config.monday.credential().is_some() {
        "configured"
    } else {
        "missing"
    };

    Ok(Json(json!({
        "status": "ready",
        "service": "intake-relay",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "components": {
            "api": "ready",
            "board_credential": credential,
        }
    })))
}
