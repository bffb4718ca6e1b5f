use axum::{extract::State, response::IntoResponse, Json};
use serde_json::{json, Value};
use service_core::error::AppError;

use crate::startup::AppState;

/// Liveness check.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "recipe-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness check: the text provider must be reachable.
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    state
        .generator
        .provider()
        .health_check()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Text provider is not ready");
            AppError::ServiceUnavailable("Text generation provider unavailable".to_string())
        })?;

    Ok(Json(json!({ "status": "ready" })))
}
