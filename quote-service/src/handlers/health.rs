use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "quote-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe; verifies the AI provider is reachable.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.engine.provider_ready().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// Prometheus text exposition.
pub async fn metrics() -> impl IntoResponse {
    crate::services::metrics::get_metrics()
}
