use crate::dtos::GenerateQuoteRequest;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;
use std::time::Instant;
use validator::Validate;

pub async fn generate_quote(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let started = Instant::now();
    let result = state.engine.suggest_quote(&payload).await;
    record(&payload.tenant_id, "generate-quote", &result, started);

    result.map(Json)
}

pub async fn suggest_upsells(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let started = Instant::now();
    let result = state.engine.suggest_upsells(&payload).await;
    record(&payload.tenant_id, "suggest-upsells", &result, started);

    result.map(Json)
}

pub async fn explain_quote(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let started = Instant::now();
    let result = state.engine.explain_quote(&payload).await;
    record(&payload.tenant_id, "explain-quote", &result, started);

    result.map(Json)
}

pub async fn optimize_pricing(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let started = Instant::now();
    let result = state.engine.optimize_pricing(&payload).await;
    record(&payload.tenant_id, "optimize-pricing", &result, started);

    result.map(Json)
}

fn record<T>(tenant_id: &str, endpoint: &str, result: &Result<T, AppError>, started: Instant) {
    let outcome = if result.is_ok() { "ok" } else { "error" };
    metrics::record_quote_request(tenant_id, endpoint, outcome, started.elapsed().as_secs_f64());
}
