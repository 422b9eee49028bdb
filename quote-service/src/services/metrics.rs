//! Prometheus metrics for quote-service.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::OnceLock;

// Global registry
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

// HTTP metrics
pub static QUOTE_REQUESTS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static QUOTE_REQUEST_DURATION_SECONDS: OnceLock<HistogramVec> = OnceLock::new();

// AI-specific metrics
pub static AI_TOKENS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();
pub static AI_PROVIDER_LATENCY_SECONDS: OnceLock<HistogramVec> = OnceLock::new();
pub static AI_PROVIDER_ERRORS_TOTAL: OnceLock<IntCounterVec> = OnceLock::new();

/// Initialize all metrics. Safe to call more than once; only the first
/// call wins the registry.
pub fn init_metrics() {
    if REGISTRY.get().is_some() {
        return;
    }

    let registry = Registry::new();

    let quote_requests = IntCounterVec::new(
        Opts::new("quote_requests_total", "Total quote API requests"),
        &["tenant_id", "endpoint", "outcome"],
    )
    .expect("Failed to create quote_requests_total metric");

    let request_duration = HistogramVec::new(
        HistogramOpts::new(
            "quote_request_duration_seconds",
            "Quote API request duration in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["endpoint"],
    )
    .expect("Failed to create quote_request_duration_seconds metric");

    // Token counter (input/output by model and tenant for billing)
    let ai_tokens = IntCounterVec::new(
        Opts::new("ai_tokens_total", "Total tokens processed"),
        &["tenant_id", "model", "type"], // type: input, output
    )
    .expect("Failed to create ai_tokens_total metric");

    let provider_latency = HistogramVec::new(
        HistogramOpts::new(
            "ai_provider_latency_seconds",
            "AI provider API latency in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["provider", "model"],
    )
    .expect("Failed to create ai_provider_latency_seconds metric");

    let provider_errors = IntCounterVec::new(
        Opts::new("ai_provider_errors_total", "Total AI provider errors"),
        &["provider", "error_type"],
    )
    .expect("Failed to create ai_provider_errors_total metric");

    registry
        .register(Box::new(quote_requests.clone()))
        .expect("Failed to register quote_requests_total");
    registry
        .register(Box::new(request_duration.clone()))
        .expect("Failed to register quote_request_duration_seconds");
    registry
        .register(Box::new(ai_tokens.clone()))
        .expect("Failed to register ai_tokens_total");
    registry
        .register(Box::new(provider_latency.clone()))
        .expect("Failed to register ai_provider_latency_seconds");
    registry
        .register(Box::new(provider_errors.clone()))
        .expect("Failed to register ai_provider_errors_total");

    let _ = REGISTRY.set(registry);
    let _ = QUOTE_REQUESTS_TOTAL.set(quote_requests);
    let _ = QUOTE_REQUEST_DURATION_SECONDS.set(request_duration);
    let _ = AI_TOKENS_TOTAL.set(ai_tokens);
    let _ = AI_PROVIDER_LATENCY_SECONDS.set(provider_latency);
    let _ = AI_PROVIDER_ERRORS_TOTAL.set(provider_errors);

    tracing::info!("Prometheus metrics initialized");
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();

    let registry = match REGISTRY.get() {
        Some(r) => r,
        None => {
            tracing::error!("Metrics registry not initialized");
            return "# Metrics registry not initialized\n".to_string();
        }
    };

    let metric_families = registry.gather();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return format!("# Failed to encode metrics: {}\n", e);
    }

    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Failed to convert metrics to UTF-8");
            format!("# Failed to convert metrics to UTF-8: {}\n", e)
        }
    }
}

// Helper functions for recording metrics

/// Record a completed quote API request.
pub fn record_quote_request(tenant_id: &str, endpoint: &str, outcome: &str, duration_secs: f64) {
    if let Some(counter) = QUOTE_REQUESTS_TOTAL.get() {
        counter
            .with_label_values(&[tenant_id, endpoint, outcome])
            .inc();
    }
    if let Some(histogram) = QUOTE_REQUEST_DURATION_SECONDS.get() {
        histogram
            .with_label_values(&[endpoint])
            .observe(duration_secs);
    }
}

/// Record token usage with tenant_id for billing.
pub fn record_tokens(tenant_id: &str, model: &str, input_tokens: i32, output_tokens: i32) {
    if let Some(counter) = AI_TOKENS_TOTAL.get() {
        counter
            .with_label_values(&[tenant_id, model, "input"])
            .inc_by(input_tokens.max(0) as u64);
        counter
            .with_label_values(&[tenant_id, model, "output"])
            .inc_by(output_tokens.max(0) as u64);
    }
}

/// Record provider latency.
pub fn record_provider_latency(provider: &str, model: &str, duration_secs: f64) {
    if let Some(histogram) = AI_PROVIDER_LATENCY_SECONDS.get() {
        histogram
            .with_label_values(&[provider, model])
            .observe(duration_secs);
    }
}

/// Record a provider error.
pub fn record_provider_error(provider: &str, error_type: &str) {
    if let Some(counter) = AI_PROVIDER_ERRORS_TOTAL.get() {
        counter.with_label_values(&[provider, error_type]).inc();
    }
}
