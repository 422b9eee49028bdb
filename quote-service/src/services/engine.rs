//! Quote engine: prompt -> provider -> parse -> price.
//!
//! The model proposes line items and reasoning; all arithmetic (subtotal,
//! tax, total, margin) is computed here, never trusted from the model.

use crate::dtos::{
    ExplainQuoteResponse, GenerateQuoteRequest, OptimizedPricingResponse, QuoteResponse,
    UpsellSuggestionResponse,
};
use crate::models::QuoteLineItem;
use crate::services::metrics;
use crate::services::prompt::PromptBuilder;
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use crate::services::{CatalogStore, PricingRulesStore};
use backoff::future::retry;
use backoff::ExponentialBackoff;
use chrono::Utc;
use serde::Deserialize;
use service_core::error::AppError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Sales tax applied to every quote.
const SALES_TAX_RATE: f64 = 0.0825;

/// Assumed cost fraction of a line item's sell price, used for the
/// margin estimate.
const ESTIMATED_COST_RATIO: f64 = 0.6;

const DEFAULT_CONFIDENCE_SCORE: f64 = 0.7;

const QUOTE_SYSTEM_PROMPT: &str = "You are an expert estimator. Return only valid JSON.";
const UPSELL_SYSTEM_PROMPT: &str = "You are an expert sales engineer. Return only valid JSON.";
const EXPLAIN_SYSTEM_PROMPT: &str = "You explain quotes clearly and concisely.";
const PRICING_SYSTEM_PROMPT: &str = "You are a pricing strategist. Return only valid JSON.";

pub struct QuoteEngine {
    provider: Arc<dyn TextProvider>,
    catalog: Arc<CatalogStore>,
    pricing: Arc<PricingRulesStore>,
    model: String,
}

impl QuoteEngine {
    pub fn new(
        provider: Arc<dyn TextProvider>,
        catalog: Arc<CatalogStore>,
        pricing: Arc<PricingRulesStore>,
        model: String,
    ) -> Self {
        Self {
            provider,
            catalog,
            pricing,
            model,
        }
    }

    /// Generate a full priced quote. The provider call is retried on
    /// transient failures (rate limits, network errors).
    #[tracing::instrument(skip(self, request), fields(tenant_id = %request.tenant_id))]
    pub async fn suggest_quote(
        &self,
        request: &GenerateQuoteRequest,
    ) -> Result<QuoteResponse, AppError> {
        tracing::info!(
            project_type = %request.project_type,
            "Generating quote suggestion"
        );

        let catalog = self.catalog.relevant(&request.tenant_id, request.project_type);
        let prompt = PromptBuilder::quote_prompt(request, &catalog);
        tracing::debug!(prompt_len = prompt.len(), catalog_items = catalog.len(), "Built quote prompt");

        let params = GenerationParams {
            temperature: Some(0.3),
            max_tokens: Some(2000),
            json_output: true,
            ..Default::default()
        };

        let text = self
            .generate_with_retry(&request.tenant_id, QUOTE_SYSTEM_PROMPT, &prompt, &params)
            .await?;

        let parsed: ModelQuote = parse_model_json(&text)?;
        let response = build_quote_response(request, parsed);

        tracing::info!(
            quote_id = %response.quote_id,
            total = response.total,
            line_items = response.line_items.len(),
            "Generated quote"
        );

        Ok(response)
    }

    /// Suggest upsell items for the project.
    pub async fn suggest_upsells(
        &self,
        request: &GenerateQuoteRequest,
    ) -> Result<UpsellSuggestionResponse, AppError> {
        tracing::info!(tenant_id = %request.tenant_id, "Suggesting upsells");

        let catalog = self.catalog.relevant(&request.tenant_id, request.project_type);
        let prompt = PromptBuilder::upsell_prompt(request, &catalog);

        let params = GenerationParams {
            temperature: Some(0.4),
            max_tokens: Some(800),
            json_output: true,
            ..Default::default()
        };

        let text = self
            .generate(&request.tenant_id, UPSELL_SYSTEM_PROMPT, &prompt, &params)
            .await?;

        let parsed: ModelUpsells = parse_model_json(&text)?;

        Ok(UpsellSuggestionResponse {
            tenant_id: request.tenant_id.clone(),
            project_type: request.project_type,
            upsell_items: parsed.upsell_items,
            reasoning: parsed.reasoning,
            confidence_score: parsed.confidence_score,
        })
    }

    /// Explain the reasoning behind a quote in natural language.
    pub async fn explain_quote(
        &self,
        request: &GenerateQuoteRequest,
    ) -> Result<ExplainQuoteResponse, AppError> {
        tracing::info!(tenant_id = %request.tenant_id, "Explaining quote");

        let prompt = PromptBuilder::explain_prompt(request);

        let params = GenerationParams {
            temperature: Some(0.5),
            max_tokens: Some(1000),
            ..Default::default()
        };

        let explanation = self
            .generate(&request.tenant_id, EXPLAIN_SYSTEM_PROMPT, &prompt, &params)
            .await?;

        Ok(ExplainQuoteResponse {
            explanation,
            generated_at: Utc::now(),
        })
    }

    /// Recommend an optimized price using the tenant's pricing rules.
    pub async fn optimize_pricing(
        &self,
        request: &GenerateQuoteRequest,
    ) -> Result<OptimizedPricingResponse, AppError> {
        tracing::info!(tenant_id = %request.tenant_id, "Optimizing pricing");

        let rules = self.pricing.for_tenant(&request.tenant_id);
        let prompt = PromptBuilder::pricing_prompt(request, &rules);

        let params = GenerationParams {
            temperature: Some(0.3),
            max_tokens: Some(1200),
            json_output: true,
            ..Default::default()
        };

        let text = self
            .generate(&request.tenant_id, PRICING_SYSTEM_PROMPT, &prompt, &params)
            .await?;

        let parsed: ModelPricing = parse_model_json(&text)?;

        Ok(OptimizedPricingResponse {
            recommended_price: parsed.recommended_price,
            target_margin_percent: parsed.target_margin_percent,
            reasoning: parsed.reasoning,
            adjustments: parsed.adjustments,
            confidence_score: parsed.confidence_score,
            generated_at: Utc::now(),
        })
    }

    /// Used by the readiness probe.
    pub async fn provider_ready(&self) -> bool {
        self.provider.health_check().await.is_ok()
    }

    /// One provider call with latency/token/error accounting.
    async fn generate(
        &self,
        tenant_id: &str,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, AppError> {
        let started = Instant::now();
        let result = self.provider.generate(system, prompt, params).await;
        metrics::record_provider_latency(
            self.provider.name(),
            &self.model,
            started.elapsed().as_secs_f64(),
        );

        match result {
            Ok(response) => {
                metrics::record_tokens(
                    tenant_id,
                    &self.model,
                    response.input_tokens,
                    response.output_tokens,
                );
                non_empty_text(response.text)
            }
            Err(e) => {
                metrics::record_provider_error(self.provider.name(), error_label(&e));
                Err(e.into())
            }
        }
    }

    /// Like `generate`, retrying transient provider failures with
    /// exponential backoff.
    async fn generate_with_retry(
        &self,
        tenant_id: &str,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, AppError> {
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(Duration::from_secs(30)),
            ..Default::default()
        };

        let started = Instant::now();
        let result = retry(backoff, || async {
            self.provider
                .generate(system, prompt, params)
                .await
                .map_err(|e| match e {
                    ProviderError::RateLimited | ProviderError::NetworkError(_) => {
                        tracing::warn!(error = %e, "Transient provider error, retrying");
                        backoff::Error::transient(e)
                    }
                    other => backoff::Error::permanent(other),
                })
        })
        .await;

        metrics::record_provider_latency(
            self.provider.name(),
            &self.model,
            started.elapsed().as_secs_f64(),
        );

        match result {
            Ok(response) => {
                metrics::record_tokens(
                    tenant_id,
                    &self.model,
                    response.input_tokens,
                    response.output_tokens,
                );
                non_empty_text(response.text)
            }
            Err(e) => {
                metrics::record_provider_error(self.provider.name(), error_label(&e));
                Err(e.into())
            }
        }
    }
}

fn non_empty_text(text: Option<String>) -> Result<String, AppError> {
    match text {
        Some(t) if !t.trim().is_empty() => Ok(t),
        _ => Err(AppError::BadGateway("AI returned an empty reply".to_string())),
    }
}

/// Parse a model reply that must be JSON; the raw reply is logged
/// (truncated) when it is not.
fn parse_model_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, AppError> {
    serde_json::from_str(raw).map_err(|e| {
        let sample: String = raw.chars().take(200).collect();
        tracing::error!(error = %e, raw = %sample, "Failed to parse AI response as JSON");
        AppError::BadGateway("AI returned invalid JSON".to_string())
    })
}

fn build_quote_response(request: &GenerateQuoteRequest, parsed: ModelQuote) -> QuoteResponse {
    let subtotal: f64 = parsed.line_items.iter().map(|item| item.total).sum();
    let tax = subtotal * SALES_TAX_RATE;
    let total = subtotal + tax;

    let cost: f64 = parsed
        .line_items
        .iter()
        .map(|item| item.total * ESTIMATED_COST_RATIO)
        .sum();
    let margin_percent = if subtotal > 0.0 {
        (subtotal - cost) / subtotal * 100.0
    } else {
        0.0
    };

    QuoteResponse {
        quote_id: format!("quote_{}_{}", request.tenant_id, Uuid::new_v4()),
        tenant_id: request.tenant_id.clone(),
        line_items: parsed.line_items,
        subtotal,
        tax,
        total,
        estimated_margin_percent: round2(margin_percent),
        reasoning: parsed.reasoning,
        upsell_suggestions: parsed.upsell_suggestions,
        confidence_score: parsed.confidence_score.unwrap_or(DEFAULT_CONFIDENCE_SCORE),
        generated_at: Utc::now(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn error_label(error: &ProviderError) -> &'static str {
    match error {
        ProviderError::NotConfigured(_) => "not_configured",
        ProviderError::ApiError(_) => "api_error",
        ProviderError::InvalidRequest(_) => "invalid_request",
        ProviderError::RateLimited => "rate_limited",
        ProviderError::ContentFiltered => "content_filtered",
        ProviderError::NetworkError(_) => "network_error",
    }
}

// ============================================================================
// Model Reply Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ModelQuote {
    #[serde(default)]
    line_items: Vec<QuoteLineItem>,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    upsell_suggestions: Vec<QuoteLineItem>,
    #[serde(default)]
    confidence_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ModelUpsells {
    #[serde(default)]
    upsell_items: Vec<QuoteLineItem>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    confidence_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ModelPricing {
    recommended_price: f64,
    target_margin_percent: f64,
    #[serde(default)]
    reasoning: String,
    #[serde(default)]
    adjustments: Option<serde_json::Value>,
    #[serde(default)]
    confidence_score: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockTextProvider;
    use std::collections::HashMap;

    fn request() -> GenerateQuoteRequest {
        serde_json::from_str(
            r#"{
                "tenant_id": "acme",
                "project_type": "garage",
                "customer_notes": "Two-car garage, lots of bikes"
            }"#,
        )
        .unwrap()
    }

    fn engine_with(provider: MockTextProvider) -> QuoteEngine {
        QuoteEngine::new(
            Arc::new(provider),
            Arc::new(CatalogStore::from_items(vec![])),
            Arc::new(PricingRulesStore::from_rules(HashMap::new())),
            "gpt-4-turbo".to_string(),
        )
    }

    const QUOTE_JSON: &str = r#"{
        "line_items": [
            {"sku": "SHELF-72", "description": "Shelf", "quantity": 4, "unit_price": 250.0, "total": 1000.0, "category": "base"},
            {"sku": "HOOK-12", "description": "Hooks", "quantity": 10, "unit_price": 50.0, "total": 500.0, "category": "upgrade"}
        ],
        "reasoning": "Standard garage build",
        "upsell_suggestions": [],
        "confidence_score": 0.85
    }"#;

    #[tokio::test]
    async fn suggest_quote_prices_line_items() {
        let engine = engine_with(MockTextProvider::with_response(QUOTE_JSON));
        let quote = engine.suggest_quote(&request()).await.unwrap();

        assert!(quote.quote_id.starts_with("quote_acme_"));
        assert_eq!(quote.line_items.len(), 2);
        assert_eq!(quote.subtotal, 1500.0);
        assert_eq!(quote.tax, 1500.0 * 0.0825);
        assert_eq!(quote.total, 1500.0 + 1500.0 * 0.0825);
        assert_eq!(quote.estimated_margin_percent, 40.0);
        assert_eq!(quote.confidence_score, 0.85);
    }

    #[tokio::test]
    async fn suggest_quote_defaults_confidence() {
        let engine = engine_with(MockTextProvider::with_response(
            r#"{"line_items": [], "reasoning": "nothing to quote"}"#,
        ));
        let quote = engine.suggest_quote(&request()).await.unwrap();

        assert_eq!(quote.subtotal, 0.0);
        assert_eq!(quote.estimated_margin_percent, 0.0);
        assert_eq!(quote.confidence_score, 0.7);
    }

    #[tokio::test]
    async fn suggest_quote_rejects_invalid_model_json() {
        let engine = engine_with(MockTextProvider::with_response("this is not json"));
        let err = engine.suggest_quote(&request()).await.unwrap_err();

        assert!(matches!(err, AppError::BadGateway(_)));
    }

    #[tokio::test]
    async fn explain_quote_passes_text_through() {
        let engine = engine_with(MockTextProvider::with_response(
            "We sized the shelving to your wall length.",
        ));
        let explanation = engine.explain_quote(&request()).await.unwrap();

        assert_eq!(
            explanation.explanation,
            "We sized the shelving to your wall length."
        );
    }

    #[tokio::test]
    async fn disabled_provider_maps_to_service_unavailable() {
        let engine = engine_with(MockTextProvider::new(false));
        let err = engine.suggest_quote(&request()).await.unwrap_err();

        assert!(matches!(err, AppError::ServiceUnavailable));
    }
}
