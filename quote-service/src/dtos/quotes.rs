use crate::models::{ProjectType, QuoteLineItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of the quote-generation endpoints. One flat record per request;
/// the same shape feeds all four AI operations.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuoteRequest {
    #[validate(length(min = 1, message = "tenant_id must not be empty"))]
    pub tenant_id: String,

    #[serde(default)]
    pub customer_id: Option<String>,

    pub project_type: ProjectType,

    #[validate(length(min = 1, message = "customer_notes must not be empty"))]
    pub customer_notes: String,

    #[validate(range(exclusive_min = 0.0, message = "square_footage must be positive"))]
    #[serde(default)]
    pub square_footage: Option<f64>,

    #[validate(range(exclusive_min = 0.0, message = "ceiling_height must be positive"))]
    #[serde(default)]
    pub ceiling_height: Option<f64>,

    /// "budget", "standard", or "premium"; free-form and optional.
    #[serde(default)]
    pub budget_range: Option<String>,
}

/// Returned by POST /api/ai/generate-quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub quote_id: String,
    pub tenant_id: String,
    pub line_items: Vec<QuoteLineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub estimated_margin_percent: f64,
    pub reasoning: String,
    pub upsell_suggestions: Vec<QuoteLineItem>,
    /// 0.0 to 1.0
    pub confidence_score: f64,
    pub generated_at: DateTime<Utc>,
}

/// Returned by POST /api/ai/suggest-upsells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsellSuggestionResponse {
    pub tenant_id: String,
    pub project_type: ProjectType,
    pub upsell_items: Vec<QuoteLineItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

/// Returned by POST /api/ai/explain-quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainQuoteResponse {
    pub explanation: String,
    pub generated_at: DateTime<Utc>,
}

/// Returned by POST /api/ai/optimize-pricing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedPricingResponse {
    pub recommended_price: f64,
    pub target_margin_percent: f64,
    pub reasoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustments: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> GenerateQuoteRequest {
        serde_json::from_str(
            r#"{
                "tenant_id": "acme",
                "project_type": "garage",
                "customer_notes": "Two-car garage, lots of bikes",
                "square_footage": 400.0
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn valid_request_passes_validation() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn empty_tenant_id_fails_validation() {
        let mut req = valid_request();
        req.tenant_id.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn zero_square_footage_fails_validation() {
        let mut req = valid_request();
        req.square_footage = Some(0.0);
        assert!(req.validate().is_err());
    }
}
