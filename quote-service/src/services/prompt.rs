//! Prompt construction for the quote endpoints.
//!
//! Each operation gets one prompt assembled from the customer request
//! plus whatever local context applies (catalog items, pricing rules).

use crate::dtos::GenerateQuoteRequest;
use crate::models::{CatalogItem, PricingRules};

pub struct PromptBuilder;

impl PromptBuilder {
    /// Prompt for POST /api/ai/generate-quote.
    pub fn quote_prompt(request: &GenerateQuoteRequest, catalog: &[&CatalogItem]) -> String {
        format!(
            r#"You are an expert estimator for {tenant}.

# CUSTOMER REQUEST
Project Type: {project_type}
Customer Notes: {notes}
Square Footage: {square_footage}
Ceiling Height: {ceiling_height}
Budget Range: {budget_range}

# AVAILABLE CATALOG ITEMS
{catalog}

# TASK
Generate a detailed quote suggestion using ONLY valid JSON:

{{
  "line_items": [
    {{
      "sku": "EXACT_SKU_FROM_CATALOG",
      "description": "User-friendly description",
      "quantity": 5,
      "unit_price": 299.99,
      "total": 1499.95,
      "category": "base",
      "reasoning": "Why this item and quantity"
    }}
  ],
  "reasoning": "Overall quote strategy",
  "upsell_suggestions": [],
  "confidence_score": 0.85
}}

RULES:
1. Use only SKUs from the catalog.
2. Base quantities on square footage and project type.
3. Keep unit prices consistent with the catalog.
4. Include reasoning for each line item.
5. Suggest 2-3 upsells.
6. Return ONLY valid JSON.
"#,
            tenant = request.tenant_id,
            project_type = request.project_type,
            notes = request.customer_notes,
            square_footage = Self::format_optional(request.square_footage),
            ceiling_height = Self::format_optional(request.ceiling_height),
            budget_range = request.budget_range.as_deref().unwrap_or("Not specified"),
            catalog = Self::format_catalog(catalog),
        )
    }

    /// Prompt for POST /api/ai/suggest-upsells.
    pub fn upsell_prompt(request: &GenerateQuoteRequest, catalog: &[&CatalogItem]) -> String {
        format!(
            r#"You are an expert sales engineer for {tenant}.

# CUSTOMER REQUEST
Project Type: {project_type}
Customer Notes: {notes}

# AVAILABLE CATALOG ITEMS
{catalog}

# TASK
Suggest 2-5 upsell items that would meaningfully improve the project outcome.

Return ONLY valid JSON:

{{
  "upsell_items": [
    {{
      "sku": "EXACT_SKU_FROM_CATALOG",
      "description": "Short description",
      "quantity": 1,
      "unit_price": 199.99,
      "total": 199.99,
      "category": "upsell",
      "reasoning": "Why this is a valuable upgrade"
    }}
  ],
  "reasoning": "Overall upsell strategy",
  "confidence_score": 0.85
}}
"#,
            tenant = request.tenant_id,
            project_type = request.project_type,
            notes = request.customer_notes,
            catalog = Self::format_catalog(catalog),
        )
    }

    /// Prompt for POST /api/ai/explain-quote. Plain text, no JSON.
    pub fn explain_prompt(request: &GenerateQuoteRequest) -> String {
        format!(
            r#"You are an expert estimator who explains quotes clearly.

# CUSTOMER REQUEST
Project Type: {project_type}
Customer Notes: {notes}

# TASK
Explain the reasoning behind the quote in clear, friendly language.
Do NOT return JSON. Return plain text only.
"#,
            project_type = request.project_type,
            notes = request.customer_notes,
        )
    }

    /// Prompt for POST /api/ai/optimize-pricing.
    pub fn pricing_prompt(request: &GenerateQuoteRequest, rules: &PricingRules) -> String {
        format!(
            r#"You are a pricing strategist for {tenant}.

# CUSTOMER REQUEST
Project Type: {project_type}
Customer Notes: {notes}
Budget Range: {budget_range}

# PRICING RULES
{rules}

# TASK
Recommend an optimized price and margin strategy.

Return ONLY valid JSON:

{{
  "recommended_price": 1234.56,
  "target_margin_percent": 40,
  "reasoning": "Why this pricing strategy is optimal",
  "adjustments": {{
    "seasonal_multiplier": 1.0,
    "volume_discount_applied": false
  }},
  "confidence_score": 0.85
}}
"#,
            tenant = request.tenant_id,
            project_type = request.project_type,
            notes = request.customer_notes,
            budget_range = request.budget_range.as_deref().unwrap_or("Not specified"),
            rules = Self::format_pricing_rules(rules),
        )
    }

    fn format_optional(value: Option<f64>) -> String {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| "Not specified".to_string())
    }

    fn format_catalog(catalog: &[&CatalogItem]) -> String {
        if catalog.is_empty() {
            return "No catalog items available.".to_string();
        }

        catalog
            .iter()
            .map(|item| {
                format!(
                    "- SKU: {}\n  Name: {}\n  Description: {}\n  Price: ${:.2}\n  Typical Qty: {}\n",
                    item.sku,
                    item.name,
                    item.description,
                    item.base_price,
                    item.typical_quantity_range.as_deref().unwrap_or("Varies"),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_pricing_rules(rules: &PricingRules) -> String {
        format!(
            "- Target Margin: {}%\n- Minimum Margin: {}%\n- Volume Discount: {} items @ {}%\n- Seasonal Multiplier: {}",
            rules.target_margin_percent,
            rules.minimum_margin_percent,
            rules.volume_discount_threshold,
            rules.volume_discount_percent,
            rules.seasonal_multiplier,
        )
    }
}
