//! Integration tests for the AI quote endpoints, using a mock provider.
//!
//! Run with: cargo test -p quote-service --test quote_api

mod common;

use common::{TestApp, SAMPLE_PRICING_REPLY, SAMPLE_QUOTE_REPLY, SAMPLE_UPSELL_REPLY};
use quote_service::services::providers::mock::MockTextProvider;
use std::sync::Arc;

fn quote_body() -> serde_json::Value {
    serde_json::json!({
        "tenant_id": "acme",
        "project_type": "garage",
        "customer_notes": "Two-car garage, lots of bikes",
        "square_footage": 400.0,
        "budget_range": "premium"
    })
}

#[tokio::test]
async fn generate_quote_returns_priced_quote() {
    let app =
        TestApp::spawn_with_provider(Arc::new(MockTextProvider::with_response(SAMPLE_QUOTE_REPLY)))
            .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/ai/generate-quote", app.address))
        .json(&quote_body())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");

    assert!(body["quote_id"]
        .as_str()
        .unwrap()
        .starts_with("quote_acme_"));
    assert_eq!(body["tenant_id"], "acme");
    assert_eq!(body["line_items"].as_array().unwrap().len(), 2);
    assert_eq!(body["subtotal"], 1500.0);
    assert_eq!(body["tax"], 123.75);
    assert_eq!(body["total"], 1623.75);
    assert_eq!(body["estimated_margin_percent"], 40.0);
    assert_eq!(body["confidence_score"], 0.85);
    assert_eq!(body["upsell_suggestions"].as_array().unwrap().len(), 1);
    assert!(body["reasoning"].as_str().unwrap().contains("garage"));
    assert!(body.get("generated_at").is_some());
}

#[tokio::test]
async fn generate_quote_rejects_empty_tenant_id() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let mut body = quote_body();
    body["tenant_id"] = serde_json::json!("");

    let response = client
        .post(format!("{}/api/ai/generate-quote", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn generate_quote_rejects_unknown_project_type() {
    let app = TestApp::spawn().await;
    let client = reqwest::Client::new();

    let mut body = quote_body();
    body["project_type"] = serde_json::json!("warehouse");

    let response = client
        .post(format!("{}/api/ai/generate-quote", app.address))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 422);
}

#[tokio::test]
async fn generate_quote_maps_malformed_model_reply_to_bad_gateway() {
    let app = TestApp::spawn_with_provider(Arc::new(MockTextProvider::with_response(
        "Sure! Here is your quote: shelves and hooks.",
    )))
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/ai/generate-quote", app.address))
        .json(&quote_body())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 502);
}

#[tokio::test]
async fn suggest_upsells_returns_upsell_items() {
    let app = TestApp::spawn_with_provider(Arc::new(MockTextProvider::with_response(
        SAMPLE_UPSELL_REPLY,
    )))
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/ai/suggest-upsells", app.address))
        .json(&quote_body())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["tenant_id"], "acme");
    assert_eq!(body["project_type"], "garage");
    assert_eq!(body["upsell_items"].as_array().unwrap().len(), 1);
    assert_eq!(body["upsell_items"][0]["sku"], "BIN-S");
    assert_eq!(body["confidence_score"], 0.8);
}

#[tokio::test]
async fn explain_quote_returns_plain_text_explanation() {
    let app = TestApp::spawn_with_provider(Arc::new(MockTextProvider::with_response(
        "We sized the shelving to your wall length.",
    )))
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/ai/explain-quote", app.address))
        .json(&quote_body())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["explanation"],
        "We sized the shelving to your wall length."
    );
    assert!(body.get("generated_at").is_some());
}

#[tokio::test]
async fn optimize_pricing_returns_recommendation() {
    let app = TestApp::spawn_with_provider(Arc::new(MockTextProvider::with_response(
        SAMPLE_PRICING_REPLY,
    )))
    .await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/ai/optimize-pricing", app.address))
        .json(&quote_body())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["recommended_price"], 1650.0);
    assert_eq!(body["target_margin_percent"], 40.0);
    assert_eq!(body["adjustments"]["volume_discount_applied"], false);
}
