use quote_service::config::{CatalogConfig, OpenAiConfig, QuoteConfig};
use quote_service::services::providers::mock::MockTextProvider;
use quote_service::services::providers::TextProvider;
use quote_service::startup::Application;
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

/// A model reply the quote endpoint can price.
pub const SAMPLE_QUOTE_REPLY: &str = r#"{
    "line_items": [
        {"sku": "SHELF-72", "description": "Heavy-duty wall shelf", "quantity": 4, "unit_price": 250.0, "total": 1000.0, "category": "base", "reasoning": "One per wall section"},
        {"sku": "HOOK-12", "description": "Bike hook 12-pack", "quantity": 2, "unit_price": 250.0, "total": 500.0, "category": "upgrade"}
    ],
    "reasoning": "Sized for a two-car garage",
    "upsell_suggestions": [
        {"sku": "BIN-S", "description": "Small parts bins", "quantity": 1, "unit_price": 89.0, "total": 89.0, "category": "upsell"}
    ],
    "confidence_score": 0.85
}"#;

pub const SAMPLE_UPSELL_REPLY: &str = r#"{
    "upsell_items": [
        {"sku": "BIN-S", "description": "Small parts bins", "quantity": 1, "unit_price": 89.0, "total": 89.0, "category": "upsell", "reasoning": "Keeps hardware sorted"}
    ],
    "reasoning": "Organization add-ons close often",
    "confidence_score": 0.8
}"#;

pub const SAMPLE_PRICING_REPLY: &str = r#"{
    "recommended_price": 1650.0,
    "target_margin_percent": 40.0,
    "reasoning": "Premium budget range supports target margin",
    "adjustments": {"seasonal_multiplier": 1.0, "volume_discount_applied": false},
    "confidence_score": 0.9
}"#;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    // Keeps the temp catalog alive for the app's lifetime.
    _catalog_file: NamedTempFile,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_provider(Arc::new(MockTextProvider::with_response(SAMPLE_QUOTE_REPLY)))
            .await
    }

    pub async fn spawn_with_provider(provider: Arc<dyn TextProvider>) -> Self {
        let catalog_file = write_catalog_fixture();

        let config = QuoteConfig {
            common: CoreConfig {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            openai: OpenAiConfig {
                api_key: Secret::new("test-api-key".to_string()),
                model: "gpt-4-turbo".to_string(),
                api_base_url: "https://api.openai.com/v1".to_string(),
            },
            catalog: CatalogConfig {
                path: catalog_file.path().to_str().unwrap().to_string(),
                pricing_rules_path: None,
            },
        };

        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the HTTP server to come up.
        let client = reqwest::Client::new();
        let health_url = format!("{}/api/health", address);
        for _ in 0..20 {
            if let Ok(response) = client.get(&health_url).send().await {
                if response.status().is_success() {
                    break;
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        Self {
            address,
            port,
            _catalog_file: catalog_file,
        }
    }
}

fn write_catalog_fixture() -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp catalog");
    let catalog = r#"[
        {
            "catalog_item_id": "cat_shelf_72",
            "tenant_id": "acme",
            "sku": "SHELF-72",
            "name": "Heavy-duty wall shelf",
            "description": "72in wall-mounted shelf, 600lb capacity",
            "base_price": 250.0,
            "category": "garage storage",
            "typical_quantity_range": "2-6"
        },
        {
            "catalog_item_id": "cat_hook_12",
            "tenant_id": "acme",
            "sku": "HOOK-12",
            "name": "Bike hook 12-pack",
            "description": "Ceiling-mount bike hooks",
            "base_price": 250.0,
            "category": "garage storage",
            "pairs_well_with": ["SHELF-72"]
        }
    ]"#;
    std::fs::write(file.path(), catalog).expect("Failed to write temp catalog");
    file
}
