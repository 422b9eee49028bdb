//! Per-tenant pricing rules, loaded from an optional JSON file keyed by
//! tenant id. Tenants without an entry get the built-in defaults.

use crate::models::PricingRules;
use service_core::error::AppError;
use std::collections::HashMap;

pub struct PricingRulesStore {
    rules: HashMap<String, PricingRules>,
}

impl PricingRulesStore {
    /// Load rules from `path`, or construct an empty store when no path
    /// is configured.
    pub async fn load(path: Option<&str>) -> Result<Self, AppError> {
        let Some(path) = path else {
            return Ok(Self {
                rules: HashMap::new(),
            });
        };

        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            tracing::error!("Failed to read pricing rules file {}: {}", path, e);
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to read pricing rules file {}: {}",
                path,
                e
            ))
        })?;

        let rules: HashMap<String, PricingRules> = serde_json::from_str(&raw).map_err(|e| {
            tracing::error!("Failed to parse pricing rules file {}: {}", path, e);
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to parse pricing rules file {}: {}",
                path,
                e
            ))
        })?;

        tracing::info!(path = %path, tenants = rules.len(), "Loaded pricing rules");

        Ok(Self { rules })
    }

    pub fn from_rules(rules: HashMap<String, PricingRules>) -> Self {
        Self { rules }
    }

    pub fn for_tenant(&self, tenant_id: &str) -> PricingRules {
        self.rules.get(tenant_id).cloned().unwrap_or_default()
    }
}
