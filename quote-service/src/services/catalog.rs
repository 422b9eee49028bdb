//! In-memory catalog store backed by a static JSON file.
//!
//! The catalog is the only local context the model sees; it is loaded
//! once at startup and never mutated.

use crate::models::{CatalogItem, ProjectType};
use service_core::error::AppError;

pub struct CatalogStore {
    items: Vec<CatalogItem>,
}

impl CatalogStore {
    /// Load the catalog from a JSON file containing an array of items.
    pub async fn load(path: &str) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            tracing::error!("Failed to read catalog file {}: {}", path, e);
            AppError::ConfigError(anyhow::anyhow!("Failed to read catalog file {}: {}", path, e))
        })?;

        let items: Vec<CatalogItem> = serde_json::from_str(&raw).map_err(|e| {
            tracing::error!("Failed to parse catalog file {}: {}", path, e);
            AppError::ConfigError(anyhow::anyhow!(
                "Failed to parse catalog file {}: {}",
                path,
                e
            ))
        })?;

        tracing::info!(path = %path, count = items.len(), "Loaded catalog");

        Ok(Self { items })
    }

    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items owned by a tenant.
    pub fn for_tenant(&self, tenant_id: &str) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.tenant_id == tenant_id)
            .collect()
    }

    /// Tenant items whose category mentions the project type. An empty
    /// result is not an error; the prompt renders a placeholder instead.
    pub fn relevant(&self, tenant_id: &str, project_type: ProjectType) -> Vec<&CatalogItem> {
        self.items
            .iter()
            .filter(|item| {
                item.tenant_id == tenant_id
                    && item.category.to_lowercase().contains(project_type.as_str())
            })
            .collect()
    }
}
