use serde::{Deserialize, Serialize};

/// A priceable item from the tenant catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub catalog_item_id: String,

    /// Tenant that owns this item.
    pub tenant_id: String,

    pub sku: String,
    pub name: String,
    pub description: String,
    pub base_price: f64,

    /// Free-form category; matched against the project type when
    /// selecting items for a prompt (e.g., "garage storage").
    pub category: String,

    /// Typical quantity range, e.g. "1-5" or "10-20".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typical_quantity_range: Option<String>,

    /// SKUs this item is commonly sold with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairs_well_with: Option<Vec<String>>,
}
