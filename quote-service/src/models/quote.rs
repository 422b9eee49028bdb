use serde::{Deserialize, Serialize};
use std::fmt;

/// Project categories the estimator knows how to quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Garage,
    Closet,
    Pantry,
    Mudroom,
    HomeOffice,
}

impl ProjectType {
    /// Wire/prompt spelling, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Garage => "garage",
            ProjectType::Closet => "closet",
            ProjectType::Pantry => "pantry",
            ProjectType::Mudroom => "mudroom",
            ProjectType::HomeOffice => "home_office",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single priced line of a quote. Category is "base", "upgrade", or
/// "upsell" as emitted by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteLineItem {
    pub sku: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
    pub category: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_type_uses_snake_case_on_the_wire() {
        let ty: ProjectType = serde_json::from_str(r#""home_office""#).unwrap();
        assert_eq!(ty, ProjectType::HomeOffice);
        assert_eq!(serde_json::to_string(&ty).unwrap(), r#""home_office""#);
    }
}
