use serde::{Deserialize, Serialize};

/// Per-tenant pricing rules used by the pricing optimization prompt.
///
/// All fields have defaults so a partial rules file still loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingRules {
    #[serde(default = "default_target_margin")]
    pub target_margin_percent: f64,

    #[serde(default = "default_minimum_margin")]
    pub minimum_margin_percent: f64,

    /// Line-item count at which the volume discount kicks in.
    #[serde(default = "default_volume_threshold")]
    pub volume_discount_threshold: u32,

    #[serde(default = "default_volume_discount")]
    pub volume_discount_percent: f64,

    #[serde(default = "default_seasonal_multiplier")]
    pub seasonal_multiplier: f64,
}

fn default_target_margin() -> f64 {
    40.0
}

fn default_minimum_margin() -> f64 {
    25.0
}

fn default_volume_threshold() -> u32 {
    10
}

fn default_volume_discount() -> f64 {
    5.0
}

fn default_seasonal_multiplier() -> f64 {
    1.0
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            target_margin_percent: default_target_margin(),
            minimum_margin_percent: default_minimum_margin(),
            volume_discount_threshold: default_volume_threshold(),
            volume_discount_percent: default_volume_discount(),
            seasonal_multiplier: default_seasonal_multiplier(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_rules_fill_in_defaults() {
        let rules: PricingRules =
            serde_json::from_str(r#"{"target_margin_percent": 55.0}"#).unwrap();
        assert_eq!(rules.target_margin_percent, 55.0);
        assert_eq!(rules.minimum_margin_percent, 25.0);
        assert_eq!(rules.volume_discount_threshold, 10);
        assert_eq!(rules.seasonal_multiplier, 1.0);
    }
}
