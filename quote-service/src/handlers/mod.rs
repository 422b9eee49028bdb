pub mod health;
pub mod quotes;

pub use health::{health_check, metrics, readiness_check};
pub use quotes::{explain_quote, generate_quote, optimize_pricing, suggest_upsells};
