//! Domain models for the quote service.

pub mod catalog;
pub mod pricing;
pub mod quote;

pub use catalog::CatalogItem;
pub use pricing::PricingRules;
pub use quote::{ProjectType, QuoteLineItem};
