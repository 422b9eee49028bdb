//! service-core: Shared infrastructure for the quote-service workspace.
pub mod config;
pub mod error;
pub mod observability;
