//! AI provider abstraction.
//!
//! A single trait seam over the completion API so the OpenAI client can
//! be swapped for a mock in tests.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::NotConfigured(_) => AppError::ServiceUnavailable,
            ProviderError::ApiError(msg) => AppError::BadGateway(msg),
            ProviderError::InvalidRequest(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            ProviderError::RateLimited => AppError::TooManyRequests(
                "Rate limited by AI provider".to_string(),
                Some(2),
            ),
            ProviderError::ContentFiltered => AppError::BadRequest(anyhow::anyhow!(
                "Content was filtered by AI provider safety settings"
            )),
            ProviderError::NetworkError(msg) => AppError::BadGateway(msg),
        }
    }
}

/// Result of a completion call.
pub struct ProviderResponse {
    /// Reply text; None when the provider returned no content.
    pub text: Option<String>,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    /// Finish reason.
    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
    Error,
}

/// Generation parameters for completion requests.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Top-p sampling.
    pub top_p: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<i32>,

    /// Stop sequences.
    pub stop_sequences: Vec<String>,

    /// Force a JSON object reply.
    pub json_output: bool,
}

/// Trait for chat-completion providers (OpenAI in production, a mock in
/// tests).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name for logging and metrics labels.
    fn name(&self) -> &'static str;

    /// Send one system + user message exchange and return the reply.
    async fn generate(
        &self,
        system: &str,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
