//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;

/// Mock text provider returning a fixed reply.
pub struct MockTextProvider {
    enabled: bool,
    response: String,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            response: r#"{"line_items":[],"reasoning":"mock","upsell_suggestions":[],"confidence_score":0.5}"#
                .to_string(),
        }
    }

    /// An enabled mock that replies with the given text.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            enabled: true,
            response: response.into(),
        }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        _system: &str,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        // Simulate some processing
        tokio::time::sleep(tokio::time::Duration::from_millis(25)).await;

        Ok(ProviderResponse {
            text: Some(self.response.clone()),
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: self.response.len() as i32 / 4,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}
