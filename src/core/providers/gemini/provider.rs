//! Gemini Provider Implementation

use async_trait::async_trait;

use crate::core::providers::unified_provider::ProviderError;
use crate::core::traits::{CaptionProvider, ProviderConfig};
use crate::core::types::requests::ProviderRequest;

use super::client::GeminiClient;
use super::config::GeminiConfig;

/// Caption provider backed by Gemini structured output
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        config
            .validate()
            .map_err(|e| ProviderError::configuration("gemini", e))?;

        let client = GeminiClient::new(config)?;
        Ok(Self { client })
    }

    pub fn model(&self) -> &str {
        &self.client.config().model
    }
}

#[async_trait]
impl CaptionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn generate_structured(
        &self,
        request: &ProviderRequest,
    ) -> Result<String, ProviderError> {
        tracing::debug!(model = %self.model(), "calling gemini generateContent");
        self.client.generate_structured(request).await
    }
}
