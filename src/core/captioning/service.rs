//! Caption generation service

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

use super::error::CaptionError;
use super::normalize::normalize_response;
use super::prompt::render_caption_prompt;
use crate::core::traits::provider::CaptionProvider;
use crate::core::types::caption::{CaptionRequest, CaptionResponse, caption_response_schema};
use crate::core::types::requests::ProviderRequest;

/// Turns a caption request into exactly `count` captions with the requested
/// tone, using one provider call
///
/// The service keeps no per-request state and is cheap to clone.
#[derive(Clone)]
pub struct CaptionService {
    provider: Arc<dyn CaptionProvider>,
}

impl fmt::Debug for CaptionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptionService")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl CaptionService {
    pub fn new(provider: Arc<dyn CaptionProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Generate captions for one request
    ///
    /// Invalid requests fail before the provider is contacted. Provider
    /// failures are returned as-is with no retry.
    pub async fn generate(&self, request: CaptionRequest) -> Result<CaptionResponse, CaptionError> {
        let span = info_span!(
            "caption_request",
            request_id = %Uuid::new_v4(),
            count = request.count,
            tone = %request.tone,
            provider = self.provider.name(),
        );
        self.generate_inner(request).instrument(span).await
    }

    async fn generate_inner(
        &self,
        request: CaptionRequest,
    ) -> Result<CaptionResponse, CaptionError> {
        let request = request.sanitized();
        if let Err(e) = request.validate() {
            warn!(error = %e, "rejecting caption request");
            return Err(e);
        }

        let prompt = render_caption_prompt(&request)?;
        debug!(prompt_len = prompt.len(), "rendered caption prompt");

        let CaptionRequest {
            image, count, tone, ..
        } = request;
        let provider_request = ProviderRequest::new(prompt, image, caption_response_schema());

        let started = Instant::now();
        let raw = self
            .provider
            .generate_structured(&provider_request)
            .await
            .map_err(|e| {
                warn!(error = %e, code = e.code(), retryable = e.is_retryable(), "caption provider call failed");
                CaptionError::from(e)
            })?;
        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            reply_len = raw.len(),
            "caption provider replied"
        );

        let (response, report) = normalize_response(&raw, count, &tone).map_err(|e| {
            warn!(error = %e, "caption reply rejected");
            e
        })?;

        if let Some(returned) = report.truncated_from {
            warn!(returned, kept = count, "provider returned too many captions, truncated");
        }
        if report.tone_corrections > 0 {
            warn!(
                corrected = report.tone_corrections,
                tone = %tone,
                "provider deviated from requested tone, overwritten"
            );
        }

        info!(captions = response.len(), "captions generated");
        Ok(response)
    }
}
