//! Caption generation errors

use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::image::ImageError;

/// Failure of one caption generation call
///
/// | Variant | Meaning | Retryable |
/// |------|------|--------|
/// | InvalidRequest | Rejected before the provider was called | No |
/// | Provider | The provider call itself failed | Per [`ProviderError::is_retryable`] |
/// | MalformedResponse | Reply did not match the caption schema | No |
/// | Incomplete | Fewer captions than requested | No |
/// | Template | Prompt could not be rendered | No |
#[derive(Debug, Clone, thiserror::Error)]
pub enum CaptionError {
    #[error("Invalid caption request: {0}")]
    InvalidRequest(String),

    #[error("Caption provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to generate captions in the expected format: {0}")]
    MalformedResponse(String),

    #[error(
        "Failed to generate the requested number of captions. Expected {expected}, got {actual}."
    )]
    Incomplete { expected: usize, actual: usize },

    #[error("Failed to render caption prompt: {0}")]
    Template(String),
}

impl CaptionError {
    /// Whether a caller may reasonably re-invoke with the same request
    pub fn is_retryable(&self) -> bool {
        match self {
            CaptionError::Provider(err) => err.is_retryable(),
            CaptionError::InvalidRequest(_)
            | CaptionError::MalformedResponse(_)
            | CaptionError::Incomplete { .. }
            | CaptionError::Template(_) => false,
        }
    }

    /// Stable machine readable code
    pub fn code(&self) -> &'static str {
        match self {
            CaptionError::InvalidRequest(_) => "INVALID_REQUEST",
            CaptionError::Provider(_) => "PROVIDER_ERROR",
            CaptionError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            CaptionError::Incomplete { .. } => "INCOMPLETE",
            CaptionError::Template(_) => "TEMPLATE_ERROR",
        }
    }
}

impl From<ImageError> for CaptionError {
    fn from(err: ImageError) -> Self {
        CaptionError::InvalidRequest(err.to_string())
    }
}

impl From<minijinja::Error> for CaptionError {
    fn from(err: minijinja::Error) -> Self {
        CaptionError::Template(err.to_string())
    }
}
