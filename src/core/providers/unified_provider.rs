//! Provider errors
//!
//! Everything a model backend can report back to the caption service. The
//! service never retries; [`ProviderError::is_retryable`] and
//! [`ProviderError::retry_after`] only inform the caller.
//!
//! | Variant | Code | Retryable |
//! |------|------|--------|
//! | Authentication | PROVIDER_AUTH | No |
//! | RateLimit | PROVIDER_RATE_LIMIT | Yes |
//! | ModelNotFound | MODEL_NOT_FOUND | No |
//! | InvalidRequest | PROVIDER_REJECTED | No |
//! | Network | PROVIDER_UNAVAILABLE | Yes |
//! | ProviderUnavailable | PROVIDER_UNAVAILABLE | Yes |
//! | Configuration | PROVIDER_CONFIG | No |
//! | Timeout | PROVIDER_TIMEOUT | Yes |
//! | ContentFiltered | CONTENT_FILTERED | No |
//! | ApiError | PROVIDER_ERROR | 429 and 5xx |
//! | ResponseParsing | PROVIDER_ERROR | No |
//!
//! ```rust,ignore
//! let err = ProviderError::rate_limit("gemini", Some(30));
//! assert_eq!(err.retry_after(), Some(30));
//! ```

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("Authentication failed for {provider}: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimit {
        provider: &'static str,
        message: String,
        /// Seconds the upstream asked us to wait
        retry_after: Option<u64>,
    },

    #[error("Model '{model}' not found for {provider}")]
    ModelNotFound {
        provider: &'static str,
        model: String,
    },

    /// Upstream refused the request as malformed
    #[error("Request rejected by {provider}: {message}")]
    InvalidRequest {
        provider: &'static str,
        message: String,
    },

    #[error("Network error for {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("Provider {provider} is unavailable: {message}")]
    ProviderUnavailable {
        provider: &'static str,
        message: String,
    },

    #[error("Configuration error for {provider}: {message}")]
    Configuration {
        provider: &'static str,
        message: String,
    },

    #[error("Timeout for {provider}: {message}")]
    Timeout {
        provider: &'static str,
        message: String,
    },

    /// Prompt or image blocked by the provider's safety filters
    #[error("Content filtered by {provider} safety systems: {reason}")]
    ContentFiltered {
        provider: &'static str,
        reason: String,
    },

    #[error("API error for {provider} (status {status}): {message}")]
    ApiError {
        provider: &'static str,
        status: u16,
        message: String,
    },

    /// The provider answered but its envelope could not be read
    #[error("Failed to parse {provider} response: {message}")]
    ResponseParsing {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn authentication(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider,
            message: message.into(),
        }
    }

    /// Rate limit without an upstream message
    pub fn rate_limit(provider: &'static str, retry_after: Option<u64>) -> Self {
        let message = match retry_after {
            Some(seconds) => format!("Rate limit exceeded. Retry after {} seconds", seconds),
            None => "Rate limit exceeded".to_string(),
        };
        Self::rate_limit_with_message(provider, message, retry_after)
    }

    pub fn rate_limit_with_message(
        provider: &'static str,
        message: impl Into<String>,
        retry_after: Option<u64>,
    ) -> Self {
        Self::RateLimit {
            provider,
            message: message.into(),
            retry_after,
        }
    }

    pub fn model_not_found(provider: &'static str, model: impl Into<String>) -> Self {
        Self::ModelNotFound {
            provider,
            model: model.into(),
        }
    }

    pub fn invalid_request(provider: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider,
            message: message.into(),
        }
    }

    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Network {
            provider,
            message: message.into(),
        }
    }

    pub fn provider_unavailable(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider,
            message: message.into(),
        }
    }

    pub fn configuration(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Configuration {
            provider,
            message: message.into(),
        }
    }

    pub fn timeout(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider,
            message: message.into(),
        }
    }

    pub fn content_filtered(provider: &'static str, reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            provider,
            reason: reason.into(),
        }
    }

    pub fn api_error(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider,
            status,
            message: message.into(),
        }
    }

    pub fn response_parsing(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ResponseParsing {
            provider,
            message: message.into(),
        }
    }

    /// Name of the provider that failed
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Authentication { provider, .. }
            | Self::RateLimit { provider, .. }
            | Self::ModelNotFound { provider, .. }
            | Self::InvalidRequest { provider, .. }
            | Self::Network { provider, .. }
            | Self::ProviderUnavailable { provider, .. }
            | Self::Configuration { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::ContentFiltered { provider, .. }
            | Self::ApiError { provider, .. }
            | Self::ResponseParsing { provider, .. } => provider,
        }
    }

    /// Stable machine readable code, as rendered in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::Authentication { .. } => "PROVIDER_AUTH",
            Self::RateLimit { .. } => "PROVIDER_RATE_LIMIT",
            Self::ModelNotFound { .. } => "MODEL_NOT_FOUND",
            Self::InvalidRequest { .. } => "PROVIDER_REJECTED",
            Self::Network { .. } | Self::ProviderUnavailable { .. } => "PROVIDER_UNAVAILABLE",
            Self::Configuration { .. } => "PROVIDER_CONFIG",
            Self::Timeout { .. } => "PROVIDER_TIMEOUT",
            Self::ContentFiltered { .. } => "CONTENT_FILTERED",
            Self::ApiError { .. } | Self::ResponseParsing { .. } => "PROVIDER_ERROR",
        }
    }

    /// Whether the same request may succeed later
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit { .. }
            | Self::Network { .. }
            | Self::ProviderUnavailable { .. }
            | Self::Timeout { .. } => true,
            Self::ApiError { status, .. } => matches!(*status, 429 | 500..=599),
            _ => false,
        }
    }

    /// Upstream wait hint in seconds, only known for rate limits
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}
