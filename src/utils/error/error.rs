//! Application error type
//!
//! [`GatewayError`] covers everything above the caption service: config
//! loading, server startup and request handling. It renders itself as a JSON
//! error body through actix's [`ResponseError`].

use crate::core::captioning::CaptionError;
use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::image::ImageError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Provider could not be constructed
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Caption(#[from] CaptionError),

    #[error("{0}")]
    PayloadTooLarge(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Caption(err) => err.is_retryable(),
            GatewayError::Provider(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Status, stable code and client-facing message
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            GatewayError::Caption(caption_error) => match caption_error {
                CaptionError::InvalidRequest(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_REQUEST", self.to_string())
                }
                CaptionError::Provider(provider_error) => provider_parts(provider_error),
                CaptionError::MalformedResponse(_) => {
                    (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE", self.to_string())
                }
                CaptionError::Incomplete { .. } => {
                    (StatusCode::BAD_GATEWAY, "INCOMPLETE", self.to_string())
                }
                CaptionError::Template(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "TEMPLATE_ERROR",
                    "An internal error occurred".to_string(),
                ),
            },
            GatewayError::PayloadTooLarge(_) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", self.to_string())
            }
            GatewayError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", self.to_string()),
            GatewayError::Provider(provider_error) => provider_parts(provider_error),
            GatewayError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        }
    }
}

fn provider_parts(error: &ProviderError) -> (StatusCode, &'static str, String) {
    let status = match error {
        ProviderError::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
        ProviderError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ProviderError::ProviderUnavailable { .. } | ProviderError::Network { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, error.code(), error.to_string())
}

impl From<ImageError> for GatewayError {
    fn from(err: ImageError) -> Self {
        match err {
            ImageError::TooLarge { .. } => GatewayError::PayloadTooLarge(err.to_string()),
            other => GatewayError::Caption(CaptionError::from(other)),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = self.parts();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                retryable: self.is_retryable(),
                timestamp: chrono::Utc::now().timestamp(),
                request_id: None,
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub retryable: bool,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
