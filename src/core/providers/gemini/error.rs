//! Gemini error mapping

use serde_json::Value;

use crate::core::providers::unified_provider::ProviderError;

const PROVIDER: &str = "gemini";

/// Maps Gemini HTTP failures and error envelopes onto [`ProviderError`]
pub struct GeminiErrorMapper;

impl GeminiErrorMapper {
    /// Map a non-success HTTP status, using the body when it is a Google
    /// error envelope
    pub fn from_http_status(status: u16, body: &str) -> ProviderError {
        if let Ok(json) = serde_json::from_str::<Value>(body) {
            if json.get("error").is_some() {
                return Self::from_api_response(&json, status);
            }
        }

        match status {
            400 => ProviderError::invalid_request(PROVIDER, format!("Bad request: {}", body)),
            401 => ProviderError::authentication(PROVIDER, "Invalid or missing API key"),
            403 => ProviderError::authentication(PROVIDER, "Forbidden: insufficient permissions"),
            404 => ProviderError::model_not_found(PROVIDER, "Model or endpoint not found"),
            429 => ProviderError::rate_limit(PROVIDER, None),
            503 => ProviderError::provider_unavailable(PROVIDER, "Service unavailable"),
            504 => ProviderError::timeout(PROVIDER, "Upstream deadline exceeded"),
            _ => ProviderError::api_error(PROVIDER, status, body),
        }
    }

    /// Map a `{"error": {code, message, status, details}}` envelope
    pub fn from_api_response(response: &Value, http_status: u16) -> ProviderError {
        let Some(error) = response.get("error") else {
            return ProviderError::api_error(PROVIDER, http_status, "Unknown API error");
        };

        let code = error
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(http_status);
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error");
        let status = error.get("status").and_then(Value::as_str).unwrap_or("");

        match (code, status) {
            (401, _) | (_, "UNAUTHENTICATED") => ProviderError::authentication(PROVIDER, message),
            (403, _) | (_, "PERMISSION_DENIED") => ProviderError::authentication(PROVIDER, message),
            // An invalid key is reported as a plain bad request
            (400, _) | (_, "INVALID_ARGUMENT") if Self::is_api_key_error(error) => {
                ProviderError::authentication(PROVIDER, message)
            }
            (400, _) | (_, "INVALID_ARGUMENT") | (_, "FAILED_PRECONDITION") => {
                ProviderError::invalid_request(PROVIDER, message)
            }
            (404, _) | (_, "NOT_FOUND") => ProviderError::model_not_found(PROVIDER, message),
            (429, _) | (_, "RESOURCE_EXHAUSTED") => ProviderError::rate_limit_with_message(
                PROVIDER,
                message,
                Self::extract_retry_after(error),
            ),
            (504, _) | (_, "DEADLINE_EXCEEDED") => ProviderError::timeout(PROVIDER, message),
            (503, _) | (_, "UNAVAILABLE") => ProviderError::provider_unavailable(PROVIDER, message),
            _ => ProviderError::api_error(PROVIDER, code, message),
        }
    }

    fn is_api_key_error(error: &Value) -> bool {
        let reason_is_key = error
            .get("details")
            .and_then(Value::as_array)
            .is_some_and(|details| {
                details.iter().any(|detail| {
                    detail.get("reason").and_then(Value::as_str) == Some("API_KEY_INVALID")
                })
            });
        reason_is_key
            || error
                .get("message")
                .and_then(Value::as_str)
                .is_some_and(|m| m.contains("API key"))
    }

    /// Retry hint in seconds from `retry_after` or a `RetryInfo` detail
    fn extract_retry_after(error: &Value) -> Option<u64> {
        if let Some(retry_after) = error.get("retry_after").and_then(Value::as_u64) {
            return Some(retry_after);
        }

        error
            .get("details")
            .and_then(Value::as_array)?
            .iter()
            .find_map(|detail| {
                detail
                    .get("retry_after")
                    .and_then(Value::as_u64)
                    .or_else(|| {
                        detail
                            .get("retryDelay")
                            .and_then(Value::as_str)
                            .and_then(parse_duration_secs)
                    })
            })
    }
}

/// Parse protobuf JSON durations such as `"30s"` or `"1.5s"`, rounding up
fn parse_duration_secs(value: &str) -> Option<u64> {
    let seconds: f64 = value.strip_suffix('s')?.parse().ok()?;
    if seconds.is_sign_negative() || !seconds.is_finite() {
        return None;
    }
    Some(seconds.ceil() as u64)
}
