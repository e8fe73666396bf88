//! Gemini Client
//!
//! Thin HTTP client for the `generateContent` endpoint of Google AI Studio.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use serde_json::{Map, Value, json};
use tokio::time::timeout;

use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::requests::ProviderRequest;

use super::config::GeminiConfig;
use super::error::GeminiErrorMapper;

const PROVIDER: &str = "gemini";

/// Finish reasons that mean the candidate was withheld
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "RECITATION",
    "BLOCKLIST",
    "PROHIBITED_CONTENT",
    "SPII",
    "IMAGE_SAFETY",
];

/// Gemini API client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let mut builder = ClientBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout));

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(|e| {
                ProviderError::configuration(PROVIDER, format!("Invalid proxy URL: {}", e))
            })?;
            builder = builder.proxy(proxy);
        }

        let http_client = builder.build().map_err(|e| {
            ProviderError::configuration(PROVIDER, format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// One `generateContent` call with JSON-constrained output
    ///
    /// Returns the concatenated text parts of the first candidate.
    pub async fn generate_structured(
        &self,
        request: &ProviderRequest,
    ) -> Result<String, ProviderError> {
        let body = self.build_request_body(request);
        let response = self.send_request(body).await?;
        extract_candidate_text(&response)
    }

    /// Request body for `generateContent`
    pub fn build_request_body(&self, request: &ProviderRequest) -> Value {
        let mut generation_config = Map::new();
        generation_config.insert("responseMimeType".into(), json!("application/json"));
        generation_config.insert("responseSchema".into(), request.response_schema.clone());
        if let Some(temperature) = self.config.temperature {
            generation_config.insert("temperature".into(), json!(temperature));
        }
        if let Some(max_tokens) = self.config.max_output_tokens {
            generation_config.insert("maxOutputTokens".into(), json!(max_tokens));
        }

        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": request.prompt },
                    {
                        "inlineData": {
                            "mimeType": request.image.mime_type(),
                            "data": request.image.data(),
                        }
                    }
                ]
            }],
            "generationConfig": generation_config,
        });

        if let Some(settings) = &self.config.safety_settings {
            body["safetySettings"] = json!(settings);
        }

        body
    }

    async fn send_request(&self, body: Value) -> Result<Value, ProviderError> {
        let url = self.config.generate_content_url();
        let headers = self.build_headers()?;
        let api_key = self.config.api_key.as_deref().unwrap_or_default();

        if self.config.debug {
            tracing::debug!("Gemini request URL: {}", url);
            tracing::debug!("Gemini request prompt: {}", body["contents"][0]["parts"][0]["text"]);
        }

        let response = timeout(
            Duration::from_secs(self.config.request_timeout),
            self.http_client
                .post(&url)
                .query(&[("key", api_key)])
                .headers(headers)
                .json(&body)
                .send(),
        )
        .await
        .map_err(|_| ProviderError::timeout(PROVIDER, "Request timeout"))?
        .map_err(|e| {
            if e.is_timeout() {
                ProviderError::timeout(PROVIDER, format!("Request timeout: {}", e))
            } else {
                ProviderError::network(PROVIDER, format!("Network error: {}", e))
            }
        })?;

        self.handle_response(response).await
    }

    fn build_headers(&self) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (key, value) in &self.config.custom_headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                ProviderError::configuration(PROVIDER, format!("Invalid header name: {}", e))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                ProviderError::configuration(PROVIDER, format!("Invalid header value: {}", e))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    async fn handle_response(&self, response: Response) -> Result<Value, ProviderError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            ProviderError::network(PROVIDER, format!("Failed to read response: {}", e))
        })?;

        if self.config.debug {
            tracing::debug!("Gemini response status: {}", status);
            tracing::debug!("Gemini response body: {}", response_text);
        }

        if !status.is_success() {
            return Err(GeminiErrorMapper::from_http_status(
                status.as_u16(),
                &response_text,
            ));
        }

        let json_response: Value = serde_json::from_str(&response_text).map_err(|e| {
            ProviderError::response_parsing(PROVIDER, format!("Failed to parse response JSON: {}", e))
        })?;

        if json_response.get("error").is_some() {
            return Err(GeminiErrorMapper::from_api_response(
                &json_response,
                status.as_u16(),
            ));
        }

        Ok(json_response)
    }
}

/// Pull the generated text out of a `generateContent` response
pub fn extract_candidate_text(response: &Value) -> Result<String, ProviderError> {
    if let Some(reason) = response
        .pointer("/promptFeedback/blockReason")
        .and_then(Value::as_str)
    {
        return Err(ProviderError::content_filtered(
            PROVIDER,
            format!("prompt blocked: {}", reason),
        ));
    }

    let candidate = response
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .ok_or_else(|| ProviderError::response_parsing(PROVIDER, "No candidates in response"))?;

    let finish_reason = candidate.get("finishReason").and_then(Value::as_str);
    if let Some(reason) = finish_reason.filter(|r| BLOCKING_FINISH_REASONS.contains(r)) {
        return Err(ProviderError::content_filtered(
            PROVIDER,
            format!("candidate blocked: {}", reason),
        ));
    }

    let text: String = candidate
        .pointer("/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(ProviderError::response_parsing(
            PROVIDER,
            format!(
                "Candidate has no text (finish reason: {})",
                finish_reason.unwrap_or("unknown")
            ),
        ));
    }

    Ok(text)
}
