//! Gemini client integration tests
//!
//! A wiremock server stands in for `generativelanguage.googleapis.com` so the
//! wire format and the error mapping can be checked over real HTTP.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{captions_reply, gemini_body, gemini_error, png_image, request};
    use crate::{assert_err, assert_ok};
    use instacaption::core::providers::gemini::GeminiClient;
    use instacaption::core::types::caption::caption_response_schema;
    use instacaption::{
        CaptionError, CaptionProvider, CaptionService, GeminiConfig, GeminiProvider,
        ProviderError, ProviderRequest,
    };
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn config(server: &MockServer) -> GeminiConfig {
        GeminiConfig::new("test-key").with_base_url(server.uri())
    }

    fn provider_request() -> ProviderRequest {
        ProviderRequest::new("write captions", png_image(), caption_response_schema())
    }

    async fn mount_status(server: &MockServer, status: u16, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    // ==================== Wire format ====================

    #[tokio::test]
    async fn test_request_carries_key_image_and_schema() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{
                    "parts": [
                        { "text": "write captions" },
                        { "inlineData": { "mimeType": "image/png", "data": png_image().data() } }
                    ]
                }],
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("{}")))
            .expect(1)
            .mount(&server)
            .await;

        let client = assert_ok!(GeminiClient::new(config(&server)));
        let text = assert_ok!(client.generate_structured(&provider_request()).await);

        assert_eq!(text, "{}");
    }

    #[tokio::test]
    async fn test_model_override_changes_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = assert_ok!(GeminiProvider::new(
            config(&server).with_model("gemini-1.5-pro")
        ));
        let text = assert_ok!(provider.generate_structured(&provider_request()).await);

        assert_eq!(text, "ok");
    }

    // ==================== Error mapping ====================

    #[tokio::test]
    async fn test_invalid_key_is_authentication() {
        let server = MockServer::start().await;
        mount_status(
            &server,
            400,
            json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT",
                    "details": [{ "reason": "API_KEY_INVALID" }]
                }
            }),
        )
        .await;

        let client = assert_ok!(GeminiClient::new(config(&server)));
        let err = assert_err!(client.generate_structured(&provider_request()).await);

        assert!(matches!(err, ProviderError::Authentication { .. }));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_quota_is_rate_limit_with_retry_hint() {
        let server = MockServer::start().await;
        mount_status(
            &server,
            429,
            json!({
                "error": {
                    "code": 429,
                    "message": "Resource has been exhausted",
                    "status": "RESOURCE_EXHAUSTED",
                    "details": [{
                        "@type": "type.googleapis.com/google.rpc.RetryInfo",
                        "retryDelay": "17s"
                    }]
                }
            }),
        )
        .await;

        let client = assert_ok!(GeminiClient::new(config(&server)));
        let err = assert_err!(client.generate_structured(&provider_request()).await);

        assert!(matches!(err, ProviderError::RateLimit { .. }));
        assert!(err.is_retryable());
        assert_eq!(err.retry_after(), Some(17));
    }

    #[tokio::test]
    async fn test_unavailable_is_retryable() {
        let server = MockServer::start().await;
        mount_status(&server, 503, gemini_error(503, "UNAVAILABLE", "overloaded")).await;

        let client = assert_ok!(GeminiClient::new(config(&server)));
        let err = assert_err!(client.generate_structured(&provider_request()).await);

        assert!(matches!(err, ProviderError::ProviderUnavailable { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_safety_block_is_content_filtered() {
        let server = MockServer::start().await;
        mount_status(
            &server,
            200,
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
        )
        .await;

        let client = assert_ok!(GeminiClient::new(config(&server)));
        let err = assert_err!(client.generate_structured(&provider_request()).await);

        assert!(matches!(err, ProviderError::ContentFiltered { .. }));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(gemini_body("late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut cfg = config(&server).with_timeout(1);
        cfg.connect_timeout = 1;
        let client = assert_ok!(GeminiClient::new(cfg));
        let err = assert_err!(client.generate_structured(&provider_request()).await);

        assert!(matches!(err, ProviderError::Timeout { .. }));
    }

    // ==================== Full pipeline ====================

    #[tokio::test]
    async fn test_service_over_gemini_normalizes_reply() {
        let server = MockServer::start().await;
        let reply = captions_reply(&["first", "second", "third"], "happy");
        mount_status(&server, 200, gemini_body(&reply)).await;

        let provider = assert_ok!(GeminiProvider::new(config(&server)));
        let service = CaptionService::new(Arc::new(provider));
        let response = assert_ok!(service.generate(request(2, "Witty")).await);

        assert_eq!(response.len(), 2);
        assert!(response.captions.iter().all(|c| c.tone == "Witty"));
    }

    #[tokio::test]
    async fn test_service_reports_upstream_failure_once() {
        let server = MockServer::start().await;
        mount_status(&server, 500, gemini_error(500, "INTERNAL", "boom")).await;

        let provider = assert_ok!(GeminiProvider::new(config(&server)));
        let service = CaptionService::new(Arc::new(provider));
        let err = assert_err!(service.generate(request(3, "Casual")).await);

        assert!(matches!(err, CaptionError::Provider(_)));
        // expect(1) on the mock fails the test on drop if a retry happened
    }
}
