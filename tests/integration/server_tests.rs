//! HTTP server integration tests
//!
//! Requests go through the complete actix app built by
//! [`HttpServer::create_app`], middleware included.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{PNG_DATA_URI, captions_reply};
    use crate::common::providers::StubProvider;
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use instacaption::server::{AppState, HttpServer};
    use instacaption::utils::error::ErrorResponse;
    use instacaption::{CaptionService, Config, ProviderError};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn state(config: Config, provider: &Arc<StubProvider>) -> web::Data<AppState> {
        web::Data::new(AppState::new(config, CaptionService::new(provider.clone())))
    }

    #[actix_web::test]
    async fn test_caption_round_trip() {
        let provider = Arc::new(StubProvider::replying(captions_reply(
            &["Sun, sand and a good book", "Salt in the air"],
            "relaxed",
        )));
        let app = test::init_service(HttpServer::create_app(state(Config::default(), &provider))).await;

        let req = test::TestRequest::post()
            .uri("/v1/captions")
            .set_json(json!({
                "photoDataUri": PNG_DATA_URI,
                "numberOfCaptions": 2,
                "writingTone": "Casual",
                "eventType": "Vacation Trip"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        let captions = body["data"]["captions"].as_array().expect("captions array");
        assert_eq!(captions.len(), 2);
        assert!(captions.iter().all(|c| c["tone"] == "Casual"));
        assert_eq!(provider.calls(), 1);
        assert!(
            provider
                .last_prompt()
                .is_some_and(|p| p.contains("Vacation Trip"))
        );
    }

    #[actix_web::test]
    async fn test_unsupported_mime_is_400() {
        let provider = Arc::new(StubProvider::replying(captions_reply(&["x"], "Casual")));
        let app = test::init_service(HttpServer::create_app(state(Config::default(), &provider))).await;

        let req = test::TestRequest::post()
            .uri("/v1/captions")
            .set_json(json!({ "image": "data:image/tiff;base64,AAAA" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error.code, "INVALID_REQUEST");
        assert!(!body.error.retryable);
        assert_eq!(provider.calls(), 0);
    }

    #[actix_web::test]
    async fn test_rate_limit_is_429_and_retryable() {
        let provider = Arc::new(StubProvider::failing(ProviderError::rate_limit(
            "stub",
            Some(30),
        )));
        let app = test::init_service(HttpServer::create_app(state(Config::default(), &provider))).await;

        let req = test::TestRequest::post()
            .uri("/v1/captions")
            .set_json(json!({ "image": PNG_DATA_URI }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error.code, "PROVIDER_RATE_LIMIT");
        assert!(body.error.retryable);
    }

    #[actix_web::test]
    async fn test_malformed_reply_is_502() {
        let provider = Arc::new(StubProvider::replying("not json at all"));
        let app = test::init_service(HttpServer::create_app(state(Config::default(), &provider))).await;

        let req = test::TestRequest::post()
            .uri("/v1/captions")
            .set_json(json!({ "image": PNG_DATA_URI }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error.code, "MALFORMED_RESPONSE");
    }

    #[actix_web::test]
    async fn test_health_names_provider() {
        let provider = Arc::new(StubProvider::replying("{}"));
        let app = test::init_service(HttpServer::create_app(state(Config::default(), &provider))).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["provider"], "stub");
        assert_eq!(provider.calls(), 0);
    }

    #[actix_web::test]
    async fn test_cors_allows_configured_origin() {
        let mut config = Config::default();
        config.server.cors.allowed_origins = vec!["https://app.example.com".to_string()];
        let provider = Arc::new(StubProvider::replying("{}"));
        let app = test::init_service(HttpServer::create_app(state(config, &provider))).await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header(("Origin", "https://app.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("https://app.example.com")
        );
    }
}
