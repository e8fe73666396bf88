//! Caption service integration tests
//!
//! The service is driven through [`StubProvider`] so the exact-count and
//! tone guarantees can be checked against real normalization code.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{captions_reply, request};
    use crate::common::providers::StubProvider;
    use crate::{assert_err, assert_ok};
    use instacaption::{CaptionError, CaptionService, ProviderError};
    use std::sync::Arc;

    fn service(provider: &Arc<StubProvider>) -> CaptionService {
        CaptionService::new(provider.clone())
    }

    // ==================== Count guarantees ====================

    #[tokio::test]
    async fn test_exact_count_passes_through() {
        let provider = Arc::new(StubProvider::replying(captions_reply(
            &["Sunset vibes", "Golden hour", "Ocean breeze"],
            "Casual",
        )));

        let response = assert_ok!(service(&provider).generate(request(3, "Casual")).await);

        assert_eq!(response.len(), 3);
        assert_eq!(response.first_text(), Some("Sunset vibes"));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_excess_captions_are_truncated_in_order() {
        let provider = Arc::new(StubProvider::replying(captions_reply(
            &["one", "two", "three", "four"],
            "Witty",
        )));

        let response = assert_ok!(service(&provider).generate(request(2, "Witty")).await);

        let texts: Vec<_> = response.captions.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[tokio::test]
    async fn test_short_reply_is_incomplete_without_retry() {
        let provider = Arc::new(StubProvider::replying(captions_reply(&["only"], "Casual")));

        let err = assert_err!(service(&provider).generate(request(3, "Casual")).await);

        assert!(matches!(
            err,
            CaptionError::Incomplete {
                expected: 3,
                actual: 1
            }
        ));
        assert_eq!(
            err.to_string(),
            "Failed to generate the requested number of captions. Expected 3, got 1."
        );
        assert_eq!(provider.calls(), 1);
    }

    // ==================== Tone guarantees ====================

    #[tokio::test]
    async fn test_tone_is_relabeled() {
        let provider = Arc::new(StubProvider::replying(
            r#"{"captions":[{"tone":"Happy","text":"a"},{"tone":"inspirational","text":"b"}]}"#,
        ));

        let response = assert_ok!(service(&provider).generate(request(2, "Inspirational")).await);

        assert!(response.captions.iter().all(|c| c.tone == "Inspirational"));
    }

    // ==================== Failures ====================

    #[tokio::test]
    async fn test_caption_without_tone_is_malformed() {
        let provider = Arc::new(StubProvider::replying(
            r#"{"captions":[{"tone":"Casual","text":"a"},{"text":"b"}]}"#,
        ));

        let err = assert_err!(service(&provider).generate(request(1, "Casual")).await);

        assert!(matches!(err, CaptionError::MalformedResponse(_)));
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_non_json_reply_is_malformed() {
        let provider = Arc::new(StubProvider::replying("Here are your captions!"));

        let err = assert_err!(service(&provider).generate(request(1, "Casual")).await);

        assert!(matches!(err, CaptionError::MalformedResponse(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_provider_error_is_surfaced_once() {
        let provider = Arc::new(StubProvider::failing(ProviderError::timeout(
            "stub",
            "deadline",
        )));

        let err = assert_err!(service(&provider).generate(request(3, "Casual")).await);

        assert!(matches!(err, CaptionError::Provider(ProviderError::Timeout { .. })));
        assert!(err.is_retryable());
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_provider() {
        let provider = Arc::new(StubProvider::replying(captions_reply(&["x"], "Casual")));

        for count in [0, 6] {
            let err = assert_err!(service(&provider).generate(request(count, "Casual")).await);
            assert!(matches!(err, CaptionError::InvalidRequest(_)));
        }
        assert_eq!(provider.calls(), 0);
    }

    // ==================== Prompt ====================

    #[tokio::test]
    async fn test_prompt_carries_request_options() {
        let provider = Arc::new(StubProvider::replying(captions_reply(&["a", "b"], "Professional")));
        let req = request(2, "Professional")
            .with_language("Spanish")
            .with_event_context("Graduation")
            .with_hashtags(false);

        assert_ok!(service(&provider).generate(req).await);

        let prompt = provider.last_prompt().expect("provider was called");
        assert!(prompt.contains("generate 2 distinct"));
        assert!(prompt.contains("Spanish"));
        assert!(prompt.contains("Graduation"));
        assert!(prompt.contains("Do not include hashtags in the captions."));
    }
}
