//! Configuration loading tests
//!
//! Files are real temp files; environment overrides go through a lookup
//! closure so the process environment is never touched.

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use instacaption::config::LogFormat;
    use instacaption::{Config, GatewayError};
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[tokio::test]
    async fn test_file_then_env_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "server:\n  port: 9000\nprovider:\n  model: gemini-1.5-flash\n  temperature: 0.7\nlogging:\n  level: debug"
        )
        .unwrap();

        let mut config = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.provider.model, "gemini-1.5-flash");
        assert_eq!(config.provider.temperature, Some(0.7));

        assert_ok!(config.apply_env_overrides(lookup(&[
            ("CAPTION_PORT", "9100"),
            ("CAPTION_LOG_FORMAT", "json"),
            ("GEMINI_API_KEY", "from-env"),
            ("GEMINI_MODEL", "gemini-2.0-flash-lite"),
        ])));

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.provider.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.provider.model, "gemini-2.0-flash-lite");
        assert_ok!(config.validate());
        assert_ok!(config.validate_provider());
    }

    #[tokio::test]
    async fn test_explicit_missing_file_fails() {
        let err = assert_err!(Config::load(Some(std::path::Path::new("/nonexistent/caption.yaml"))).await);
        assert!(matches!(err, GatewayError::Config(_)));
    }

    #[test]
    fn test_provider_needs_key() {
        let config = Config::default();
        assert_ok!(config.validate());
        let err = assert_err!(config.validate_provider());
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_bad_port_override_is_reported() {
        let mut config = Config::default();
        let err = assert_err!(config.apply_env_overrides(lookup(&[("CAPTION_PORT", "eighty")])));
        assert!(err.to_string().contains("CAPTION_PORT"));
    }

    #[test]
    fn test_yaml_never_contains_key() {
        let mut config = Config::default();
        config.provider.api_key = Some("secret-key".to_string());

        let yaml = assert_ok!(config.to_yaml());
        assert!(!yaml.contains("secret-key"));

        let parsed = assert_ok!(Config::from_yaml(&yaml));
        assert_eq!(parsed.provider.api_key, None);
        assert_eq!(parsed.server, config.server);
    }

    #[test]
    fn test_unknown_log_format_is_rejected() {
        let mut config = Config::default();
        assert!(
            config
                .apply_env_overrides(lookup(&[("CAPTION_LOG_FORMAT", "xml")]))
                .is_err()
        );
    }
}
