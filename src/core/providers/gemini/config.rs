//! Gemini Configuration Module

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::providers::unified_provider::ProviderError;
use crate::core::traits::ProviderConfig;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini (Google AI Studio) settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key, normally taken from `GEMINI_API_KEY`
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    pub base_url: String,

    pub api_version: String,

    /// Model used for caption generation
    pub model: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Connect timeout in seconds
    pub connect_timeout: u64,

    pub proxy_url: Option<String>,

    /// Sampling temperature, 0.0 to 2.0
    pub temperature: Option<f32>,

    pub max_output_tokens: Option<u32>,

    pub safety_settings: Option<Vec<SafetySetting>>,

    /// Extra headers sent with every request
    pub custom_headers: HashMap<String, String>,

    /// Log request and response bodies at debug level
    pub debug: bool,
}

/// One `safetySettings` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: 60,
            connect_timeout: 10,
            proxy_url: None,
            temperature: None,
            max_output_tokens: None,
            safety_settings: None,
            custom_headers: HashMap::new(),
            debug: false,
        }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Build from process environment
    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    ///
    /// `GEMINI_API_KEY` wins over `GOOGLE_API_KEY`. `GEMINI_MODEL` and
    /// `GEMINI_BASE_URL` override the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_env(&lookup);
        if config.api_key.is_none() {
            return Err(ProviderError::configuration(
                "gemini",
                "No Gemini API key found. Set GEMINI_API_KEY or GOOGLE_API_KEY",
            ));
        }
        Ok(config)
    }

    /// Apply environment overrides on top of existing values
    pub fn apply_env<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("GEMINI_API_KEY").or_else(|| non_empty("GOOGLE_API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = non_empty("GEMINI_MODEL") {
            self.model = model;
        }
        if let Some(base_url) = non_empty("GEMINI_BASE_URL") {
            self.base_url = base_url;
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.request_timeout = timeout_secs;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = Some(settings);
        self
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// `generateContent` URL for the configured model, without the key
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.model
        )
    }
}

impl ProviderConfig for GeminiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            return Err("Gemini API key is required".to_string());
        }

        if self.model.trim().is_empty() {
            return Err("Gemini model must not be empty".to_string());
        }

        if url::Url::parse(&self.base_url).is_err() {
            return Err(format!("Invalid Gemini base URL: {}", self.base_url));
        }

        if self.request_timeout == 0 {
            return Err("Request timeout must be greater than 0".to_string());
        }

        if self.connect_timeout == 0 {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        if self.connect_timeout > self.request_timeout {
            return Err("Connect timeout cannot be greater than request timeout".to_string());
        }

        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(format!(
                    "Temperature must be between 0.0 and 2.0, got {}",
                    temperature
                ));
            }
        }

        Ok(())
    }
}
