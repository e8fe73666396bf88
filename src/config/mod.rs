//! Configuration management
//!
//! Values come from three layers, later ones winning: built-in defaults, a
//! YAML file (`config/caption.yaml` by default) and environment variables.
//!
//! | Variable | Field |
//! |------|------|
//! | `CAPTION_HOST` | `server.host` |
//! | `CAPTION_PORT` | `server.port` |
//! | `CAPTION_MAX_BODY_SIZE` | `server.max_body_size` |
//! | `GEMINI_API_KEY` / `GOOGLE_API_KEY` | `provider.api_key` |
//! | `GEMINI_MODEL` | `provider.model` |
//! | `GEMINI_BASE_URL` | `provider.base_url` |
//! | `CAPTION_LOG_LEVEL` | `logging.level` |
//! | `CAPTION_LOG_FORMAT` | `logging.format` |

pub mod models;

pub use models::*;

use crate::core::providers::gemini::GeminiConfig;
use crate::core::traits::ProviderConfig;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/caption.yaml";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Gemini provider settings
    #[serde(default)]
    pub provider: GeminiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file, without env overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Full load: `.env`, optional file, environment, validation
    ///
    /// An explicit `path` must exist. Without one, `config/caption.yaml` is
    /// used when present and defaults otherwise.
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        if let Ok(env_file) = dotenvy::dotenv() {
            debug!("Loaded environment from {:?}", env_file);
        }

        let mut config = match path {
            Some(path) => Self::from_file(path).await?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH).await?
            }
            None => {
                info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = non_empty("CAPTION_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty("CAPTION_PORT") {
            self.server.port = parse_var("CAPTION_PORT", &port)?;
        }
        if let Some(size) = non_empty("CAPTION_MAX_BODY_SIZE") {
            self.server.max_body_size = parse_var("CAPTION_MAX_BODY_SIZE", &size)?;
        }
        if let Some(level) = non_empty("CAPTION_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = non_empty("CAPTION_LOG_FORMAT") {
            self.logging.format = format.parse().map_err(GatewayError::Config)?;
        }

        self.provider.apply_env(&lookup);
        Ok(())
    }

    /// Validate the entire configuration
    ///
    /// The provider is not checked here, see [`Config::validate_provider`].
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| GatewayError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Check that the provider can be built, e.g. that a key is present
    pub fn validate_provider(&self) -> Result<()> {
        self.provider
            .validate()
            .map_err(|e| GatewayError::Config(format!("Provider config error: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_var<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid value for {}: {}", key, e)))
}
