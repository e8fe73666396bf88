//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Room for the data URL prefix and the other request fields
const BODY_HEADROOM: usize = 64 * 1024;

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    pub workers: Option<usize>,
    /// Maximum request body size in bytes
    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,
    /// Maximum decoded image size in bytes
    #[serde(default = "default_max_image_size")]
    pub max_image_size: usize,
    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            max_body_size: default_max_body_size(),
            max_image_size: default_max_image_size(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Smallest body limit that still admits a base64 encoded image of
    /// `max_image_size` plus the surrounding JSON fields
    pub fn min_body_size(&self) -> usize {
        self.max_image_size
            .div_ceil(3)
            .saturating_mul(4)
            .saturating_add(BODY_HEADROOM)
    }

    /// Validate server configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        if self.max_image_size == 0 {
            return Err("Max image size cannot be 0".to_string());
        }

        let required = self.min_body_size();
        if self.max_body_size < required {
            return Err(format!(
                "Max body size ({}) is smaller than {} bytes needed to carry a base64 encoded image of max image size ({})",
                self.max_body_size, required, self.max_image_size
            ));
        }

        if self.workers == Some(0) {
            return Err("Workers cannot be 0".to_string());
        }

        self.cors.validate()
    }
}

/// CORS configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Enable CORS
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins (empty means allow all)
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    /// Max age for preflight requests
    #[serde(default = "default_cors_max_age")]
    pub max_age: u32,
    /// Allow credentials
    #[serde(default)]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec![],
            max_age: default_cors_max_age(),
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Check if CORS allows all origins
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }

    /// Validate CORS configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled {
            if self.allows_all_origins() && self.allow_credentials {
                return Err(
                    "CORS cannot allow all origins (*) when credentials are enabled".to_string(),
                );
            }

            if self.allows_all_origins() {
                warn!("CORS allows all origins. This may be insecure for production.");
            }
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_cors_max_age() -> u32 {
    3600
}
