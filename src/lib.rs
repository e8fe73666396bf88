//! # instacaption
//!
//! Social media captions for photos, generated by Google Gemini with
//! schema-constrained output.
//!
//! ## Features
//!
//! - **Exact counts**: always returns the number of captions asked for, or an error
//! - **Tone conformance**: every caption carries the requested tone label
//! - **Single attempt**: one provider call per request, no hidden retries
//! - **Pluggable providers**: the service talks to a [`CaptionProvider`] trait
//! - **HTTP server and CLI**: actix-web API plus a `caption` command
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use instacaption::{CaptionRequest, CaptionService, GeminiConfig, GeminiProvider, ImagePayload};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GeminiProvider::new(GeminiConfig::from_env()?)?;
//!     let service = CaptionService::new(Arc::new(provider));
//!
//!     let image = ImagePayload::from_file("beach.jpg").await?;
//!     let request = CaptionRequest::new(image).with_count(3).with_tone("Witty");
//!
//!     for caption in service.generate(request).await?.captions {
//!         println!("[{}] {}", caption.tone, caption.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use instacaption::{Config, server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(None).await?;
//!     server::run_server(config).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{GatewayError, Result};

pub use crate::core::captioning::{CaptionError, CaptionService, NormalizationReport};
pub use crate::core::providers::gemini::{GeminiConfig, GeminiProvider};
pub use crate::core::providers::unified_provider::ProviderError;
pub use crate::core::share::{ShareTarget, share_links, share_url};
pub use crate::core::traits::{CaptionProvider, ProviderConfig};
pub use crate::core::types::{
    Caption, CaptionRequest, CaptionResponse, ImageError, ImageMimeType, ImagePayload,
    ProviderRequest,
};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Unix timestamp of the build
    pub build_time: &'static str,
    pub git_hash: &'static str,
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
