//! Google Gemini Provider
//!
//! Structured-output captioning through the Google AI Studio
//! `generateContent` API. The image is sent inline next to the prompt and the
//! reply is constrained with `responseSchema`.

pub mod client;
pub mod config;
pub mod error;
pub mod provider;

pub use client::GeminiClient;
pub use config::{GeminiConfig, SafetySetting};
pub use error::GeminiErrorMapper;
pub use provider::GeminiProvider;

/// Create a provider from `GEMINI_API_KEY` / `GOOGLE_API_KEY`
pub fn create_gemini_provider_from_env() -> Result<GeminiProvider, crate::ProviderError> {
    let config = GeminiConfig::from_env()?;
    GeminiProvider::new(config)
}
