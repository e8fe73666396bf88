//! Generative-model providers
//!
//! Every provider implements [`CaptionProvider`](crate::core::traits::CaptionProvider)
//! and reports failures as [`ProviderError`].

pub mod gemini;
pub mod unified_provider;

pub use gemini::GeminiProvider;
pub use unified_provider::ProviderError;
