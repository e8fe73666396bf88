//! Provider trait definitions
//!
//! The caption service talks to a generative model only through
//! [`CaptionProvider`]. Implementations own transport, authentication and the
//! mapping of upstream failures onto [`ProviderError`].

use async_trait::async_trait;
use std::fmt::Debug;

use crate::core::providers::unified_provider::ProviderError;
use crate::core::types::requests::ProviderRequest;

/// A generative model that can answer one structured-output request
///
/// # Contract
///
/// - One call to [`generate_structured`](Self::generate_structured) issues at
///   most one upstream request. Implementations must not retry.
/// - On success the raw text of the model's structured reply is returned
///   untouched. Schema checks belong to the caller.
/// - Transport, authentication, quota and safety failures are reported as
///   [`ProviderError`].
///
/// # Example
///
/// ```rust,ignore
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct Canned(String);
///
/// #[async_trait]
/// impl CaptionProvider for Canned {
///     fn name(&self) -> &'static str {
///         "canned"
///     }
///
///     async fn generate_structured(
///         &self,
///         _request: &ProviderRequest,
///     ) -> Result<String, ProviderError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    /// Provider identifier used in logs and errors
    fn name(&self) -> &'static str;

    /// Send the prompt and image, returning the raw structured reply
    async fn generate_structured(&self, request: &ProviderRequest)
    -> Result<String, ProviderError>;
}

/// Provider configuration trait
///
/// All provider configurations implement this so they can be validated
/// before a client is built.
pub trait ProviderConfig: Send + Sync + Clone + Debug + 'static {
    /// Validate configuration
    ///
    /// Returns `Err` with a human readable message when a required field is
    /// missing or a value is out of range.
    fn validate(&self) -> Result<(), String>;
}
