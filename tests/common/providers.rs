//! Provider test utilities
//!
//! A provider that answers from a fixed script so the service and server can
//! be driven end to end without network access.

use async_trait::async_trait;
use instacaption::{CaptionProvider, ProviderError, ProviderRequest};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned-reply provider
#[derive(Debug)]
pub struct StubProvider {
    reply: Result<String, ProviderError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubProvider {
    pub fn replying(raw: impl Into<String>) -> Self {
        Self::with_result(Ok(raw.into()))
    }

    pub fn failing(error: ProviderError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(reply: Result<String, ProviderError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Number of provider calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl CaptionProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn generate_structured(
        &self,
        request: &ProviderRequest,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().expect("prompt lock") = Some(request.prompt.clone());
        self.reply.clone()
    }
}
