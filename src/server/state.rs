//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::captioning::CaptionService;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Cloned into every worker; the service and the config are behind `Arc`.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Configuration (shared read-only)
    pub config: Arc<Config>,
    pub captions: CaptionService,
}

impl AppState {
    pub fn new(config: Config, captions: CaptionService) -> Self {
        Self {
            config: Arc::new(config),
            captions,
        }
    }
}
