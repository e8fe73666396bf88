//! Server builder and run_server function

use crate::config::Config;
use crate::core::captioning::CaptionService;
use crate::core::providers::gemini::GeminiProvider;
use crate::core::traits::CaptionProvider;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder
///
/// Without an explicit provider, a [`GeminiProvider`] is built from
/// `config.provider`.
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    provider: Option<Arc<dyn CaptionProvider>>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_provider(mut self, provider: Arc<dyn CaptionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        let provider = match self.provider {
            Some(provider) => provider,
            None => {
                config.validate_provider()?;
                Arc::new(GeminiProvider::new(config.provider.clone())?)
            }
        };

        Ok(HttpServer::new(config, CaptionService::new(provider)))
    }
}

/// Build and run the server until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    info!(
        "Starting caption server with model {} at http://{}",
        config.provider.model,
        config.server.address()
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /version - Build information");
    info!("   GET  /v1/captions/options - Form presets");
    info!("   POST /v1/captions - Generate captions");

    ServerBuilder::new().with_config(config).build()?.start().await
}
