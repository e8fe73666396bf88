//! HTTP server core implementation

use crate::config::{Config, CorsConfig, ServerConfig};
use crate::core::captioning::CaptionService;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::error::JsonPayloadError;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::DefaultHeaders,
    web,
};
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
}

impl HttpServer {
    pub fn new(config: Config, captions: CaptionService) -> Self {
        Self {
            config: config.server.clone(),
            state: AppState::new(config, captions),
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = build_cors(&state.config.server.cors);
        let json = json_config(&state.config.server);

        App::new()
            .app_data(state)
            .app_data(json)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", concat!("instacaption/", env!("CARGO_PKG_VERSION")))))
            .configure(routes::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);
        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    fn format_bind_error(error: std::io::Error, bind_addr: &str, port: u16) -> GatewayError {
        if error.kind() == std::io::ErrorKind::AddrInUse {
            GatewayError::server(format!(
                "Failed to bind {}: port {} is already in use.\nStop the other process or set CAPTION_PORT.",
                bind_addr, port
            ))
        } else {
            GatewayError::server(format!("Failed to bind {}: {}", bind_addr, error))
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}

/// JSON extractor limits, with extractor failures rendered as [`GatewayError`]
pub fn json_config(config: &ServerConfig) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(config.max_body_size)
        .error_handler(|err, _req| {
            let error = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    GatewayError::PayloadTooLarge(err.to_string())
                }
                _ => GatewayError::bad_request(err.to_string()),
            };
            error.into()
        })
}

fn build_cors(cors_config: &CorsConfig) -> Cors {
    if !cors_config.enabled {
        return Cors::default();
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(cors_config.max_age as usize);

    if cors_config.allows_all_origins() {
        cors = cors.allow_any_origin();
        if let Err(e) = cors_config.validate() {
            warn!(error = %e, "CORS Configuration Warning");
        }
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
    }

    if cors_config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
