//! Health check and version endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/version", web::get().to(version_info));
}

/// Basic health check endpoint
///
/// Does not contact the provider.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(crate::VERSION),
        provider: Cow::Borrowed(state.captions.provider_name()),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}

/// Build metadata endpoint
pub async fn version_info() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(crate::build_info())))
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthStatus {
    pub status: Cow<'static, str>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: Cow<'static, str>,
    pub provider: Cow<'static, str>,
}
