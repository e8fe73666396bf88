//! Caption generation endpoints

use crate::core::types::caption::{
    CaptionRequest, DEFAULT_CAPTION_COUNT, EVENT_CONTEXTS, LANGUAGES, MAX_CAPTION_COUNT,
    MIN_CAPTION_COUNT, WRITING_TONES,
};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::{debug, info};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/captions")
            .route("", web::post().to(create_captions))
            .route("/options", web::get().to(caption_options)),
    );
}

/// Generate captions for an uploaded image
///
/// The decoded image must fit `server.max_image_size`; anything larger is
/// answered with 413 before the provider is called.
pub async fn create_captions(
    state: web::Data<AppState>,
    request: web::Json<CaptionRequest>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let image_size = request.image.decoded_len();
    debug!(
        image_size = %crate::utils::format_bytes(image_size as u64),
        mime_type = request.image.mime_type(),
        "caption request received"
    );

    request
        .image
        .ensure_within(state.config.server.max_image_size)
        .map_err(GatewayError::from)?;

    let response = state.captions.generate(request).await?;
    info!(captions = response.len(), "caption request served");

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Presets for building an upload form
pub async fn caption_options() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(json!({
        "tones": WRITING_TONES,
        "languages": LANGUAGES,
        "eventContexts": EVENT_CONTEXTS,
        "count": {
            "min": MIN_CAPTION_COUNT,
            "max": MAX_CAPTION_COUNT,
            "default": DEFAULT_CAPTION_COUNT,
        },
    })))
}
