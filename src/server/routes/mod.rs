//! HTTP route modules

pub mod captions;
pub mod health;

use actix_web::web;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    health::configure_routes(cfg);
    captions::configure_routes(cfg);
}
