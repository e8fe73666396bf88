//! Requests handed to a generative-model provider

use serde_json::Value;

use super::image::ImagePayload;

/// One structured-output call: rendered instruction, attached image, and the
/// schema the reply must follow
#[derive(Debug, Clone)]
pub struct ProviderRequest {
    pub prompt: String,
    pub image: ImagePayload,
    pub response_schema: Value,
}

impl ProviderRequest {
    pub fn new(prompt: impl Into<String>, image: ImagePayload, response_schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            image,
            response_schema,
        }
    }
}
