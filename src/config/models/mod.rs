//! Configuration data models

pub mod logging;
pub mod server;

pub use logging::*;
pub use server::*;

use crate::core::types::image::MAX_IMAGE_BYTES;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default maximum body size in bytes, room for a base64 encoded image
pub fn default_max_body_size() -> usize {
    8 * 1024 * 1024
}

/// Default maximum decoded image size in bytes
pub fn default_max_image_size() -> usize {
    MAX_IMAGE_BYTES
}
