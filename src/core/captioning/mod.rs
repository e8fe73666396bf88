//! Caption generation
//!
//! [`CaptionService`] renders the prompt, calls the provider once and
//! normalizes the reply so the caller always gets exactly the requested
//! number of captions, each labeled with the requested tone.

pub mod error;
pub mod normalize;
pub mod prompt;
pub mod service;

pub use error::CaptionError;
pub use normalize::{NormalizationReport, normalize_response};
pub use prompt::render_caption_prompt;
pub use service::CaptionService;
