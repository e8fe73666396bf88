//! Caption request and response types
//!
//! Wire format is camelCase JSON. The field names used by the original web
//! form (`photoDataUri`, `numberOfCaptions`, `writingTone`, `eventType`) are
//! accepted as aliases.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::image::ImagePayload;
use crate::core::captioning::error::CaptionError;

pub const MIN_CAPTION_COUNT: usize = 1;
pub const MAX_CAPTION_COUNT: usize = 5;
pub const DEFAULT_CAPTION_COUNT: usize = 3;
pub const DEFAULT_TONE: &str = "Casual";
pub const DEFAULT_LANGUAGE: &str = "English";

/// Event context that carries no information and is dropped from requests
pub const GENERAL_EVENT_CONTEXT: &str = "General";

/// Tones offered by the upload form. Any string is accepted by the service.
pub const WRITING_TONES: &[&str] = &[
    "Casual",
    "Professional",
    "Witty",
    "Fun",
    "Engaging",
    "Informative",
    "Persuasive",
    "Storytelling",
];

/// Languages offered by the upload form
pub const LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "French",
    "German",
    "Italian",
    "Portuguese",
    "Hindi",
    "Japanese",
    "Chinese (Simplified)",
];

/// Event contexts offered by the upload form
pub const EVENT_CONTEXTS: &[&str] = &[
    "General",
    "Wedding Ceremony",
    "Birthday Party",
    "Family Walkout",
    "Graduation",
    "Vacation Trip",
    "Business Meeting",
    "Conference",
    "Product Launch",
    "Festival",
    "Concert",
    "Sports Event",
    "Casual Outing",
    "Food / Dining",
    "Nature / Scenery",
    "Selfie",
    "Pet Photo",
];

fn default_count() -> usize {
    DEFAULT_CAPTION_COUNT
}

fn default_tone() -> String {
    DEFAULT_TONE.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_true() -> bool {
    true
}

/// Parameters for one caption generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    /// Image to caption
    #[serde(alias = "photoDataUri")]
    pub image: ImagePayload,

    /// Number of captions, 1 to 5
    #[serde(default = "default_count", alias = "numberOfCaptions")]
    pub count: usize,

    /// Tone label every caption must carry
    #[serde(default = "default_tone", alias = "writingTone")]
    pub tone: String,

    #[serde(default = "default_true")]
    pub include_hashtags: bool,

    #[serde(default = "default_true")]
    pub include_emojis: bool,

    #[serde(default = "default_language")]
    pub language: String,

    /// Occasion the photo belongs to, e.g. "Birthday Party"
    #[serde(default, alias = "eventType", skip_serializing_if = "Option::is_none")]
    pub event_context: Option<String>,

    /// Free-form hint from the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_hint: Option<String>,
}

impl CaptionRequest {
    /// Create a request with default parameters
    pub fn new(image: ImagePayload) -> Self {
        Self {
            image,
            count: DEFAULT_CAPTION_COUNT,
            tone: default_tone(),
            include_hashtags: true,
            include_emojis: true,
            language: default_language(),
            event_context: None,
            custom_hint: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_hashtags(mut self, enabled: bool) -> Self {
        self.include_hashtags = enabled;
        self
    }

    pub fn with_emojis(mut self, enabled: bool) -> Self {
        self.include_emojis = enabled;
        self
    }

    pub fn with_event_context(mut self, event: impl Into<String>) -> Self {
        self.event_context = Some(event.into());
        self
    }

    pub fn with_custom_hint(mut self, hint: impl Into<String>) -> Self {
        self.custom_hint = Some(hint.into());
        self
    }

    /// Drop optional fields that carry no information
    ///
    /// Event context is dropped when blank or "General"; the hint is trimmed
    /// and dropped when empty.
    pub fn sanitized(mut self) -> Self {
        self.event_context = self
            .event_context
            .map(|event| event.trim().to_string())
            .filter(|event| {
                !event.is_empty() && !event.eq_ignore_ascii_case(GENERAL_EVENT_CONTEXT)
            });
        self.custom_hint = self
            .custom_hint
            .map(|hint| hint.trim().to_string())
            .filter(|hint| !hint.is_empty());
        self
    }

    /// Check bounds and the image payload
    pub fn validate(&self) -> Result<(), CaptionError> {
        if !(MIN_CAPTION_COUNT..=MAX_CAPTION_COUNT).contains(&self.count) {
            return Err(CaptionError::InvalidRequest(format!(
                "count must be between {} and {}, got {}",
                MIN_CAPTION_COUNT, MAX_CAPTION_COUNT, self.count
            )));
        }

        if self.tone.trim().is_empty() {
            return Err(CaptionError::InvalidRequest(
                "tone must not be empty".to_string(),
            ));
        }

        if self.language.trim().is_empty() {
            return Err(CaptionError::InvalidRequest(
                "language must not be empty".to_string(),
            ));
        }

        self.image.validate()?;
        Ok(())
    }
}

/// One generated caption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caption {
    pub tone: String,
    pub text: String,
}

/// Normalized provider reply
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaptionResponse {
    pub captions: Vec<Caption>,
}

impl CaptionResponse {
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }

    pub fn first_text(&self) -> Option<&str> {
        self.captions.first().map(|c| c.text.as_str())
    }
}

/// Structured output schema sent to the provider
///
/// Uses the OpenAPI subset understood by Gemini's `responseSchema`.
pub fn caption_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "captions": {
                "type": "ARRAY",
                "description": "Generated captions, each with the requested tone.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "tone": {
                            "type": "STRING",
                            "description": "The tone of the caption. Must match the requested tone."
                        },
                        "text": {
                            "type": "STRING",
                            "description": "The generated caption text."
                        }
                    },
                    "required": ["tone", "text"]
                }
            }
        },
        "required": ["captions"]
    })
}
