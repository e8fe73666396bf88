//! Test fixtures
//!
//! Real payloads and reply bodies, no mocks.

use instacaption::{CaptionRequest, ImageMimeType, ImagePayload};
use serde_json::{Value, json};

/// PNG signature, enough to pass base64 and MIME checks
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgo=";

pub fn png_image() -> ImagePayload {
    ImagePayload::from_bytes(ImageMimeType::Png, PNG_BYTES).expect("tiny PNG fits")
}

pub fn request(count: usize, tone: &str) -> CaptionRequest {
    CaptionRequest::new(png_image()).with_count(count).with_tone(tone)
}

/// Raw structured reply with one caption per text, all labeled `tone`
pub fn captions_reply(texts: &[&str], tone: &str) -> String {
    let captions: Vec<Value> = texts
        .iter()
        .map(|text| json!({ "tone": tone, "text": text }))
        .collect();
    json!({ "captions": captions }).to_string()
}

/// `generateContent` success body wrapping `text`
pub fn gemini_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 300, "candidatesTokenCount": 40 }
    })
}

/// Google error envelope
pub fn gemini_error(code: u16, status: &str, message: &str) -> Value {
    json!({
        "error": { "code": code, "message": message, "status": status }
    })
}
