//! Provider reply validation and normalization
//!
//! Every entry is checked against the caption schema first. Count is fixed
//! next: excess captions are cut to a prefix, a short list fails. Tone is
//! fixed last: every surviving caption is relabeled with the requested tone.

use serde::Deserialize;
use serde_json::Value;

use super::error::CaptionError;
use crate::core::types::caption::{Caption, CaptionResponse};

/// Corrections applied while normalizing one reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Caption count before truncation, when the reply had too many
    pub truncated_from: Option<usize>,
    /// Number of captions whose tone label was overwritten
    pub tone_corrections: usize,
}

impl NormalizationReport {
    pub fn is_clean(&self) -> bool {
        self.truncated_from.is_none() && self.tone_corrections == 0
    }
}

#[derive(Debug, Deserialize)]
struct RawCaption {
    tone: String,
    text: String,
}

/// Validate a raw provider reply and bring it in line with the request
pub fn normalize_response(
    raw: &str,
    expected: usize,
    tone: &str,
) -> Result<(CaptionResponse, NormalizationReport), CaptionError> {
    let value: Value = serde_json::from_str(strip_code_fence(raw)).map_err(|e| {
        CaptionError::MalformedResponse(format!("reply is not valid JSON: {}", e))
    })?;

    let Value::Object(mut object) = value else {
        return Err(CaptionError::MalformedResponse(
            "reply is not a JSON object".to_string(),
        ));
    };

    let items = match object.remove("captions") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(CaptionError::MalformedResponse(
                "\"captions\" is not an array".to_string(),
            ));
        }
    };

    if items.is_empty() {
        return Err(CaptionError::Incomplete {
            expected,
            actual: 0,
        });
    }

    let mut captions = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<RawCaption>(item).map_err(|e| {
                CaptionError::MalformedResponse(format!("caption {} is invalid: {}", index, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = NormalizationReport::default();
    if captions.len() > expected {
        report.truncated_from = Some(captions.len());
        captions.truncate(expected);
    }

    if captions.len() < expected {
        return Err(CaptionError::Incomplete {
            expected,
            actual: captions.len(),
        });
    }

    let captions: Vec<Caption> = captions
        .into_iter()
        .map(|raw| {
            if raw.tone != tone {
                report.tone_corrections += 1;
            }
            Caption {
                tone: tone.to_string(),
                text: raw.text,
            }
        })
        .collect();

    Ok((CaptionResponse { captions }, report))
}

/// Models occasionally wrap JSON in a markdown fence despite the schema
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Skip the info string, e.g. "json"
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}
