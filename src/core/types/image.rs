//! Image payloads attached to caption requests
//!
//! Images travel as `data:<mime>;base64,<data>` URIs on the wire. Only the
//! four formats the upload form accepts are allowed, and callers that read
//! raw bytes enforce the 5 MiB size ceiling before a request is built.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Maximum decoded image size accepted from callers (5 MiB)
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Image formats accepted for captioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Webp,
    Gif,
}

impl ImageMimeType {
    pub const ALL: [ImageMimeType; 4] = [
        ImageMimeType::Jpeg,
        ImageMimeType::Png,
        ImageMimeType::Webp,
        ImageMimeType::Gif,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
            ImageMimeType::Webp => "image/webp",
            ImageMimeType::Gif => "image/gif",
        }
    }

    /// Guess the format from a file extension (`jpg`, `jpeg`, `png`, `webp`, `gif`)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageMimeType::Jpeg),
            "png" => Some(ImageMimeType::Png),
            "webp" => Some(ImageMimeType::Webp),
            "gif" => Some(ImageMimeType::Gif),
            _ => None,
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageMimeType {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|mime| mime.as_str() == normalized)
            .ok_or_else(|| ImageError::UnsupportedType(s.to_string()))
    }
}

/// Errors raised while building or checking an image payload
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("Invalid file type. Please upload an image (JPEG, PNG, WEBP, GIF).")]
    UnsupportedType(String),

    #[error("File is too large. Maximum size is {}MB.", .limit / (1024 * 1024))]
    TooLarge { size: usize, limit: usize },

    #[error("Image data URI is malformed: {0}")]
    MalformedDataUri(String),

    #[error("Image data is not valid base64: {0}")]
    InvalidBase64(String),

    #[error("Failed to read the image file: {0}")]
    Read(String),
}

/// A base64 encoded image with its declared MIME type
///
/// The declared type is kept verbatim so that an unsupported upload can be
/// reported by request validation instead of failing deserialization.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImagePayload {
    mime_type: String,
    data: String,
}

impl ImagePayload {
    /// Wrap already encoded data without checking it
    pub fn from_base64(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Parse a `data:<mime>;base64,<data>` URI
    pub fn from_data_uri(uri: &str) -> Result<Self, ImageError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| ImageError::MalformedDataUri("missing 'data:' scheme".to_string()))?;

        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| ImageError::MalformedDataUri("missing ',' separator".to_string()))?;

        let mut params = header.split(';');
        let mime_type = params.next().unwrap_or_default().trim();
        if mime_type.is_empty() {
            return Err(ImageError::MalformedDataUri(
                "missing MIME type".to_string(),
            ));
        }
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(ImageError::MalformedDataUri(
                "only base64 encoded data URIs are supported".to_string(),
            ));
        }

        Ok(Self {
            mime_type: mime_type.to_ascii_lowercase(),
            data: data.trim().to_string(),
        })
    }

    /// Encode raw bytes, enforcing [`MAX_IMAGE_BYTES`]
    pub fn from_bytes(mime_type: ImageMimeType, bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size: bytes.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }

        Ok(Self {
            mime_type: mime_type.as_str().to_string(),
            data: STANDARD.encode(bytes),
        })
    }

    /// Read an image file, detecting its type from the extension
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let mime_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(ImageMimeType::from_extension)
            .ok_or_else(|| ImageError::UnsupportedType(path.display().to_string()))?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| ImageError::Read(format!("{}: {}", path.display(), e)))?;
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge {
                size,
                limit: MAX_IMAGE_BYTES,
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ImageError::Read(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(mime_type, &bytes)
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Base64 encoded image bytes
    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decoded size computed from the encoded length
    pub fn decoded_len(&self) -> usize {
        let padding = self
            .data
            .bytes()
            .rev()
            .take_while(|b| *b == b'=')
            .count()
            .min(2);
        (self.data.len() * 3 / 4).saturating_sub(padding)
    }

    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| ImageError::InvalidBase64(e.to_string()))
    }

    /// Check the declared type against the allowlist and that the data decodes
    pub fn validate(&self) -> Result<ImageMimeType, ImageError> {
        let mime = self.mime_type.parse::<ImageMimeType>()?;
        if self.data.is_empty() {
            return Err(ImageError::InvalidBase64("image data is empty".to_string()));
        }
        self.decode()?;
        Ok(mime)
    }

    /// Reject payloads whose decoded size exceeds `limit`
    pub fn ensure_within(&self, limit: usize) -> Result<(), ImageError> {
        let size = self.decoded_len();
        if size > limit {
            return Err(ImageError::TooLarge { size, limit });
        }
        Ok(())
    }
}

impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("encoded_len", &self.data.len())
            .finish()
    }
}

impl TryFrom<String> for ImagePayload {
    type Error = ImageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_data_uri(&value)
    }
}

impl From<ImagePayload> for String {
    fn from(value: ImagePayload) -> Self {
        value.to_data_uri()
    }
}
