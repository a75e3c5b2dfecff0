// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use crate::error::{ConvertError, Result};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::PathBuf;

/// Supported image formats. This is also exactly the set Mistral accepts,
/// and the file constructor enforces it for every destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Try to detect format from a MIME type. Exact match only.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/gif" => Some(ImageFormat::Gif),
            "image/webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

/// MIME types accepted for image content.
pub const VALID_MIME_TYPES: [&str; 4] =
    ["image/jpeg", "image/png", "image/gif", "image/webp"];

/// Maximum image payload in decoded bytes. 10MB, Mistral's ceiling.
pub const MAX_IMAGE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Validate a decoded payload length against the provider ceiling.
pub fn validate_image_size(data_len: u64) -> Result<()> {
    if data_len > MAX_IMAGE_SIZE_BYTES {
        return Err(ConvertError::size_limit(data_len, MAX_IMAGE_SIZE_BYTES));
    }
    Ok(())
}

pub(crate) fn unsupported_format(media_type: &str) -> ConvertError {
    ConvertError::UnsupportedFormat {
        media_type: media_type.to_string(),
        supported: VALID_MIME_TYPES.join(", "),
    }
}

/// Where a piece of media came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    /// URL, data URI or raw base64 string, kept verbatim.
    Locator(String),
    /// Local filesystem path.
    Path(PathBuf),
}

impl MediaSource {
    /// True for bare http(s) URLs. Data URIs and raw base64 never match.
    pub fn is_remote_url(&self) -> bool {
        matches!(
            self,
            MediaSource::Locator(s) if s.starts_with("http://") || s.starts_with("https://")
        )
    }

    /// The locator string, if this source is not a filesystem path.
    pub fn as_locator(&self) -> Option<&str> {
        match self {
            MediaSource::Locator(s) => Some(s),
            MediaSource::Path(_) => None,
        }
    }
}

/// An image reference with a resolved MIME type and a possibly lazy payload.
///
/// Constructed through exactly one of the named constructors (data URI, raw
/// base64, URL, file path). Immutable afterwards except for the write-once
/// payload fill performed by encoders that need inline bytes.
#[derive(Debug, Clone)]
pub struct Image {
    pub(crate) source: MediaSource,
    pub(crate) media_type: String,
    pub(crate) data: OnceCell<String>,
}

impl Image {
    pub(crate) fn new(source: MediaSource, media_type: String, data: Option<String>) -> Self {
        let cell = OnceCell::new();
        if let Some(data) = data {
            let _ = cell.set(data);
        }
        Self {
            source,
            media_type,
            data: cell,
        }
    }

    /// The original source reference, retained for re-derivation and for
    /// providers that accept passthrough URLs.
    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    /// Resolved MIME type; always one of [`VALID_MIME_TYPES`].
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Base64 payload, if already present or previously fetched.
    pub fn data(&self) -> Option<&str> {
        self.data.get().map(String::as_str)
    }
}

/// An audio reference. Data holder only: no provider encoders exist yet.
#[derive(Debug, Clone)]
pub struct Audio {
    /// URL or file path of the audio.
    pub source: MediaSource,
    /// Base64 encoded audio data.
    pub data: Option<String>,
}

/// Image with Anthropic prompt caching support.
///
/// Always derived from an already-constructed [`Image`], never built from a
/// raw source directly. Only the Anthropic encoding is affected.
#[derive(Debug, Clone)]
pub struct ImageWithCacheControl {
    pub(crate) image: Image,
    pub(crate) cache_control: Option<HashMap<String, String>>,
}

impl ImageWithCacheControl {
    /// The underlying image.
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// The caching directive, if any.
    pub fn cache_control(&self) -> Option<&HashMap<String, String>> {
        self.cache_control.as_ref()
    }
}

impl From<Image> for ImageWithCacheControl {
    fn from(image: Image) -> Self {
        Self {
            image,
            cache_control: None,
        }
    }
}
