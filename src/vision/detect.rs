// Image autodetection and construction
// Author: kelexine (https://github.com/kelexine)

use super::models::{unsupported_format, Image, ImageWithCacheControl, MediaSource, VALID_MIME_TYPES};
use crate::cache::ImageCache;
use crate::error::{ConvertError, Result};
use crate::models::ImageParams;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::debug;
use url::Url;

static DATA_URI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data:image/[a-zA-Z]+;base64,").expect("data URI regex"));

/// True iff `s` is an inline base64 data URI for an image.
///
/// Single source of truth for data-URI detection, shared by construction
/// and encoding.
pub fn is_base64(s: &str) -> bool {
    DATA_URI_RE.is_match(s)
}

/// True iff `s` parses as an absolute http(s) URL.
pub(crate) fn is_http_url(s: &str) -> bool {
    Url::parse(s)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Detect the image container format from magic bytes.
pub fn sniff_media_type(data: &[u8]) -> Option<&'static str> {
    if data.len() < 12 {
        return None;
    }

    if data.starts_with(b"\xFF\xD8\xFF") {
        Some("image/jpeg")
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("image/png")
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

impl Image {
    /// Create an Image from a `data:image/...;base64,` URI.
    pub fn from_base64(data: &str) -> Result<Image> {
        if !is_base64(data) {
            return Err(ConvertError::InvalidEncoding("invalid base64 data".to_string()));
        }

        // Split data URI into header and encoded parts
        let (header, encoded) = data
            .split_once(',')
            .ok_or_else(|| ConvertError::InvalidEncoding("invalid base64 data URI format".to_string()))?;

        // Extract media type from header
        let type_parts: Vec<&str> = header.split(':').collect();
        if type_parts.len() != 2 {
            return Err(ConvertError::InvalidEncoding("invalid base64 data URI header".to_string()));
        }
        let media_type = type_parts[1].split(';').next().unwrap_or("");

        if !VALID_MIME_TYPES.contains(&media_type) {
            return Err(unsupported_format(media_type));
        }

        Ok(Image::new(
            MediaSource::Locator(data.to_string()),
            media_type.to_string(),
            Some(encoded.to_string()),
        ))
    }

    /// Create an Image from raw base64 data with no data-URI wrapper.
    ///
    /// Declines (None) unless the payload sniffs as a known image container
    /// and the MIME guess from the string itself lands in the supported set.
    /// Base64 text carries no extension, so the guess usually fails.
    /// TODO: decide whether the sniffed container type should win instead.
    pub fn from_raw_base64(data: &str) -> Option<Image> {
        let decoded = base64::engine::general_purpose::STANDARD.decode(data).ok()?;
        sniff_media_type(&decoded)?;

        let media_type = mime_guess::from_path(data).first_raw()?;
        if !VALID_MIME_TYPES.contains(&media_type) {
            return None;
        }

        Some(Image::new(
            MediaSource::Locator(data.to_string()),
            media_type.to_string(),
            Some(data.to_string()),
        ))
    }
}

impl ImageWithCacheControl {
    /// Create a cache-controlled image from raw tagged parameters.
    ///
    /// The base image is resolved through autodetection; returns None when
    /// the source is not recognizable as an image.
    pub fn from_image_params(params: &ImageParams, images: &ImageCache) -> Option<Self> {
        let image = autodetect(&MediaSource::Locator(params.source.clone()), images)?;
        Some(Self {
            image,
            cache_control: params.cache_control.clone(),
        })
    }
}

/// Result of [`autodetect_safely`]: either a constructed image or the
/// original text for call sites that accept both interchangeably.
#[derive(Debug, Clone)]
pub enum Detected {
    Image(Image),
    Text(String),
}

/// Attempt to autodetect an image from a source string or path.
///
/// Ordered attempts, first success short-circuits: data URI, absolute
/// http(s) URL, existing file path, raw base64. A path source goes straight
/// to the file constructor. Best-effort by contract: every constructor
/// failure collapses to None, nothing propagates.
pub fn autodetect(source: &MediaSource, images: &ImageCache) -> Option<Image> {
    match source {
        MediaSource::Locator(s) => {
            if is_base64(s) {
                Image::from_base64(s).ok()
            } else if is_http_url(s) {
                images.from_url(s).ok()
            } else if Path::new(s).is_file() {
                images.from_path(Path::new(s)).ok()
            } else {
                Image::from_raw_base64(s)
            }
        }
        MediaSource::Path(path) => images.from_path(path).ok(),
    }
}

/// Safely attempt to autodetect an image, falling back to the original text.
pub fn autodetect_safely(source: &str, images: &ImageCache) -> Detected {
    match autodetect(&MediaSource::Locator(source.to_string()), images) {
        Some(image) => Detected::Image(image),
        None => {
            debug!("No image detected, passing through as text");
            Detected::Text(source.to_string())
        }
    }
}
