// Per-provider image encoding
// Author: kelexine (https://github.com/kelexine)

use super::detect::is_base64;
use super::models::{
    unsupported_format, validate_image_size, Image, ImageFormat, ImageWithCacheControl,
    MediaSource,
};
use crate::cache::ImageCache;
use crate::error::{ConvertError, Result};
use crate::models::{anthropic, mistral, openai, Provider};
use base64::Engine;
use serde_json::Value;

impl Image {
    /// Inline payload: the cached/eager data, or the payload extracted from
    /// a data-URI source.
    fn inline_data(&self) -> Result<&str> {
        if let Some(data) = self.data.get() {
            return Ok(data);
        }
        if let MediaSource::Locator(s) = &self.source {
            if is_base64(s) {
                if let Some((_, payload)) = s.split_once(',') {
                    return Ok(payload);
                }
            }
        }
        Err(ConvertError::MissingData(
            "image data is missing for base64 encoding".to_string(),
        ))
    }

    /// Encode for the Anthropic Messages API.
    ///
    /// Anthropic only takes inline data, so a bare remote URL is fetched
    /// here on first use; the payload is cached on the instance and in the
    /// image cache, making repeat calls idempotent.
    pub fn to_anthropic(&self, images: &ImageCache) -> Result<anthropic::ImageBlock> {
        let data = match &self.source {
            MediaSource::Locator(url) if self.source.is_remote_url() && self.data.get().is_none() => {
                self.data.get_or_try_init(|| images.url_to_base64(url))?
            }
            _ => self.data.get().ok_or_else(|| {
                ConvertError::MissingData("image data is missing for base64 encoding".to_string())
            })?,
        };

        Ok(anthropic::ImageBlock::base64(&self.media_type, data))
    }

    /// Encode for the OpenAI Chat Completions API.
    ///
    /// Bare remote URLs pass through untouched with no fetch; everything
    /// else is emitted as an inline `data:` URI.
    pub fn to_openai(&self) -> Result<openai::ImageUrlBlock> {
        if let MediaSource::Locator(url) = &self.source {
            if self.source.is_remote_url() && !is_base64(url) {
                return Ok(openai::ImageUrlBlock::from_url(url));
            }
        }

        let data = self.inline_data()?;
        Ok(openai::ImageUrlBlock::from_data_uri(&self.media_type, data))
    }

    /// Encode for the Mistral chat API.
    ///
    /// Re-validates MIME type and size independently of whatever check ran
    /// at construction; Mistral's limits are the tightest.
    pub fn to_mistral(&self) -> Result<mistral::ImageUrlBlock> {
        ImageFormat::from_mime_type(&self.media_type)
            .ok_or_else(|| unsupported_format(&self.media_type))?;

        if let Some(data) = self.data.get() {
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(data)
                .map_err(|e| ConvertError::InvalidEncoding(format!("invalid base64 image data: {}", e)))?;
            validate_image_size(decoded.len() as u64)?;
        }

        if let MediaSource::Locator(url) = &self.source {
            if self.source.is_remote_url() && !is_base64(url) {
                return Ok(mistral::ImageUrlBlock::from_url(url));
            }
        }

        let data = self.inline_data()?;
        Ok(mistral::ImageUrlBlock::from_data_uri(&self.media_type, data))
    }
}

impl ImageWithCacheControl {
    /// Anthropic encoding with the caching directive attached.
    ///
    /// Pure decorating override: the base block is unchanged apart from the
    /// added `cache_control` key. No other encoder is affected.
    pub fn to_anthropic(&self, images: &ImageCache) -> Result<anthropic::ImageBlock> {
        let mut block = self.image.to_anthropic(images)?;
        if let Some(cache_control) = &self.cache_control {
            if !cache_control.is_empty() {
                block.cache_control = Some(cache_control.clone());
            }
        }
        Ok(block)
    }
}

/// Closed set of image encoders, one per provider with a defined encoding.
///
/// The content normalizer looks the encoder up by provider tag instead of
/// re-testing mode membership at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoder {
    OpenAi,
    Anthropic,
    Mistral,
}

impl ImageEncoder {
    /// Look up the encoder for a destination provider.
    ///
    /// Gemini has no encoder; asking for one fails here, at the dispatch
    /// layer, never inside an encoder.
    pub fn for_provider(provider: Provider) -> Result<Self> {
        match provider {
            Provider::OpenAi => Ok(ImageEncoder::OpenAi),
            Provider::Anthropic => Ok(ImageEncoder::Anthropic),
            Provider::Mistral => Ok(ImageEncoder::Mistral),
            Provider::Gemini => Err(ConvertError::UnsupportedProvider(
                "Gemini is not supported yet".to_string(),
            )),
        }
    }

    /// Encode an image into the provider-shaped JSON fragment.
    pub fn encode(self, image: &ImageWithCacheControl, images: &ImageCache) -> Result<Value> {
        let value = match self {
            ImageEncoder::OpenAi => serde_json::to_value(image.image().to_openai()?)?,
            ImageEncoder::Anthropic => serde_json::to_value(image.to_anthropic(images)?)?,
            ImageEncoder::Mistral => serde_json::to_value(image.image().to_mistral()?)?,
        };
        Ok(value)
    }
}
