//! Anthropic Messages API content fragment definitions.
//!
//! These types are serialized into the `content` array of an Anthropic
//! Messages API request. Anthropic only accepts inline base64 image data,
//! so there is no URL passthrough shape here.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Image source for vision content
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ImageSource {
    #[serde(rename = "base64")]
    Base64 { media_type: String, data: String },
}

/// An Anthropic image content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageBlock {
    #[serde(rename = "type")]
    pub block_type: String,

    pub source: ImageSource,

    /// Prompt caching directive, attached only for cache-controlled images.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<HashMap<String, String>>,
}

impl ImageBlock {
    /// Build an inline base64 image block.
    pub fn base64(media_type: &str, data: &str) -> Self {
        Self {
            block_type: "image".to_string(),
            source: ImageSource::Base64 {
                media_type: media_type.to_string(),
                data: data.to_string(),
            },
            cache_control: None,
        }
    }
}
