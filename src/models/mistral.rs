//! Mistral chat API content fragment definitions.
//!
//! Mistral uses the same `image_url` block type as OpenAI but with flat
//! `url`/`data` fields instead of a nested object.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// A Mistral image content block. Exactly one of `url` and `data` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrlBlock {
    #[serde(rename = "type")]
    pub block_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl ImageUrlBlock {
    /// Build a URL passthrough block.
    pub fn from_url(url: &str) -> Self {
        Self {
            block_type: "image_url".to_string(),
            url: Some(url.to_string()),
            data: None,
        }
    }

    /// Build an inline block wrapping the payload in a `data:` URI.
    pub fn from_data_uri(media_type: &str, data: &str) -> Self {
        Self {
            block_type: "image_url".to_string(),
            url: None,
            data: Some(format!("data:{};base64,{}", media_type, data)),
        }
    }
}
