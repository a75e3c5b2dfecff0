//! OpenAI Chat Completions API content fragment definitions.
//!
//! OpenAI accepts either a remote URL or an inline `data:` URI inside the
//! same `image_url` shape.

// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Nested URL holder inside an `image_url` block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

/// An OpenAI image content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUrlBlock {
    #[serde(rename = "type")]
    pub block_type: String,

    pub image_url: ImageUrl,
}

impl ImageUrlBlock {
    /// Build a URL passthrough block. No image bytes are transferred.
    pub fn from_url(url: &str) -> Self {
        Self {
            block_type: "image_url".to_string(),
            image_url: ImageUrl {
                url: url.to_string(),
            },
        }
    }

    /// Build an inline block wrapping the payload in a `data:` URI.
    pub fn from_data_uri(media_type: &str, data: &str) -> Self {
        Self {
            block_type: "image_url".to_string(),
            image_url: ImageUrl {
                url: format!("data:{};base64,{}", media_type, data),
            },
        }
    }
}
