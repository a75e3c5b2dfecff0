//! Data models for content conversion.
//!
//! This module contains the type definitions used by the normalizer:
//! - Destination mode tags and provider grouping (`mode`)
//! - Message and content item types (`message`)
//! - Provider-shaped wire fragments (`anthropic`, `openai`, `mistral`)

// Author: kelexine (https://github.com/kelexine)

pub mod anthropic;
pub mod message;
pub mod mistral;
pub mod mode;
pub mod openai;

pub use message::{ContentItem, ImageParams, Message, MessageContent};
pub use mode::{Mode, Provider};

use serde::{Deserialize, Serialize};

/// A plain text content fragment. All supported providers share this shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    #[serde(rename = "type")]
    pub block_type: String,

    pub text: String,
}

impl TextBlock {
    pub fn new(text: &str) -> Self {
        Self {
            block_type: "text".to_string(),
            text: text.to_string(),
        }
    }
}
