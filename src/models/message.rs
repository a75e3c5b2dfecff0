//! Message and content item types consumed by the normalizer.
//!
//! A [`Message`] keeps the raw ordered field map exactly as it arrived, plus
//! a typed view of the `content` field when it has a convertible shape.
//! Everything else passes through conversion untouched.

// Author: kelexine (https://github.com/kelexine)

use crate::cache::ImageCache;
use crate::error::{ConvertError, Result};
use crate::vision::{Detected, Image, ImageWithCacheControl};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Raw tagged image parameters as they appear in incoming content lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageParams {
    #[serde(rename = "type")]
    pub param_type: String,

    /// URL, file path, data URI or raw base64 payload.
    pub source: String,

    /// Optional Anthropic prompt caching directive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_control: Option<HashMap<String, String>>,
}

/// A single item inside a message content list.
#[derive(Debug, Clone)]
pub enum ContentItem {
    /// Plain text, converted to a `{type: "text", ...}` fragment.
    Text(String),
    /// A constructed image, encoded per destination provider.
    Image(ImageWithCacheControl),
    /// A pre-shaped provider fragment, passed through unmodified.
    Fragment(Map<String, Value>),
}

/// The content field of a message.
#[derive(Debug, Clone)]
pub enum MessageContent {
    Text(String),
    Image(ImageWithCacheControl),
    Fragment(Map<String, Value>),
    Parts(Vec<ContentItem>),
}

/// A chat message: an ordered field map plus a typed view of `content`.
#[derive(Debug, Clone)]
pub struct Message {
    fields: Map<String, Value>,
    content: Option<MessageContent>,
}

impl ContentItem {
    /// Parse a content list item from raw JSON.
    ///
    /// Objects tagged `{type: "image", source: <string>}` are promoted to
    /// images via autodetection; untagged objects (including native provider
    /// image blocks, whose `source` is an object) pass through as fragments.
    /// With `autodetect_images`, plain strings that look like an image
    /// reference are promoted as well.
    pub fn from_value(
        value: &Value,
        images: &ImageCache,
        autodetect_images: bool,
    ) -> Result<ContentItem> {
        match value {
            Value::String(text) => {
                if autodetect_images {
                    match crate::vision::autodetect_safely(text, images) {
                        Detected::Image(image) => Ok(ContentItem::Image(image.into())),
                        Detected::Text(text) => Ok(ContentItem::Text(text)),
                    }
                } else {
                    Ok(ContentItem::Text(text.clone()))
                }
            }
            Value::Object(object) => {
                if is_tagged_image(object) {
                    Ok(ContentItem::Image(promote_tagged_image(value, images)?))
                } else {
                    Ok(ContentItem::Fragment(object.clone()))
                }
            }
            other => Err(ConvertError::UnsupportedContentType(json_type_name(other).to_string())),
        }
    }
}

impl From<String> for ContentItem {
    fn from(text: String) -> Self {
        ContentItem::Text(text)
    }
}

impl From<&str> for ContentItem {
    fn from(text: &str) -> Self {
        ContentItem::Text(text.to_string())
    }
}

impl From<Image> for ContentItem {
    fn from(image: Image) -> Self {
        ContentItem::Image(image.into())
    }
}

impl From<ImageWithCacheControl> for ContentItem {
    fn from(image: ImageWithCacheControl) -> Self {
        ContentItem::Image(image)
    }
}

impl From<Image> for MessageContent {
    fn from(image: Image) -> Self {
        MessageContent::Image(image.into())
    }
}

impl MessageContent {
    /// Parse a raw content value into a typed view.
    ///
    /// Returns `None` for shapes the normalizer does not touch (null,
    /// numbers, booleans); those are passed through verbatim.
    pub fn from_value(
        value: &Value,
        images: &ImageCache,
        autodetect_images: bool,
    ) -> Result<Option<MessageContent>> {
        match value {
            Value::String(text) => Ok(Some(MessageContent::Text(text.clone()))),
            Value::Array(items) => {
                let parts = items
                    .iter()
                    .map(|item| ContentItem::from_value(item, images, autodetect_images))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Some(MessageContent::Parts(parts)))
            }
            Value::Object(object) => {
                if is_tagged_image(object) {
                    Ok(Some(MessageContent::Image(promote_tagged_image(value, images)?)))
                } else {
                    Ok(Some(MessageContent::Fragment(object.clone())))
                }
            }
            _ => Ok(None),
        }
    }
}

impl Message {
    /// Build a message programmatically with a role and typed content.
    pub fn new(role: &str, content: MessageContent) -> Self {
        let mut fields = Map::new();
        fields.insert("role".to_string(), Value::String(role.to_string()));
        // Placeholder pinning the content position; replaced at conversion.
        fields.insert("content".to_string(), Value::Null);
        Self {
            fields,
            content: Some(content),
        }
    }

    /// Build a message from a raw JSON object, promoting tagged images.
    pub fn from_value(
        value: &Value,
        images: &ImageCache,
        autodetect_images: bool,
    ) -> Result<Message> {
        let fields = match value {
            Value::Object(fields) => fields.clone(),
            other => {
                return Err(ConvertError::UnsupportedContentType(format!(
                    "message must be a JSON object, got {}",
                    json_type_name(other)
                )))
            }
        };

        let content = match fields.get("content") {
            Some(raw) => MessageContent::from_value(raw, images, autodetect_images)?,
            None => None,
        };

        Ok(Message { fields, content })
    }

    /// The raw ordered field map, `content` included in its original form.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Typed view of the `content` field, if it has a convertible shape.
    pub fn content(&self) -> Option<&MessageContent> {
        self.content.as_ref()
    }
}

/// Parse a tagged image object and resolve it through autodetection.
fn promote_tagged_image(value: &Value, images: &ImageCache) -> Result<ImageWithCacheControl> {
    let params: ImageParams = serde_json::from_value(value.clone())?;
    ImageWithCacheControl::from_image_params(&params, images).ok_or_else(|| {
        ConvertError::InvalidEncoding(format!(
            "could not detect an image from source: {}",
            crate::utils::logging::truncate_payload(&params.source)
        ))
    })
}

/// True for objects carrying the raw tagged image shape: `type` is the
/// string "image" and `source` is a string locator.
fn is_tagged_image(object: &Map<String, Value>) -> bool {
    object.get("type").and_then(Value::as_str) == Some("image")
        && matches!(object.get("source"), Some(Value::String(_)))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
