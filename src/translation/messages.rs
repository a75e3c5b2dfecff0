// Message list conversion
// Author: kelexine (https://github.com/kelexine)

use super::contents::convert_contents;
use crate::cache::ImageCache;
use crate::error::Result;
use crate::models::{Message, Mode};
use serde_json::{Map, Value};
use tracing::debug;

/// Convert messages to the appropriate format for the given mode.
///
/// Each message's field map is shallow-copied; only a convertible `content`
/// field is replaced, in place, keeping field order. Messages whose content
/// has no typed view (null, numbers, absent) come through verbatim. Message
/// order is preserved; the caller's messages are never mutated.
pub fn convert_messages(
    messages: &[Message],
    mode: Mode,
    images: &ImageCache,
) -> Result<Vec<Map<String, Value>>> {
    debug!("Converting {} messages for {:?}", messages.len(), mode);

    let mut converted = Vec::with_capacity(messages.len());
    for message in messages {
        let mut fields = message.fields().clone();

        if let Some(content) = message.content() {
            let value = convert_contents(content, mode, images)?.into_value();
            fields.insert("content".to_string(), value);
        }

        converted.push(fields);
    }

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MessageContent;
    use serde_json::json;

    #[test]
    fn test_simple_text_message() {
        let images = ImageCache::with_defaults().unwrap();
        let messages = vec![Message::new(
            "user",
            MessageContent::Text("Hello, world!".to_string()),
        )];

        let result = convert_messages(&messages, Mode::Json, &images).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["role"], "user");
        assert_eq!(result[0]["content"], "Hello, world!");
    }

    #[test]
    fn test_extra_fields_and_order_preserved() {
        let images = ImageCache::with_defaults().unwrap();
        let raw = json!({
            "role": "user",
            "name": "alice",
            "content": "hi",
            "metadata": {"trace_id": "abc"}
        });
        let message = Message::from_value(&raw, &images, false).unwrap();

        let result = convert_messages(&[message], Mode::Json, &images).unwrap();
        let keys: Vec<&String> = result[0].keys().collect();

        assert_eq!(keys, ["role", "name", "content", "metadata"]);
        assert_eq!(result[0]["metadata"], json!({"trace_id": "abc"}));
    }

    #[test]
    fn test_null_content_passes_through_verbatim() {
        let images = ImageCache::with_defaults().unwrap();
        let raw = json!({"role": "assistant", "content": null});
        let message = Message::from_value(&raw, &images, false).unwrap();

        let result = convert_messages(&[message], Mode::AnthropicJson, &images).unwrap();
        assert_eq!(Value::Object(result[0].clone()), raw);
    }

    #[test]
    fn test_original_messages_not_mutated() {
        let images = ImageCache::with_defaults().unwrap();
        let raw = json!({
            "role": "user",
            "content": [{"type": "image", "source": "data:image/png;base64,AAAA"}]
        });
        let message = Message::from_value(&raw, &images, false).unwrap();
        let fields_before = message.fields().clone();

        convert_messages(&[message.clone()], Mode::AnthropicJson, &images).unwrap();

        assert_eq!(message.fields(), &fields_before);
    }

    #[test]
    fn test_message_order_preserved() {
        let images = ImageCache::with_defaults().unwrap();
        let messages = vec![
            Message::new("system", MessageContent::Text("be brief".to_string())),
            Message::new("user", MessageContent::Text("hi".to_string())),
            Message::new("assistant", MessageContent::Text("hello".to_string())),
        ];

        let result = convert_messages(&messages, Mode::Tools, &images).unwrap();
        let roles: Vec<&Value> = result.iter().map(|m| &m["role"]).collect();
        assert_eq!(roles, [&json!("system"), &json!("user"), &json!("assistant")]);
    }
}
