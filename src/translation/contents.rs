// Content conversion (typed content -> provider-shaped fragments)
// Author: kelexine (https://github.com/kelexine)

use crate::cache::ImageCache;
use crate::error::Result;
use crate::models::{ContentItem, MessageContent, Mode, TextBlock};
use crate::vision::ImageEncoder;
use serde_json::Value;
use tracing::debug;

/// Result of content conversion: plain text stays plain text, everything
/// else becomes an ordered list of provider-shaped fragments.
#[derive(Debug, Clone)]
pub enum Converted {
    Text(String),
    Blocks(Vec<Value>),
}

impl Converted {
    /// Collapse into a JSON value for a message `content` field.
    pub fn into_value(self) -> Value {
        match self {
            Converted::Text(text) => Value::String(text),
            Converted::Blocks(blocks) => Value::Array(blocks),
        }
    }
}

/// Convert content to the appropriate format for the given mode.
///
/// Plain text passes through without list wrapping. A single image or
/// pre-shaped fragment becomes a one-element list. Lists convert item by
/// item, preserving order. The image encoder is looked up once per call by
/// provider tag; a mode with no encoder (Gemini) fails here, even for a
/// single image.
pub fn convert_contents(
    contents: &MessageContent,
    mode: Mode,
    images: &ImageCache,
) -> Result<Converted> {
    let provider = mode.provider();

    match contents {
        MessageContent::Text(text) => Ok(Converted::Text(text.clone())),

        MessageContent::Image(image) => {
            let encoder = ImageEncoder::for_provider(provider)?;
            Ok(Converted::Blocks(vec![encoder.encode(image, images)?]))
        }

        MessageContent::Fragment(fragment) => {
            Ok(Converted::Blocks(vec![Value::Object(fragment.clone())]))
        }

        MessageContent::Parts(items) => {
            debug!("Converting {} content items for {}", items.len(), provider.name());
            let mut blocks = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    ContentItem::Text(text) => {
                        blocks.push(serde_json::to_value(TextBlock::new(text))?);
                    }
                    ContentItem::Image(image) => {
                        let encoder = ImageEncoder::for_provider(provider)?;
                        blocks.push(encoder.encode(image, images)?);
                    }
                    ContentItem::Fragment(fragment) => {
                        blocks.push(Value::Object(fragment.clone()));
                    }
                }
            }
            Ok(Converted::Blocks(blocks))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::vision::{Image, ImageWithCacheControl};
    use serde_json::json;

    fn data_uri_image() -> ImageWithCacheControl {
        Image::from_base64("data:image/png;base64,AAAA").unwrap().into()
    }

    #[test]
    fn test_plain_text_passes_through_unwrapped() {
        let images = ImageCache::with_defaults().unwrap();
        let result =
            convert_contents(&MessageContent::Text("hello".to_string()), Mode::Json, &images)
                .unwrap();

        match result {
            Converted::Text(text) => assert_eq!(text, "hello"),
            Converted::Blocks(_) => panic!("plain text must not be wrapped in a list"),
        }
    }

    #[test]
    fn test_single_image_becomes_one_element_list() {
        let images = ImageCache::with_defaults().unwrap();
        let content = MessageContent::Image(data_uri_image());
        let result = convert_contents(&content, Mode::AnthropicJson, &images).unwrap();

        match result {
            Converted::Blocks(blocks) => {
                assert_eq!(blocks.len(), 1);
                assert_eq!(blocks[0]["type"], "image");
                assert_eq!(blocks[0]["source"]["type"], "base64");
            }
            Converted::Text(_) => panic!("expected blocks"),
        }
    }

    #[test]
    fn test_single_fragment_is_wrapped_unmodified() {
        let images = ImageCache::with_defaults().unwrap();
        let fragment = json!({"type": "tool_result", "tool_use_id": "t1", "content": "ok"});
        let content = MessageContent::Fragment(fragment.as_object().unwrap().clone());

        let result = convert_contents(&content, Mode::Json, &images).unwrap();
        match result {
            Converted::Blocks(blocks) => assert_eq!(blocks, vec![fragment]),
            Converted::Text(_) => panic!("expected blocks"),
        }
    }

    #[test]
    fn test_mixed_list_preserves_order() {
        let images = ImageCache::with_defaults().unwrap();
        let content = MessageContent::Parts(vec![
            ContentItem::Text("what is in this image?".to_string()),
            ContentItem::Image(data_uri_image()),
        ]);

        let result = convert_contents(&content, Mode::AnthropicJson, &images).unwrap();
        let Converted::Blocks(blocks) = result else {
            panic!("expected blocks");
        };

        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            json!({"type": "text", "text": "what is in this image?"})
        );
        assert_eq!(blocks[1]["type"], "image");
    }

    #[test]
    fn test_mode_dispatch_selects_provider_shape() {
        let images = ImageCache::with_defaults().unwrap();
        let content = MessageContent::Image(data_uri_image());

        let Converted::Blocks(openai) =
            convert_contents(&content, Mode::Tools, &images).unwrap()
        else {
            panic!("expected blocks");
        };
        assert_eq!(openai[0]["type"], "image_url");
        assert!(openai[0]["image_url"]["url"].is_string());

        let Converted::Blocks(mistral) =
            convert_contents(&content, Mode::MistralJson, &images).unwrap()
        else {
            panic!("expected blocks");
        };
        assert_eq!(mistral[0]["type"], "image_url");
        assert!(mistral[0]["data"].is_string());
    }

    #[test]
    fn test_gemini_image_fails_at_dispatch() {
        let images = ImageCache::with_defaults().unwrap();
        let content = MessageContent::Image(data_uri_image());

        for mode in [Mode::GeminiJson, Mode::GeminiTools] {
            let result = convert_contents(&content, mode, &images);
            assert!(matches!(result, Err(ConvertError::UnsupportedProvider(_))));
        }
    }

    #[test]
    fn test_gemini_text_still_passes() {
        // Only image encoding is undefined for Gemini
        let images = ImageCache::with_defaults().unwrap();
        let result =
            convert_contents(&MessageContent::Text("hi".to_string()), Mode::GeminiJson, &images);
        assert!(result.is_ok());
    }
}
