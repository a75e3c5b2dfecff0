// End-to-end conversion tests over the public API
// Author: kelexine (https://github.com/kelexine)

use any2llm::cache::ImageCache;
use any2llm::error::ConvertError;
use any2llm::models::{Message, MessageContent, Mode};
use any2llm::translation::{convert_contents, convert_messages, Converted};
use serde_json::{json, Value};

const DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn parse_messages(raw: Value, images: &ImageCache) -> Vec<Message> {
    raw.as_array()
        .unwrap()
        .iter()
        .map(|m| Message::from_value(m, images, false).unwrap())
        .collect()
}

#[test]
fn test_text_only_conversation_is_unchanged() {
    let images = ImageCache::with_defaults().unwrap();
    let raw = json!([
        {"role": "system", "content": "You extract receipts."},
        {"role": "user", "content": "Total was 12.50 EUR at the bakery."}
    ]);

    let messages = parse_messages(raw.clone(), &images);
    let converted = convert_messages(&messages, Mode::Tools, &images).unwrap();

    assert_eq!(json!(converted), raw);
}

#[test]
fn test_tagged_image_converts_for_anthropic() {
    let images = ImageCache::with_defaults().unwrap();
    let raw = json!([{
        "role": "user",
        "content": [
            {"type": "text", "text": "What is in this image?"},
            {"type": "image", "source": DATA_URI}
        ]
    }]);

    let messages = parse_messages(raw, &images);
    let converted = convert_messages(&messages, Mode::AnthropicJson, &images).unwrap();

    let content = converted[0]["content"].as_array().unwrap();
    assert_eq!(content.len(), 2);
    assert_eq!(content[0], json!({"type": "text", "text": "What is in this image?"}));
    assert_eq!(content[1]["type"], "image");
    assert_eq!(content[1]["source"]["media_type"], "image/png");
    assert_eq!(
        content[1]["source"]["data"],
        json!(DATA_URI.split_once(',').unwrap().1)
    );
}

#[test]
fn test_cache_control_survives_to_anthropic_block() {
    let images = ImageCache::with_defaults().unwrap();
    let raw = json!([{
        "role": "user",
        "content": [{
            "type": "image",
            "source": DATA_URI,
            "cache_control": {"type": "ephemeral"}
        }]
    }]);

    let messages = parse_messages(raw.clone(), &images);

    let anthropic = convert_messages(&messages, Mode::AnthropicTools, &images).unwrap();
    assert_eq!(
        anthropic[0]["content"][0]["cache_control"],
        json!({"type": "ephemeral"})
    );

    // Only the Anthropic encoder is decorated
    let openai = convert_messages(&messages, Mode::Json, &images).unwrap();
    assert!(openai[0]["content"][0].get("cache_control").is_none());
}

#[test]
fn test_data_uri_as_plain_text_stays_text() {
    let images = ImageCache::with_defaults().unwrap();
    let content = MessageContent::from_value(&json!(DATA_URI.to_string()), &images, false)
        .unwrap()
        .unwrap();

    // A data URI as plain text content stays text without autodetection
    match convert_contents(&content, Mode::Json, &images).unwrap() {
        Converted::Text(text) => assert_eq!(text, DATA_URI),
        Converted::Blocks(_) => panic!("expected text passthrough"),
    }
}

#[test]
fn test_mistral_shapes() {
    let images = ImageCache::with_defaults().unwrap();
    let raw = json!([{
        "role": "user",
        "content": [
            {"type": "image", "source": DATA_URI},
            {"type": "image", "source": "https://example.com/receipt.jpg"}
        ]
    }]);

    let messages = parse_messages(raw, &images);
    let converted = convert_messages(&messages, Mode::MistralJson, &images).unwrap();

    let content = converted[0]["content"].as_array().unwrap();
    assert_eq!(content[0]["type"], "image_url");
    assert!(content[0]["data"].as_str().unwrap().starts_with("data:image/png;base64,"));
    assert_eq!(
        content[1],
        json!({"type": "image_url", "url": "https://example.com/receipt.jpg"})
    );
}

#[test]
fn test_gemini_is_rejected() {
    let images = ImageCache::with_defaults().unwrap();
    let raw = json!([{
        "role": "user",
        "content": [{"type": "image", "source": DATA_URI}]
    }]);

    let messages = parse_messages(raw, &images);
    let result = convert_messages(&messages, Mode::GeminiJson, &images);

    match result {
        Err(ConvertError::UnsupportedProvider(message)) => {
            assert!(message.contains("Gemini is not supported yet"));
        }
        other => panic!("expected UnsupportedProvider, got {:?}", other),
    }
}

#[test]
fn test_native_provider_fragment_passes_through() {
    let images = ImageCache::with_defaults().unwrap();
    // A pre-shaped Anthropic image block: source is an object, not a string
    let fragment = json!({
        "type": "image",
        "source": {"type": "base64", "media_type": "image/png", "data": "AAAA"}
    });
    let raw = json!([{"role": "user", "content": [fragment.clone()]}]);

    let messages = parse_messages(raw, &images);
    let converted = convert_messages(&messages, Mode::AnthropicJson, &images).unwrap();

    assert_eq!(converted[0]["content"][0], fragment);
}

#[test]
fn test_unsupported_list_item_is_a_hard_error() {
    let images = ImageCache::with_defaults().unwrap();
    let raw = json!({"role": "user", "content": ["ok", 42]});

    let result = Message::from_value(&raw, &images, false);
    assert!(matches!(
        result,
        Err(ConvertError::UnsupportedContentType(_))
    ));
}

#[test]
fn test_invalid_tagged_image_is_a_hard_error() {
    let images = ImageCache::with_defaults().unwrap();
    let raw = json!({
        "role": "user",
        "content": [{"type": "image", "source": "not an image at all"}]
    });

    let result = Message::from_value(&raw, &images, false);
    assert!(matches!(result, Err(ConvertError::InvalidEncoding(_))));
}

#[test]
fn test_autodetect_images_promotes_string_items() {
    let images = ImageCache::with_defaults().unwrap();
    let raw = json!([{
        "role": "user",
        "content": ["look at this", DATA_URI]
    }]);

    let messages: Vec<Message> = raw
        .as_array()
        .unwrap()
        .iter()
        .map(|m| Message::from_value(m, &images, true).unwrap())
        .collect();

    let converted = convert_messages(&messages, Mode::Json, &images).unwrap();
    let content = converted[0]["content"].as_array().unwrap();

    assert_eq!(content[0], json!({"type": "text", "text": "look at this"}));
    assert_eq!(content[1]["type"], "image_url");
    assert_eq!(content[1]["image_url"]["url"], DATA_URI);
}
