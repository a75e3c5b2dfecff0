// Destination mode tags and provider grouping
// Author: kelexine (https://github.com/kelexine)

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Destination mode of an outgoing request.
///
/// Modes group into provider families; the content normalizer only cares
/// about the family, never the individual tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "kebab-case")]
pub enum Mode {
    /// OpenAI-style function/tool calling.
    Tools,
    /// OpenAI-style JSON response mode.
    Json,
    /// OpenAI-style markdown-fenced JSON.
    MdJson,
    /// OpenAI-style structured output via JSON schema.
    JsonSchema,
    /// Anthropic tool use.
    AnthropicTools,
    /// Anthropic JSON mode.
    AnthropicJson,
    /// Mistral function calling.
    MistralTools,
    /// Mistral JSON mode.
    MistralJson,
    /// Gemini function calling (no encoder yet).
    GeminiTools,
    /// Gemini JSON mode (no encoder yet).
    GeminiJson,
}

/// Provider family a mode targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    OpenAi,
    Anthropic,
    Mistral,
    Gemini,
}

impl Mode {
    /// Map a mode tag to its provider family.
    ///
    /// Anything outside the Anthropic/Mistral/Gemini families is treated as
    /// OpenAI-compatible.
    pub fn provider(self) -> Provider {
        match self {
            Mode::AnthropicTools | Mode::AnthropicJson => Provider::Anthropic,
            Mode::MistralTools | Mode::MistralJson => Provider::Mistral,
            Mode::GeminiTools | Mode::GeminiJson => Provider::Gemini,
            _ => Provider::OpenAi,
        }
    }
}

impl Provider {
    /// Human-readable provider name for error messages.
    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Mistral => "mistral",
            Provider::Gemini => "gemini",
        }
    }
}
