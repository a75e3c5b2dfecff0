// Error types for any2llm content conversion
// Author: kelexine (https://github.com/kelexine)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unsupported image format: {media_type}. Supported formats are: {supported}")]
    UnsupportedFormat {
        media_type: String,
        supported: String,
    },

    #[error("Image file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid image encoding: {0}")]
    InvalidEncoding(String),

    #[error("Image size ({size_mb:.1}MB) exceeds limit of {limit_mb:.1}MB")]
    SizeLimitExceeded { size_mb: f64, limit_mb: f64 },

    #[error("Failed to fetch image: {0}")]
    FetchFailure(String),

    #[error("Image data is missing for base64 encoding: {0}")]
    MissingData(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),
}

impl ConvertError {
    /// Build a size-limit error from raw byte counts.
    pub fn size_limit(size: u64, limit: u64) -> Self {
        ConvertError::SizeLimitExceeded {
            size_mb: size as f64 / 1024.0 / 1024.0,
            limit_mb: limit as f64 / 1024.0 / 1024.0,
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
