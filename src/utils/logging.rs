//! Structured logging and trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application and
//! provides a helper to keep multi-megabyte base64 payloads out of log
//! lines.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports two output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Logs go to stderr so converted JSON on stdout stays clean. Log levels
/// are controlled via the `RUST_LOG` environment variable or the provided
/// `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    Ok(())
}

/// Shortens long source strings (base64 payloads, data URIs) for log and
/// error output.
///
/// # Arguments
///
/// * `input` - The raw string that may be arbitrarily large.
///
/// # Returns
///
/// The input unchanged if short, otherwise a truncated prefix with the
/// original byte length appended.
pub fn truncate_payload(input: &str) -> String {
    const MAX_LOG_PAYLOAD: usize = 64;

    match input.char_indices().nth(MAX_LOG_PAYLOAD) {
        Some((idx, _)) => format!("{}... ({} bytes)", &input[..idx], input.len()),
        None => input.to_string(),
    }
}
