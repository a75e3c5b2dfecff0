// CLI module for any2llm
// Author: kelexine (https://github.com/kelexine)

use crate::cache::ImageCache;
use crate::config::AppConfig;
use crate::error::{ConvertError, Result};
use crate::models::{Message, Mode};
use crate::translation::convert_messages;
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

/// any2llm - Normalize multimodal chat messages into provider API shapes
#[derive(Parser, Debug)]
#[command(name = "any2llm", version, about, long_about = None)]
pub struct Args {
    /// Input messages JSON file (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Destination mode
    #[arg(long, value_enum, default_value = "json")]
    pub mode: Mode,

    /// Promote plain-text content items that look like an image reference
    #[arg(long)]
    pub autodetect_images: bool,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Run the conversion pipeline: read, parse, convert, write.
pub fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let images = ImageCache::new(config.cache.clone(), &config.http)?;

    let raw = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let value: serde_json::Value = serde_json::from_str(&raw)?;
    let items = value.as_array().ok_or_else(|| {
        ConvertError::UnsupportedContentType("messages input must be a JSON array".to_string())
    })?;

    let messages = items
        .iter()
        .map(|item| Message::from_value(item, &images, args.autodetect_images))
        .collect::<Result<Vec<_>>>()?;

    info!("Converting {} messages for {:?}", messages.len(), args.mode);
    let converted = convert_messages(&messages, args.mode, &images)?;

    let output = serde_json::to_string_pretty(&converted)?;
    match &args.output {
        Some(path) => fs::write(path, output + "\n")?,
        None => println!("{}", output),
    }

    let stats = images.get_stats();
    debug!(
        "Cache: {} hits, {} misses, {} fetches",
        stats.hits, stats.misses, stats.fetches
    );

    Ok(())
}
