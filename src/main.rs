// any2llm - Multimodal content normalizer for LLM provider APIs
// Author: kelexine (https://github.com/kelexine)

use any2llm::cli::{self, Args};
use any2llm::config::AppConfig;
use any2llm::utils::logging;
use anyhow::Result;
use clap::Parser;
use tracing::debug;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load()?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    debug!("Starting any2llm v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Run the conversion pipeline
    cli::run(&args, &config)?;

    Ok(())
}
