// any2llm - Multimodal content normalizer for LLM provider APIs
// Author: kelexine (https://github.com/kelexine)

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod translation;
pub mod utils;
pub mod vision;
