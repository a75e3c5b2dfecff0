//! Vision and image processing module.
//!
//! This module holds the image representation and everything that produces
//! or consumes it: autodetection of ambiguous sources (data URI, URL, file
//! path, raw base64), MIME validation, and the per-provider encoders that
//! emit OpenAI-, Anthropic- and Mistral-shaped content fragments.
//!
//! # Submodules
//!
//! - `models`: Image, audio and format types plus validation constraints.
//! - `detect`: Data-URI predicate, magic-byte sniffing, autodetection.
//! - `encode`: Per-provider encoders and the provider-keyed dispatch.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod detect;
pub mod encode;
pub mod models;

pub use detect::{autodetect, autodetect_safely, is_base64, sniff_media_type, Detected};
pub use encode::ImageEncoder;
pub use models::{
    validate_image_size, Audio, Image, ImageFormat, ImageWithCacheControl, MediaSource,
    MAX_IMAGE_SIZE_BYTES, VALID_MIME_TYPES,
};
