// Image cache manager - memoized construction and payload fetching
// Author: kelexine (https://github.com/kelexine)

use crate::cache::models::{CacheConfig, CacheStats};
use crate::config::HttpConfig;
use crate::error::{ConvertError, Result};
use crate::utils::logging::truncate_payload;
use crate::vision::detect::is_base64;
use crate::vision::models::{
    unsupported_format, Image, MediaSource, MAX_IMAGE_SIZE_BYTES, VALID_MIME_TYPES,
};
use base64::Engine;
use lru::LruCache;
use parking_lot::Mutex;
use reqwest::blocking::Client;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Bounded memoization for image construction and payload fetching.
///
/// Owns the blocking HTTP client and three LRU caches: URL constructions,
/// path constructions, and fetched base64 payloads. One instance per
/// client/session; entries never outlive the instance. Writes are
/// idempotent, so racing constructions of the same key are harmless.
pub struct ImageCache {
    client: Client,
    by_url: Mutex<LruCache<String, Image>>,
    by_path: Mutex<LruCache<PathBuf, Image>>,
    payloads: Mutex<LruCache<String, String>>,
    stats: Mutex<CacheStats>,
}

impl ImageCache {
    /// Create a new image cache with the given bounds and HTTP settings.
    pub fn new(config: CacheConfig, http: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(http.connect_timeout_seconds))
            .timeout(Duration::from_secs(http.request_timeout_seconds))
            .user_agent(&http.user_agent)
            .build()?;

        Ok(Self {
            client,
            by_url: Mutex::new(LruCache::new(capacity(config.max_urls))),
            by_path: Mutex::new(LruCache::new(capacity(config.max_paths))),
            payloads: Mutex::new(LruCache::new(capacity(config.max_payloads))),
            stats: Mutex::new(CacheStats::default()),
        })
    }

    /// Create an image cache with default bounds and HTTP settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(CacheConfig::default(), &HttpConfig::default())
    }

    /// Construct an Image from a URL, memoized per distinct URL.
    ///
    /// Data URIs delegate to the data-URI constructor. For real URLs the
    /// MIME type comes from the path extension, or failing that from a
    /// metadata-only HEAD request. The payload stays unfetched until an
    /// encoder needs inline bytes.
    pub fn from_url(&self, url: &str) -> Result<Image> {
        if let Some(image) = self.by_url.lock().get(url) {
            self.stats.lock().hits += 1;
            debug!("URL cache hit: {}", truncate_payload(url));
            return Ok(image.clone());
        }
        self.stats.lock().misses += 1;

        let image = self.build_from_url(url)?;
        self.by_url.lock().put(url.to_string(), image.clone());
        Ok(image)
    }

    fn build_from_url(&self, url: &str) -> Result<Image> {
        if is_base64(url) {
            return Image::from_base64(url);
        }

        let parsed = url::Url::parse(url)
            .map_err(|e| ConvertError::InvalidEncoding(format!("invalid image URL: {}", e)))?;
        let mut media_type = mime_guess::from_path(parsed.path())
            .first_raw()
            .map(str::to_string);

        if media_type.is_none() {
            debug!("No MIME hint in URL path, issuing HEAD request to {}", url);
            let response = self.client.head(url).send().map_err(|e| {
                ConvertError::FetchFailure(format!(
                    "failed to fetch image metadata from {}: {}",
                    url, e
                ))
            })?;
            media_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
        }

        match media_type.as_deref() {
            Some(media_type) if VALID_MIME_TYPES.contains(&media_type) => Ok(Image::new(
                MediaSource::Locator(url.to_string()),
                media_type.to_string(),
                None,
            )),
            other => Err(unsupported_format(other.unwrap_or("unknown"))),
        }
    }

    /// Construct an Image from a local file, memoized per distinct path.
    ///
    /// The file must exist, be non-empty and stay under the 10MB ceiling;
    /// its MIME type comes from the extension and must be in the supported
    /// set. These are Mistral's limits, enforced for every destination.
    pub fn from_path(&self, path: &Path) -> Result<Image> {
        if let Some(image) = self.by_path.lock().get(path) {
            self.stats.lock().hits += 1;
            debug!("Path cache hit: {}", path.display());
            return Ok(image.clone());
        }
        self.stats.lock().misses += 1;

        let image = self.build_from_path(path)?;
        self.by_path.lock().put(path.to_path_buf(), image.clone());
        Ok(image)
    }

    fn build_from_path(&self, path: &Path) -> Result<Image> {
        if !path.is_file() {
            return Err(ConvertError::NotFound(path.to_path_buf()));
        }

        let size = fs::metadata(path)?.len();
        if size == 0 {
            return Err(ConvertError::InvalidEncoding("image file is empty".to_string()));
        }
        if size > MAX_IMAGE_SIZE_BYTES {
            return Err(ConvertError::size_limit(size, MAX_IMAGE_SIZE_BYTES));
        }

        let media_type = mime_guess::from_path(path).first_raw().unwrap_or("unknown");
        if !VALID_MIME_TYPES.contains(&media_type) {
            return Err(unsupported_format(media_type));
        }

        let data = base64::engine::general_purpose::STANDARD.encode(fs::read(path)?);
        debug!(
            "Loaded {} ({:.1}KB) as {}",
            path.display(),
            size as f64 / 1024.0,
            media_type
        );

        Ok(Image::new(
            MediaSource::Path(path.to_path_buf()),
            media_type.to_string(),
            Some(data),
        ))
    }

    /// Fetch a URL's content and base64-encode it, memoized per URL.
    ///
    /// Blocking GET; non-2xx status is a fetch failure.
    pub fn url_to_base64(&self, url: &str) -> Result<String> {
        if let Some(data) = self.payloads.lock().get(url) {
            self.stats.lock().hits += 1;
            debug!("Payload cache hit: {}", truncate_payload(url));
            return Ok(data.clone());
        }
        self.stats.lock().misses += 1;

        debug!("Fetching image content from {}", url);
        let response = self.client.get(url).send().map_err(|e| {
            ConvertError::FetchFailure(format!("failed to fetch image from {}: {}", url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConvertError::FetchFailure(format!(
                "GET {} returned status {}",
                url, status
            )));
        }

        let bytes = response.bytes().map_err(|e| {
            ConvertError::FetchFailure(format!("failed to read image body from {}: {}", url, e))
        })?;
        let data = base64::engine::general_purpose::STANDARD.encode(&bytes);

        self.stats.lock().fetches += 1;
        self.payloads.lock().put(url.to_string(), data.clone());
        Ok(data)
    }

    /// Get cache statistics
    pub fn get_stats(&self) -> CacheStats {
        self.stats.lock().clone()
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.by_url.lock().clear();
        self.by_path.lock().clear();
        self.payloads.lock().clear();
        debug!("Image cache cleared");
    }
}

fn capacity(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap_or(NonZeroUsize::MIN)
}
