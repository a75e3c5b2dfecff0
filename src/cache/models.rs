// Cache configuration and statistics
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Settings for the image memoization caches.
///
/// All caches are bounded LRUs scoped to one [`ImageCache`](super::ImageCache)
/// instance; dropping the instance drops every entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of memoized URL constructions.
    /// Default: `256`
    #[serde(default = "default_max_urls")]
    pub max_urls: usize,

    /// Maximum number of memoized file path constructions.
    /// Default: `256`
    #[serde(default = "default_max_paths")]
    pub max_paths: usize,

    /// Maximum number of cached fetched payloads. Payloads can be large
    /// (base64 of up to 10MB of image data), so this bound is tighter.
    /// Default: `64`
    #[serde(default = "default_max_payloads")]
    pub max_payloads: usize,
}

/// Cache statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from a cache.
    pub hits: u64,
    /// Lookups that required construction or a fetch.
    pub misses: u64,
    /// Full-content GET requests performed.
    pub fetches: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_urls: default_max_urls(),
            max_paths: default_max_paths(),
            max_payloads: default_max_payloads(),
        }
    }
}

fn default_max_urls() -> usize {
    256
}

fn default_max_paths() -> usize {
    256
}

fn default_max_payloads() -> usize {
    64
}
