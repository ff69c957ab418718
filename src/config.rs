//! Configuration Module
//!
//! Handles loading and managing proxy configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default upstream catalog API.
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the upstream catalog API, always ending in `/`
    pub upstream_base_url: String,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// TTL in seconds for item details and assembled pages
    pub cache_ttl: u64,
    /// TTL in seconds for the upstream total count
    pub count_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Page size used when the client does not send one
    pub default_page_size: u64,
    /// Upper bound for client-supplied page sizes
    pub max_page_size: u64,
    /// Number of item details fetched concurrently while assembling a page
    pub detail_concurrency: usize,
    /// Absolute origin used for pagination links, e.g. `https://dex.example.com`
    pub public_base_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `UPSTREAM_BASE_URL` - Upstream API root (default: https://pokeapi.co/api/v2/)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds (default: 10)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL` - Detail/page TTL in seconds (default: 900)
    /// - `COUNT_TTL` - Total count TTL in seconds (default: 86400)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `DEFAULT_PAGE_SIZE` - Page size when none is requested (default: 20)
    /// - `MAX_PAGE_SIZE` - Largest page size a client may request (default: 100)
    /// - `DETAIL_CONCURRENCY` - Parallel detail fetches per page (default: 8)
    /// - `PUBLIC_BASE_URL` - Origin for pagination links (default: request Host)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            upstream_base_url: normalize_base_url(
                &env::var("UPSTREAM_BASE_URL").unwrap_or(defaults.upstream_base_url),
            ),
            upstream_timeout: env_or("UPSTREAM_TIMEOUT", defaults.upstream_timeout),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries).max(1),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            count_ttl: env_or("COUNT_TTL", defaults.count_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval).max(1),
            default_page_size: env_or("DEFAULT_PAGE_SIZE", defaults.default_page_size).max(1),
            max_page_size: env_or("MAX_PAGE_SIZE", defaults.max_page_size).max(1),
            detail_concurrency: env_or("DETAIL_CONCURRENCY", defaults.detail_concurrency).max(1),
            public_base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    /// Upstream timeout as a Duration.
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout)
    }

    /// Detail and page TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    /// Total count TTL as a Duration.
    pub fn count_ttl(&self) -> Duration {
        Duration::from_secs(self.count_ttl)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8000,
            upstream_base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            upstream_timeout: 10,
            max_entries: 1000,
            cache_ttl: 60 * 15,
            count_ttl: 60 * 60 * 24,
            cleanup_interval: 60,
            default_page_size: 20,
            max_page_size: 100,
            detail_concurrency: 8,
            public_base_url: None,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Ensures the base URL ends with exactly one `/` so relative joins keep its path.
pub fn normalize_base_url(raw: &str) -> String {
    format!("{}/", raw.trim().trim_end_matches('/'))
}
