//! Configuration and settings management
//!
//! Loads wiki-side settings from config files and environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Default Arch Wiki base URL.
pub const DEFAULT_WIKI_URL: &str = "https://wiki.archlinux.org";
/// Maximum number of pages requested per search.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;
/// Upper bound for the search limit; Telegram rejects inline answers with more than 50 results.
pub const MAX_SEARCH_LIMIT: u32 = 50;
/// Timeout for a single wiki request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// Time-to-live for cached search responses (1 hour).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
/// Maximum number of cached queries.
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 10_000;

/// Build the layered configuration source shared by all settings structs.
///
/// Sources, later ones overriding earlier ones:
/// `config/default`, `config/{RUN_MODE}`, `config/local`,
/// `APP__*` environment variables, plain environment variables.
///
/// # Errors
///
/// Returns a `ConfigError` if a present config file cannot be parsed.
pub fn build_config() -> Result<Config, ConfigError> {
    let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
        // Not checked into git
        .add_source(File::with_name("config/local").required(false))
        // Eg. `APP__WIKI_URL=https://wiki.example.org`
        .add_source(Environment::with_prefix("APP").separator("__"))
        // UPPER_SNAKE_CASE maps to snake_case; empty vars count as unset
        .add_source(Environment::default().ignore_empty(true))
        .build()
}

/// Wiki search settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WikiSettings {
    /// Base URL of the wiki, without trailing slash
    #[serde(default = "default_wiki_url")]
    pub wiki_url: String,
    /// `limit` parameter sent with every search
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,
    /// Request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Cache entry time-to-live in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Cache capacity in entries
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,
}

fn default_wiki_url() -> String {
    DEFAULT_WIKI_URL.to_string()
}

const fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

const fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

const fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

const fn default_cache_max_entries() -> u64 {
    DEFAULT_CACHE_MAX_ENTRIES
}

/// Keep the search limit within `1..=MAX_SEARCH_LIMIT`.
#[must_use]
pub fn clamp_search_limit(limit: u32) -> u32 {
    let clamped = limit.clamp(1, MAX_SEARCH_LIMIT);
    if clamped != limit {
        warn!("search_limit {limit} out of range, using {clamped}");
    }
    clamped
}

impl Default for WikiSettings {
    fn default() -> Self {
        Self {
            wiki_url: default_wiki_url(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl WikiSettings {
    /// Create new settings by loading from environment and files
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use archwiki_core::config::WikiSettings;
    ///
    /// let settings = WikiSettings::new().expect("Failed to load configuration");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        let mut settings: Self = build_config()?.try_deserialize()?;
        settings.wiki_url = settings.wiki_url.trim_end_matches('/').to_string();
        settings.search_limit = clamp_search_limit(settings.search_limit);
        Ok(settings)
    }

    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Cache time-to-live as a `Duration`
    #[must_use]
    pub const fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
