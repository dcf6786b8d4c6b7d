//! Telegram transport settings.

use archwiki_core::config::WikiSettings;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Seconds Telegram clients may reuse an inline answer.
pub const DEFAULT_INLINE_CACHE_TIME: u32 = 60;

/// Telegram transport settings loaded from environment variables.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TelegramSettings {
    /// Telegram Bot API token.
    pub telegram_token: String,
    /// `cache_time` sent with every inline answer.
    #[serde(default = "default_inline_cache_time")]
    pub inline_cache_time: u32,
}

const fn default_inline_cache_time() -> u32 {
    DEFAULT_INLINE_CACHE_TIME
}

impl TelegramSettings {
    /// Create new settings by loading from environment and files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails, including when
    /// `TELEGRAM_TOKEN` is missing or empty.
    pub fn new() -> Result<Self, ConfigError> {
        archwiki_core::config::build_config()?.try_deserialize()
    }
}

/// Combined settings used by the Telegram transport layer.
#[derive(Clone)]
pub struct BotSettings {
    /// Wiki search settings.
    pub wiki: Arc<WikiSettings>,
    /// Telegram-specific settings.
    pub telegram: Arc<TelegramSettings>,
}

impl BotSettings {
    /// Create a new combined settings bundle.
    #[must_use]
    pub fn new(wiki: WikiSettings, telegram: TelegramSettings) -> Self {
        Self {
            wiki: Arc::new(wiki),
            telegram: Arc::new(telegram),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TelegramSettings;
    use std::env;

    // Tests run sequentially to avoid environment variable race conditions
    #[test]
    fn test_config_env_loading() -> Result<(), Box<dyn std::error::Error>> {
        // 1. Missing token fails
        env::remove_var("TELEGRAM_TOKEN");
        env::remove_var("INLINE_CACHE_TIME");
        assert!(TelegramSettings::new().is_err());

        // 2. Empty token is treated as unset
        env::set_var("TELEGRAM_TOKEN", "");
        assert!(TelegramSettings::new().is_err());

        // 3. Token with default cache time
        env::set_var("TELEGRAM_TOKEN", "dummy_token");
        let settings = TelegramSettings::new()?;
        assert_eq!(settings.telegram_token, "dummy_token");
        assert_eq!(settings.inline_cache_time, 60);

        // 4. Cache time override
        env::set_var("INLINE_CACHE_TIME", "300");
        let settings = TelegramSettings::new()?;
        assert_eq!(settings.inline_cache_time, 300);

        env::remove_var("INLINE_CACHE_TIME");
        env::remove_var("TELEGRAM_TOKEN");
        Ok(())
    }
}
