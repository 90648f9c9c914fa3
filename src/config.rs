//! Runtime configuration loaded from environment variables.
//!
//! The binary loads a `.env` file with `dotenvy` first; the library only reads
//! the process environment (or, in tests, an injected lookup).

use crate::error::ErrorKind;
use crate::model::Language;
use secrecy::SecretString;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Marketplace client configuration.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Realtime store REST endpoint; `None` runs against the in-memory store.
    pub store_url: Option<String>,
    /// Store auth token, appended as `?auth=` to every request.
    pub store_auth: Option<SecretString>,
    /// Account whose bills and orders are written.
    pub account_id: String,
    pub language: Language,
    /// How often the REST store polls a subscribed path.
    pub store_poll_interval: Duration,
    /// News/video rotation period.
    pub feed_rotation: Duration,
    pub api_keys: ApiKeys,
}

/// Dashboard API keys. A missing key disables (or placeholders) its panel.
///
/// `SecretString` redacts itself in `Debug`.
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    pub openweather: Option<SecretString>,
    pub news: Option<SecretString>,
    pub youtube: Option<SecretString>,
}

impl MarketConfig {
    pub const DEFAULT_ACCOUNT_ID: &'static str = "farmer123";
    pub const DEFAULT_POLL_SECS: u64 = 5;
    pub const DEFAULT_ROTATION_SECS: u64 = 10;

    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a numeric or language variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_optional_env = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_secret = |key: &str| get_optional_env(key).map(SecretString::from);
        let get_secs = |key: &str, default: u64| -> Result<Duration, ConfigError> {
            match get_optional_env(key) {
                None => Ok(Duration::from_secs(default)),
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .map(Duration::from_secs)
                    .ok_or_else(|| {
                        ConfigError::InvalidEnvVar(
                            key.to_string(),
                            format!("expected a positive number of seconds, got {:?}", raw),
                        )
                    }),
            }
        };

        let language = match get_optional_env("MARKET_LANGUAGE") {
            None => Language::default(),
            Some(raw) => raw.parse::<Language>().map_err(|e| {
                ConfigError::InvalidEnvVar("MARKET_LANGUAGE".to_string(), e.to_string())
            })?,
        };

        Ok(Self {
            store_url: get_optional_env("MARKET_STORE_URL"),
            store_auth: get_secret("MARKET_STORE_AUTH"),
            account_id: get_optional_env("MARKET_ACCOUNT_ID")
                .unwrap_or_else(|| Self::DEFAULT_ACCOUNT_ID.to_string()),
            language,
            store_poll_interval: get_secs("MARKET_STORE_POLL_SECS", Self::DEFAULT_POLL_SECS)?,
            feed_rotation: get_secs("MARKET_FEED_ROTATION_SECS", Self::DEFAULT_ROTATION_SECS)?,
            api_keys: ApiKeys {
                openweather: get_secret("OPENWEATHER_API_KEY"),
                news: get_secret("NEWS_API_KEY"),
                youtube: get_secret("YOUTUBE_API_KEY"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = MarketConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.store_url, None);
        assert_eq!(config.account_id, "farmer123");
        assert_eq!(config.language, Language::English);
        assert_eq!(config.store_poll_interval, Duration::from_secs(5));
        assert_eq!(config.feed_rotation, Duration::from_secs(10));
        assert!(config.api_keys.news.is_none());
    }

    #[test]
    fn values_are_read_and_secrets_redacted() {
        let config = MarketConfig::from_lookup(lookup(&[
            ("MARKET_STORE_URL", "https://db.test"),
            ("MARKET_ACCOUNT_ID", "farmer7"),
            ("MARKET_LANGUAGE", "ta"),
            ("MARKET_FEED_ROTATION_SECS", "3"),
            ("NEWS_API_KEY", "news-secret"),
        ]))
        .unwrap();
        assert_eq!(config.store_url.as_deref(), Some("https://db.test"));
        assert_eq!(config.account_id, "farmer7");
        assert_eq!(config.language, Language::Tamil);
        assert_eq!(config.feed_rotation, Duration::from_secs(3));
        assert_eq!(
            config.api_keys.news.as_ref().unwrap().expose_secret(),
            "news-secret"
        );
        assert!(!format!("{:?}", config).contains("news-secret"));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let err = MarketConfig::from_lookup(lookup(&[("MARKET_STORE_POLL_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "MARKET_STORE_POLL_SECS"));

        let zero = MarketConfig::from_lookup(lookup(&[("MARKET_FEED_ROTATION_SECS", "0")]));
        assert!(zero.is_err());
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = MarketConfig::from_lookup(lookup(&[("MARKET_LANGUAGE", "klingon")])).unwrap_err();
        assert!(err.to_string().contains("MARKET_LANGUAGE"));
    }
}
