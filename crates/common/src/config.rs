use std::env;

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENVIRONMENT: &str = "development";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("PORT must be a number between 1 and 65535, got {0:?}")]
    InvalidPort(String),

    #[error("BINANCE_BASE_URL is not a valid URL ({0:?}): {1}")]
    InvalidBaseUrl(String, String),
}

/// Credentials and endpoint for the futures REST API.
#[derive(Clone)]
pub struct ExchangeSettings {
    pub api_key: String,
    pub secret_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for ExchangeSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeSettings")
            .field("api_key", &"<redacted>")
            .field("secret_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Process-wide settings, read once at startup and shared immutably.
#[derive(Debug, Clone)]
pub struct Settings {
    pub exchange: ExchangeSettings,
    pub port: u16,
    pub environment: String,
}

impl Settings {
    /// Reads settings from the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    ///
    /// Empty values are treated the same as unset ones. A missing API key or
    /// signing secret is a hard error: the service must never sign with an
    /// empty key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("BINANCE_API_KEY").ok_or(ConfigError::Missing("BINANCE_API_KEY"))?;
        let secret_key =
            get("BINANCE_SECRET_KEY").ok_or(ConfigError::Missing("BINANCE_SECRET_KEY"))?;

        let base_url = match get("BINANCE_BASE_URL") {
            Some(raw) => {
                Url::parse(&raw).map_err(|e| ConfigError::InvalidBaseUrl(raw.clone(), e.to_string()))?;
                raw.trim_end_matches('/').to_string()
            }
            None => DEFAULT_BASE_URL.to_string(),
        };

        let port = match get("PORT") {
            Some(raw) => match raw.parse::<u16>() {
                Ok(p) if p > 0 => p,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let environment = get("APP_ENV").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        Ok(Self {
            exchange: ExchangeSettings {
                api_key,
                secret_key,
                base_url,
            },
            port,
            environment,
        })
    }

    pub fn has_api_key(&self) -> bool {
        !self.exchange.api_key.is_empty()
    }

    pub fn has_secret_key(&self) -> bool {
        !self.exchange.secret_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let settings =
            Settings::from_lookup(lookup(&[("BINANCE_API_KEY", "key"), ("BINANCE_SECRET_KEY", "secret")]))
                .unwrap();

        assert_eq!(settings.port, 3000);
        assert_eq!(settings.environment, "development");
        assert_eq!(settings.exchange.base_url, "https://fapi.binance.com");
        assert!(settings.has_api_key());
        assert!(settings.has_secret_key());
    }

    #[test]
    fn test_missing_secret_fails_loudly() {
        let err = Settings::from_lookup(lookup(&[("BINANCE_API_KEY", "key")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BINANCE_SECRET_KEY"));

        // Whitespace-only counts as missing
        let err = Settings::from_lookup(lookup(&[
            ("BINANCE_API_KEY", "key"),
            ("BINANCE_SECRET_KEY", "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("BINANCE_SECRET_KEY"));
    }

    #[test]
    fn test_missing_api_key() {
        let err = Settings::from_lookup(lookup(&[("BINANCE_SECRET_KEY", "secret")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("BINANCE_API_KEY"));
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            ("BINANCE_API_KEY", "key"),
            ("BINANCE_SECRET_KEY", "secret"),
            ("BINANCE_BASE_URL", "https://testnet.binancefuture.com/"),
            ("PORT", "8080"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.environment, "production");
        assert_eq!(settings.exchange.base_url, "https://testnet.binancefuture.com");
    }

    #[test]
    fn test_invalid_port_and_url() {
        let err = Settings::from_lookup(lookup(&[
            ("BINANCE_API_KEY", "key"),
            ("BINANCE_SECRET_KEY", "secret"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));

        let err = Settings::from_lookup(lookup(&[
            ("BINANCE_API_KEY", "key"),
            ("BINANCE_SECRET_KEY", "secret"),
            ("BINANCE_BASE_URL", "not a url"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_, _)));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let settings =
            Settings::from_lookup(lookup(&[("BINANCE_API_KEY", "key123"), ("BINANCE_SECRET_KEY", "s3cr3t")]))
                .unwrap();
        let printed = format!("{:?}", settings);
        assert!(!printed.contains("s3cr3t"));
        assert!(!printed.contains("key123"));
    }
}
