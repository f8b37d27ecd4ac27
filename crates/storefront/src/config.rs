//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_CONTENT_URL` - Base URL serving `settings.json` and `products.json`
//! - `STOREFRONT_CONTENT_DIR` - Local content directory, used when no URL is set (default: content)
//! - `STOREFRONT_CONTENT_TTL_SECS` - Content cache TTL in seconds, 0 disables (default: 300)
//! - `STOREFRONT_DATA_DIR` - Directory for the persisted cart (default: .storefront)
//! - `STOREFRONT_STORE_NAME` - Store name used in order messages (default: Black Royalty Stores)
//! - `STOREFRONT_WHATSAPP_NUMBER` - Checkout contact when settings.json has none
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::content::{ContentError, ContentSource};

/// Store name used when none is configured.
pub const DEFAULT_STORE_NAME: &str = "Black Royalty Stores";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Where `settings.json` and `products.json` are read from
    pub content_source: ContentSource,
    /// How long successful content reads are reused
    pub content_ttl: Duration,
    /// Directory of the file-backed key-value store holding the cart
    pub data_dir: PathBuf,
    /// Store name for order messages
    pub store_name: String,
    /// Checkout contact fallback when settings omit one
    pub whatsapp_number: Option<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let get_optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get_or("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| invalid("STOREFRONT_HOST", &e))?;
        let port = get_or("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| invalid("STOREFRONT_PORT", &e))?;
        let ttl_secs = get_or("STOREFRONT_CONTENT_TTL_SECS", "300")
            .parse::<u64>()
            .map_err(|e| invalid("STOREFRONT_CONTENT_TTL_SECS", &e))?;

        let content_source = match get_optional("STOREFRONT_CONTENT_URL") {
            Some(url) => ContentSource::remote(&url)
                .map_err(|e: ContentError| invalid("STOREFRONT_CONTENT_URL", &e))?,
            None => ContentSource::Directory(PathBuf::from(get_or(
                "STOREFRONT_CONTENT_DIR",
                "content",
            ))),
        };

        Ok(Self {
            host,
            port,
            content_source,
            content_ttl: Duration::from_secs(ttl_secs),
            data_dir: PathBuf::from(get_or("STOREFRONT_DATA_DIR", ".storefront")),
            store_name: get_or("STOREFRONT_STORE_NAME", DEFAULT_STORE_NAME),
            whatsapp_number: get_optional("STOREFRONT_WHATSAPP_NUMBER"),
            sentry_dsn: get_optional("SENTRY_DSN"),
            sentry_environment: get_optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn invalid(key: &str, err: &impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), err.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.content_source,
            ContentSource::Directory(PathBuf::from("content"))
        );
        assert_eq!(config.content_ttl, Duration::from_secs(300));
        assert_eq!(config.data_dir, PathBuf::from(".storefront"));
        assert_eq!(config.store_name, DEFAULT_STORE_NAME);
        assert!(config.whatsapp_number.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_content_url_takes_precedence() {
        let config = config_from(&[
            ("STOREFRONT_CONTENT_URL", "https://cdn.example.com/content"),
            ("STOREFRONT_CONTENT_DIR", "ignored"),
        ])
        .unwrap();
        let ContentSource::Remote(url) = config.content_source else {
            panic!("expected remote source");
        };
        assert_eq!(url.as_str(), "https://cdn.example.com/content/");
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("STOREFRONT_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "STOREFRONT_PORT"));
    }

    #[test]
    fn test_invalid_host() {
        assert!(config_from(&[("STOREFRONT_HOST", "localhost")]).is_err());
    }

    #[test]
    fn test_invalid_content_url() {
        let err = config_from(&[("STOREFRONT_CONTENT_URL", "not a url")]).unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_CONTENT_URL"));
    }

    #[test]
    fn test_blank_optional_values_are_unset() {
        let config = config_from(&[("STOREFRONT_WHATSAPP_NUMBER", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert!(config.whatsapp_number.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_zero_ttl() {
        let config = config_from(&[("STOREFRONT_CONTENT_TTL_SECS", "0")]).unwrap();
        assert!(config.content_ttl.is_zero());
    }
}
