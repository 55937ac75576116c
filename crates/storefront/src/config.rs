//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `FASHIONHUB_API_URL` - Base URL of the shop API
//!   (default: `http://localhost:8080/api`)
//! - `FASHIONHUB_API_TIMEOUT_SECS` - Per-request timeout in seconds
//!   (default: 10)
//! - `FASHIONHUB_SESSION_FILE` - Path of the durable session slot
//!   (default: `.fashionhub/session.json`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default shop API base URL (the backend's local development address).
const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default path of the durable session slot.
const DEFAULT_SESSION_FILE: &str = ".fashionhub/session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shop API configuration.
    pub api: ShopApiConfig,
    /// Path of the single durable session slot.
    pub session_file: PathBuf,
}

/// Shop API client configuration.
#[derive(Debug, Clone)]
pub struct ShopApiConfig {
    /// Base URL of the shop API (e.g., `http://localhost:8080/api`).
    pub base_url: Url,
    /// Fixed timeout applied to every remote call.
    pub timeout: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            api: ShopApiConfig::from_env()?,
            session_file: PathBuf::from(get_env_or_default(
                "FASHIONHUB_SESSION_FILE",
                DEFAULT_SESSION_FILE,
            )),
        })
    }
}

impl ShopApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("FASHIONHUB_API_URL", DEFAULT_API_URL);
        let base_url = Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("FASHIONHUB_API_URL".to_string(), e.to_string())
        })?;

        let timeout_secs = get_env_or_default(
            "FASHIONHUB_API_TIMEOUT_SECS",
            &DEFAULT_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("FASHIONHUB_API_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration pointing at an explicit base URL.
    ///
    /// Used by tests and tools that target a non-default shop API.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url).map_err(|e| {
                ConfigError::InvalidEnvVar("base_url".to_string(), e.to_string())
            })?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Resolve an API path against the base URL.
    ///
    /// The base URL is treated as a directory prefix, so
    /// `http://host/api` + `products/P1` → `http://host/api/products/P1`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_paths() {
        let config = ShopApiConfig::for_base_url("http://localhost:8080/api").unwrap();
        assert_eq!(
            config.endpoint("products"),
            "http://localhost:8080/api/products"
        );
        assert_eq!(
            config.endpoint("/products/P1"),
            "http://localhost:8080/api/products/P1"
        );
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let config = ShopApiConfig::for_base_url("http://localhost:8080/api/").unwrap();
        assert_eq!(
            config.endpoint("categories"),
            "http://localhost:8080/api/categories"
        );
    }

    #[test]
    fn for_base_url_rejects_garbage() {
        assert!(ShopApiConfig::for_base_url("not a url").is_err());
    }

    #[test]
    fn default_timeout() {
        let config = ShopApiConfig::for_base_url("http://localhost:8080/api").unwrap();
        assert_eq!(config.timeout, Duration::from_secs(10));
    }
}
