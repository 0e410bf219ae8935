//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STOREFRONT_API_URL` - Base URL of the remote product/cart API
//!   (default: `https://dummyjson.com`)
//! - `STOREFRONT_HTTP_TIMEOUT_SECS` - Request timeout in seconds, applied to
//!   the HTTP client; unset delegates timeout behavior to the transport
//! - `STOREFRONT_SESSION_CACHE` - Path of the JSON file the logged-in user
//!   is cached under (default: `.bazaar/session.json`)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "https://dummyjson.com";
const DEFAULT_SESSION_CACHE: &str = ".bazaar/session.json";

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
    /// Remote API configuration.
    pub api: ApiConfig,
    /// Path of the local session cache file.
    pub session_cache: PathBuf,
}

/// Remote product/cart API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL all request paths are joined onto.
    pub base_url: Url,
    /// Per-request timeout; `None` leaves timeouts to the transport.
    pub timeout: Option<Duration>,
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

        let base_url = get_env_or_default("STOREFRONT_API_URL", DEFAULT_API_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_API_URL".to_string(), e.to_string())
            })?;

        let timeout = get_optional_env("STOREFRONT_HTTP_TIMEOUT_SECS")
            .map(|raw| {
                raw.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "STOREFRONT_HTTP_TIMEOUT_SECS".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        let session_cache =
            PathBuf::from(get_env_or_default("STOREFRONT_SESSION_CACHE", DEFAULT_SESSION_CACHE));

        Ok(Self {
            api: ApiConfig { base_url, timeout },
            session_cache,
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
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
    fn test_default_api_url_parses() {
        let url = DEFAULT_API_URL.parse::<Url>().unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_get_env_or_default_falls_back() {
        assert_eq!(
            get_env_or_default("BAZAAR_TEST_UNSET_VAR", "fallback"),
            "fallback"
        );
    }
}
