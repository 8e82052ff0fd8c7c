//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SWIFTCART_API_BASE_URL` - Base URL of the backend API
//!   (e.g., <https://shop.example.com/api/v1>)
//!
//! ## Optional
//! - `SWIFTCART_REQUEST_TIMEOUT_MS` - Per-request timeout (default: 10000)
//! - `SWIFTCART_SEARCH_DEBOUNCE_MS` - Search debounce delay (default: 500)
//! - `SWIFTCART_CATALOG_CACHE_TTL_SECS` - Catalog cache TTL (default: 300)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the backend API.
    pub base_url: Url,
    /// Timeout applied to every backend request.
    pub request_timeout: Duration,
    /// Delay between the last keystroke and the search request.
    pub search_debounce: Duration,
    /// How long an unfiltered catalog response may be served from cache.
    pub catalog_cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Create a configuration with default timings for the given backend.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_TTL_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(
            "SWIFTCART_API_BASE_URL",
            &get_required_env("SWIFTCART_API_BASE_URL")?,
        )?;
        let request_timeout = Duration::from_millis(parse_u64(
            "SWIFTCART_REQUEST_TIMEOUT_MS",
            &get_env_or_default("SWIFTCART_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS),
        )?);
        let search_debounce = Duration::from_millis(parse_u64(
            "SWIFTCART_SEARCH_DEBOUNCE_MS",
            &get_env_or_default("SWIFTCART_SEARCH_DEBOUNCE_MS", DEFAULT_SEARCH_DEBOUNCE_MS),
        )?);
        let catalog_cache_ttl = Duration::from_secs(parse_u64(
            "SWIFTCART_CATALOG_CACHE_TTL_SECS",
            &get_env_or_default(
                "SWIFTCART_CATALOG_CACHE_TTL_SECS",
                DEFAULT_CATALOG_CACHE_TTL_SECS,
            ),
        )?);

        Ok(Self {
            base_url,
            request_timeout,
            search_debounce,
            catalog_cache_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a numeric default value.
fn get_env_or_default(key: &str, default: u64) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a base URL, requiring an http(s) scheme.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}

/// Parse a non-negative integer environment value.
fn parse_u64(var_name: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))
}
