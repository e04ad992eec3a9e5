//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `UTE_SHOP_API_URL` - Backend API base URL (default: `http://localhost:5000/api`)
//! - `UTE_SHOP_TIMEOUT_MS` - Request timeout in milliseconds (default: 10000)
//! - `UTE_SHOP_DATA_DIR` - Directory for durable snapshots; when unset the
//!   client runs without persistence (the headless-render mode)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default backend base URL, matching the development backend.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// UTE Shop client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API base URL (no trailing slash).
    pub api_url: String,
    /// Timeout applied to every gateway request.
    pub timeout: Duration,
    /// Durable-storage directory. `None` disables persistence.
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = normalize_base_url(get_env_or_default("UTE_SHOP_API_URL", DEFAULT_API_URL));

        let timeout_ms = get_env_or_default("UTE_SHOP_TIMEOUT_MS", "10000")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("UTE_SHOP_TIMEOUT_MS".to_owned(), e.to_string())
            })?;

        let data_dir = std::env::var("UTE_SHOP_DATA_DIR").ok().map(PathBuf::from);

        Ok(Self {
            api_url,
            timeout: Duration::from_millis(timeout_ms),
            data_dir,
        })
    }

    /// Replace the API base URL.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = normalize_base_url(url.into());
        self
    }

    /// Replace the durable-storage directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Strip any trailing slash so endpoint paths can be appended verbatim.
fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_dev_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::default().with_api_url("http://shop.test/api/");
        assert_eq!(config.api_url, "http://shop.test/api");
    }
}
