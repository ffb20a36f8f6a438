//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `STRIAE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::time::Duration;

/// Default page size for batched candidate retrieval.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default signature backend URL used when `STRIAE_BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:6311";

/// Default timeout for one signature backend request. Generation is
/// potentially long-running.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Engine configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `STRIAE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Signature computation backend endpoint. Default: `http://localhost:6311`.
    pub backend_url: String,

    /// Per-request timeout for the signature backend. Default: 300s.
    pub request_timeout: Duration,

    /// Page size for candidate sample retrieval. Default: `10`.
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    const ENV_BACKEND_URL: &'static str = "STRIAE_BACKEND_URL";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "STRIAE_REQUEST_TIMEOUT_SECS";
    const ENV_PAGE_SIZE: &'static str = "STRIAE_PAGE_SIZE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let backend_url = Self::parse_string_from_env(Self::ENV_BACKEND_URL, defaults.backend_url);
        let request_timeout = Self::parse_timeout_from_env(defaults.request_timeout)?;
        let page_size = Self::parse_page_size_from_env(defaults.page_size)?;

        let config = Self {
            backend_url,
            request_timeout,
            page_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize {
                value: self.page_size.to_string(),
            });
        }

        if self.backend_url.is_empty() {
            return Err(ConfigError::InvalidBackendUrl {
                value: self.backend_url.clone(),
            });
        }

        Ok(())
    }

    fn parse_string_from_env(key: &str, default: String) -> String {
        env::var(key).unwrap_or(default)
    }

    fn parse_timeout_from_env(default: Duration) -> Result<Duration, ConfigError> {
        match env::var(Self::ENV_REQUEST_TIMEOUT_SECS) {
            Ok(value) => {
                let secs: u64 = value
                    .parse()
                    .map_err(|e| ConfigError::TimeoutParseError { value, source: e })?;
                Ok(Duration::from_secs(secs))
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_page_size_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_PAGE_SIZE) {
            Ok(value) => {
                let size: usize = value
                    .parse()
                    .map_err(|e| ConfigError::PageSizeParseError {
                        value: value.clone(),
                        source: e,
                    })?;

                if size == 0 {
                    return Err(ConfigError::InvalidPageSize { value });
                }

                Ok(size)
            }
            Err(_) => Ok(default),
        }
    }
}
