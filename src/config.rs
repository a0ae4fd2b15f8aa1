//! Configuration management for the marketplace client.
//!
//! Configuration is read from environment variables, with an optional `.env`
//! file loaded first.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Default marketplace API host.
pub const DEFAULT_API_URL: &str = "http://marketplace.envato.com";

/// Default cache TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration for the marketplace client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Marketplace API base URL
    pub api_url: String,

    /// Marketplace user name, used by private sets when no user is passed
    pub user_name: String,

    /// API key for private sets
    pub api_key: String,

    /// Cache TTL in seconds (default: 300)
    pub cache_ttl_secs: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,
}

impl ClientConfig {
    /// Create a configuration for `api_url` with no credentials.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Attach credentials for private sets.
    pub fn with_credentials(
        mut self,
        user_name: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        self.user_name = user_name.into();
        self.api_key = api_key.into();
        self
    }

    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `MARKETPLACE_API_URL`: API base URL (default: `http://marketplace.envato.com`)
    /// - `MARKETPLACE_USER_NAME`: user name for private sets
    /// - `MARKETPLACE_API_KEY`: API key for private sets (must not be blank when set)
    /// - `MARKETPLACE_CACHE_TTL`: cache TTL in seconds (default: 300)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    pub fn from_env() -> ConfigResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::DotenvError(e.to_string()));
            }
        }

        let api_url =
            env::var("MARKETPLACE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "MARKETPLACE_API_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let user_name = env::var("MARKETPLACE_USER_NAME").unwrap_or_default();

        let api_key = match env::var("MARKETPLACE_API_KEY") {
            Ok(key) if key.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "MARKETPLACE_API_KEY".to_string(),
                    reason: "Cannot be blank".to_string(),
                });
            }
            Ok(key) => key,
            Err(_) => String::new(),
        };

        let cache_ttl_secs =
            Self::parse_env_u64("MARKETPLACE_CACHE_TTL", DEFAULT_CACHE_TTL_SECS)?;
        let request_timeout =
            Self::parse_env_u64("REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        Ok(ClientConfig {
            api_url,
            user_name,
            api_key,
            cache_ttl_secs,
            request_timeout,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_url: DEFAULT_API_URL.to_string(),
            user_name: String::new(),
            api_key: String::new(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
