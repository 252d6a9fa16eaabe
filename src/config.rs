//! Configuration management for envzero
//!
//! Settings are loaded from environment variables, with defaults for anything
//! unset. Command-line flags override the loaded values.
//!
//! # Environment Variables
//!
//! - `ENVZERO_HOST`: Bind host - default: "0.0.0.0"
//! - `ENVZERO_PORT`: Bind port - default: "3001"
//! - `ENVZERO_MAX_CONCURRENT_RESOLUTIONS`: Worker pool bound - default: "16"
//! - `ENVZERO_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use envzero::EnvzeroConfig;
//!
//! let config = EnvzeroConfig::from_env().expect("Invalid environment");
//! config.validate().expect("Invalid configuration");
//! println!("Listening on {}", config.bind_address());
//! ```

use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_MAX_CONCURRENT_RESOLUTIONS: usize = 16;
pub const DEFAULT_LOG_LEVEL: &str = "info";

const MAX_CONCURRENT_RESOLUTIONS_LIMIT: usize = 1024;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvzeroConfig {
    /// Host the HTTP service binds to
    pub host: String,

    pub port: u16,

    /// Upper bound on resolutions running at once on the worker pool
    pub max_concurrent_resolutions: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for EnvzeroConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            max_concurrent_resolutions: DEFAULT_MAX_CONCURRENT_RESOLUTIONS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl EnvzeroConfig {
    /// Loads configuration from `ENVZERO_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if a numeric variable is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let host = env::var("ENVZERO_HOST").unwrap_or(defaults.host);
        let port = parse_env("ENVZERO_PORT")?.unwrap_or(defaults.port);
        let max_concurrent_resolutions = parse_env("ENVZERO_MAX_CONCURRENT_RESOLUTIONS")?
            .unwrap_or(defaults.max_concurrent_resolutions);
        let log_level = env::var("ENVZERO_LOG_LEVEL")
            .unwrap_or(defaults.log_level)
            .to_lowercase();

        Ok(Self {
            host,
            port,
            max_concurrent_resolutions,
            log_level,
        })
    }

    /// Validates the configuration
    ///
    /// Checks that the host is set, the worker bound is in range and the log
    /// level is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Host cannot be empty".to_string(),
            ));
        }

        if self.max_concurrent_resolutions == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max concurrent resolutions must be at least 1".to_string(),
            ));
        }
        if self.max_concurrent_resolutions > MAX_CONCURRENT_RESOLUTIONS_LIMIT {
            return Err(ConfigError::ValidationFailed(format!(
                "Max concurrent resolutions cannot exceed {}",
                MAX_CONCURRENT_RESOLUTIONS_LIMIT
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_env<T>(field: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(field) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                field: field.to_string(),
                error: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}
