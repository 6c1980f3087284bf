//! Runtime configuration from environment variables.
//!
//! | Variable                          | Default                   |
//! |-----------------------------------|---------------------------|
//! | `CARDIOCHECK_ENDPOINT`            | `http://127.0.0.1:8000`   |
//! | `CARDIOCHECK_LOG_MODE`            | `auto` (`file`, `stdout`) |
//! | `CARDIOCHECK_LOG_FILE`            | `cardiocheck.log`         |
//! | `CARDIOCHECK_SANITIZE_MAX_BYTES`  | 16384                     |

use std::path::PathBuf;

use url::Url;

use crate::adapters::sanitize::DEFAULT_SANITIZE_MAX_BYTES;

pub const ENDPOINT_ENV: &str = "CARDIOCHECK_ENDPOINT";
pub const LOG_MODE_ENV: &str = "CARDIOCHECK_LOG_MODE";
pub const LOG_FILE_ENV: &str = "CARDIOCHECK_LOG_FILE";
pub const SANITIZE_MAX_BYTES_ENV: &str = "CARDIOCHECK_SANITIZE_MAX_BYTES";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";
pub const DEFAULT_LOG_FILE: &str = "cardiocheck.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal (the TUI owns it), stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` given whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{ENDPOINT_ENV} is not a valid URL: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("{ENDPOINT_ENV} must use http or https, got {0}")]
    Scheme(String),

    #[error("Unknown {LOG_MODE_ENV} {0:?} (expected auto, file or stdout)")]
    LogMode(String),

    #[error("{SANITIZE_MAX_BYTES_ENV} must be a positive integer, got {0:?}")]
    SanitizeMaxBytes(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the prediction service
    pub endpoint: Url,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub sanitize_max_bytes: usize,
}

impl Config {
    /// Load from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary lookup; unset or blank variables take
    /// their default.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint_raw = get(ENDPOINT_ENV).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(endpoint_raw.trim())?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::Scheme(endpoint.scheme().to_string()));
        }

        let log_mode = match get(LOG_MODE_ENV).as_deref().map(str::trim) {
            None | Some("auto") => LogMode::Auto,
            Some("file") => LogMode::File,
            Some("stdout") => LogMode::Stdout,
            Some(other) => return Err(ConfigError::LogMode(other.to_string())),
        };

        let log_file = get(LOG_FILE_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        let sanitize_max_bytes = match get(SANITIZE_MAX_BYTES_ENV) {
            None => DEFAULT_SANITIZE_MAX_BYTES,
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|&v| v > 0)
                .ok_or(ConfigError::SanitizeMaxBytes(raw))?,
        };

        Ok(Self {
            endpoint,
            log_mode,
            log_file,
            sanitize_max_bytes,
        })
    }
}
