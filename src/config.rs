//! Configuration System
//!
//! Layered configuration for the relay transport, content limits and
//! logging. Supports file layering with environment variable overrides and
//! validation before use.

use crate::error::ApiError;
use crate::logging::{self, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Management document announcing the repository locations
pub const DEFAULT_MANAGEMENT_URL: &str =
    "http://patch01.pso2gs.net/patch_prod/patches/management_beta.txt";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
/// Largest file the content path will fetch (128 MiB)
pub const DEFAULT_CONTENT_MAX_BYTES: u64 = 128 * 1024 * 1024;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchTreeConfig {
    /// Relay proxy and management document
    #[serde(default)]
    pub relay: RelayConfig,

    /// File content retrieval
    #[serde(default)]
    pub content: ContentConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Relay transport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Relay endpoint accepting `{"url": ..}` requests. Required for network access.
    #[serde(default)]
    pub proxy_url: Option<String>,

    #[serde(default = "default_management_url")]
    pub management_url: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_management_url() -> String {
    DEFAULT_MANAGEMENT_URL.to_string()
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            proxy_url: None,
            management_url: default_management_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl RelayConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate relay configuration
    pub fn validate(&self) -> Result<(), String> {
        if let Some(proxy) = &self.proxy_url {
            if !is_http_url(proxy) {
                return Err(format!("proxy_url must be an http(s) URL, got '{}'", proxy));
            }
        }
        if !is_http_url(&self.management_url) {
            return Err(format!(
                "management_url must be an http(s) URL, got '{}'",
                self.management_url
            ));
        }
        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err("Timeouts must be at least one second".to_string());
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Content retrieval settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,
}

fn default_max_bytes() -> u64 {
    DEFAULT_CONTENT_MAX_BYTES
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Relay(String),
    Content(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Relay(msg) => write!(f, "Relay: {}", msg),
            ValidationError::Content(msg) => write!(f, "Content: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PatchTreeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.relay.validate() {
            errors.push(ValidationError::Relay(e));
        }
        if self.content.max_bytes == 0 {
            errors.push(ValidationError::Content(
                "max_bytes must be greater than zero".to_string(),
            ));
        }
        if let Err(e) = logging::validate(&self.logging) {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every problem into one error
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}
