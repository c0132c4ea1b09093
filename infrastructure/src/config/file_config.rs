//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file
//! and are deserialized directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("max_concurrency cannot be 0")]
    InvalidConcurrency,

    #[error("model name cannot be empty")]
    EmptyModelName,

    #[error("GOOGLE_API_KEY is not set")]
    MissingApiKey,
}

/// Raw gateway configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Model name sent to the API
    pub model: String,
    /// Maximum concurrent in-flight API calls
    pub max_concurrency: usize,
    /// Per-request HTTP timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            max_concurrency: 4,
            request_timeout_seconds: 60,
        }
    }
}

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Deadline in seconds for the combined analysis
    pub timeout_seconds: u64,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30 }
    }
}

/// Top-level configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gateway: FileGatewayConfig,
    pub behavior: FileBehaviorConfig,
}

impl FileConfig {
    /// Reject configurations that would hang or never dispatch.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.behavior.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.gateway.max_concurrency == 0 {
            return Err(ConfigValidationError::InvalidConcurrency);
        }
        if self.gateway.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        Ok(())
    }
}
