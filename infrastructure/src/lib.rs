//! Infrastructure layer for interview-analyzer
//!
//! This crate contains adapters that implement the ports defined in
//! the application layer, plus configuration file loading.

pub mod config;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig};
pub use providers::{GeminiConfig, GeminiGateway};
