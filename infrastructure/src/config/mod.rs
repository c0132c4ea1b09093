//! Configuration loading and validation

mod file_config;
mod loader;

pub use file_config::{ConfigValidationError, FileBehaviorConfig, FileConfig, FileGatewayConfig};
pub use loader::ConfigLoader;
