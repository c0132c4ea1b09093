//! LLM Gateway port
//!
//! Defines the interface for communicating with an LLM backend.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a gateway invocation
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("other error: {0}")]
    Other(String),
}

/// Gateway for LLM communication.
///
/// This port defines how the application layer reaches the model
/// backend. Implementations (adapters) live in the infrastructure
/// layer. One invocation sends one fully rendered prompt and returns
/// the raw model text; the gateway performs no retries, so a transport
/// fault surfaces on the first failure.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a prompt and return the raw model response text
    async fn invoke(&self, prompt: &str) -> Result<String, GatewayError>;
}
