//! Application layer for interview-analyzer
//!
//! This crate contains the use case orchestrating the two LLM calls
//! and the port definition the infrastructure layer implements. It
//! depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::llm_gateway::{GatewayError, LlmGateway};
pub use use_cases::analyze_response::{AnalyzeResponseUseCase, DEFAULT_TIMEOUT};
