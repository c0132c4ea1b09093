//! Google Gemini provider
//!
//! HTTP adapter for the Generative Language `generateContent` API with
//! a bounded in-flight call ceiling.

mod adapter;
mod types;

pub use adapter::{GeminiConfig, GeminiGateway};
