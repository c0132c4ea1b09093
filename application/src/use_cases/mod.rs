//! Application use cases

pub mod analyze_response;
