//! Domain layer for interview-analyzer
//!
//! This crate contains the core analysis logic: normalizing raw model
//! output into JSON objects, validating the fields an interview
//! response analysis requires, and rendering the prompts. It has no
//! dependencies on infrastructure or transport concerns.
//!
//! # Core Concepts
//!
//! - **Normalization**: models wrap JSON in prose and code fences;
//!   [`normalize`] recovers the object or rejects the output.
//! - **Validation**: required keys (`next_question`, `feedback`,
//!   `score`) and the 0-10 score range, with all violations reported
//!   through one [`AnalysisError`] taxonomy.

pub mod core;
pub mod interview;
pub mod normalize;
pub mod prompt;

// Re-export commonly used types
pub use crate::core::error::AnalysisError;
pub use interview::{
    AnalysisContext, AnalysisOutcome, Feedback,
    validation::{parse_feedback, parse_next_question, validate_score},
};
pub use normalize::{normalize, normalize_text};
pub use prompt::InterviewPromptTemplate;
