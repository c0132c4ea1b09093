//! Interview analysis subdomain.
//!
//! - [`AnalysisContext`] — the four pieces of interview context every
//!   LLM call is rendered from
//! - [`Feedback`] / [`AnalysisOutcome`] — validated results
//! - [`validation`] — required-field and score checks on normalized output

pub mod validation;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Interview context shared by both LLM calls (Value Object).
///
/// All four fields are plain strings; empty strings are valid input.
/// The first question of a session simply has an empty
/// `candidate_response`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisContext {
    /// The question the candidate was asked
    pub question: String,
    /// The candidate's answer to that question
    pub candidate_response: String,
    /// The job description the interview is for
    pub job_description: String,
    /// Highlights extracted from the candidate's resume
    pub resume_highlights: String,
}

impl AnalysisContext {
    pub fn new(
        question: impl Into<String>,
        candidate_response: impl Into<String>,
        job_description: impl Into<String>,
        resume_highlights: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            candidate_response: candidate_response.into(),
            job_description: job_description.into(),
            resume_highlights: resume_highlights.into(),
        }
    }
}

/// Validated feedback on a candidate response.
///
/// `score` keeps whatever representation the model produced (integer,
/// float, or numeric string). Validation coerces a copy to check the
/// [0, 10] range but never rewrites the stored value, so callers see
/// exactly what the model said.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    /// Free-form feedback text
    pub feedback: String,
    /// Score in [0, 10]; original JSON representation preserved
    pub score: Value,
}

/// Result of the combined analysis: the next question to ask plus
/// feedback on the answer just given.
///
/// Only produced when both underlying LLM calls succeed within the
/// deadline; there is no partial outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    pub next_question: String,
    pub feedback: Feedback,
}
