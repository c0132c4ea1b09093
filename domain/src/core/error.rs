//! Analysis error taxonomy

use thiserror::Error;

/// Errors surfaced by the response-analysis flow.
///
/// Every failure — malformed model output, validation, transport, or
/// timeout — is converted into this one type before it crosses the
/// use-case boundary, so callers branch on the variant instead of
/// parsing message text.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// No valid JSON object could be recovered from the model output
    #[error("malformed LLM output: {0}")]
    MalformedOutput(String),

    /// Required keys absent from an otherwise-valid object.
    /// Carries every missing key, not just the first one found.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Score present but not coercible to a number, or outside [0, 10]
    #[error("invalid score: {0}")]
    InvalidScore(String),

    /// The combined operation exceeded its deadline
    #[error("LLM operations timed out")]
    Timeout,

    /// The gateway invocation itself failed (network, auth, quota)
    #[error("gateway failure: {0}")]
    Transport(String),
}

impl AnalysisError {
    /// Check if this error represents a deadline expiry
    pub fn is_timeout(&self) -> bool {
        matches!(self, AnalysisError::Timeout)
    }
}
