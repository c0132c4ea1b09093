//! Required-field and score validation for normalized model output.
//!
//! These checks run after [`crate::normalize`] has recovered a JSON
//! object; they decide whether that object actually answers the
//! request. Missing keys are collected and reported together so the
//! model's whole contract violation is visible in one error.

use crate::core::error::AnalysisError;
use crate::interview::Feedback;
use serde_json::{Map, Value};

/// Minimum and maximum valid score, inclusive.
pub const SCORE_RANGE: (f64, f64) = (0.0, 10.0);

/// Extract the next interview question from a normalized model reply.
pub fn parse_next_question(map: &Map<String, Value>) -> Result<String, AnalysisError> {
    let value = map.get("next_question").ok_or_else(|| {
        AnalysisError::MissingFields(vec!["next_question".to_string()])
    })?;

    match value.as_str() {
        Some(question) => Ok(question.to_string()),
        None => Err(AnalysisError::MalformedOutput(format!(
            "next_question is not a string: {value}"
        ))),
    }
}

/// Extract feedback and score from a normalized model reply.
///
/// Reports every missing required key in a single error. The score is
/// range-checked but stored in its original representation.
pub fn parse_feedback(map: &Map<String, Value>) -> Result<Feedback, AnalysisError> {
    let missing: Vec<String> = ["feedback", "score"]
        .iter()
        .filter(|key| !map.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(AnalysisError::MissingFields(missing));
    }

    let feedback = match map["feedback"].as_str() {
        Some(text) => text.to_string(),
        None => {
            return Err(AnalysisError::MalformedOutput(format!(
                "feedback is not a string: {}",
                map["feedback"]
            )));
        }
    };

    let score = map["score"].clone();
    validate_score(&score)?;

    Ok(Feedback { feedback, score })
}

/// Check that a score value is coercible to a number inside [0, 10].
///
/// Accepts JSON numbers and numeric strings (`7`, `7.5`, `"7"`).
/// Returns the coerced value for range checking only — callers keep
/// the original representation.
pub fn validate_score(value: &Value) -> Result<f64, AnalysisError> {
    let coerced = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    let Some(score) = coerced else {
        return Err(AnalysisError::InvalidScore(format!(
            "score must be a number: {value}"
        )));
    };

    let (min, max) = SCORE_RANGE;
    if !(min..=max).contains(&score) {
        return Err(AnalysisError::InvalidScore(format!(
            "score out of range: {score}"
        )));
    }

    Ok(score)
}
