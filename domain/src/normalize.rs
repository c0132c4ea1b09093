//! Model output normalization.
//!
//! LLMs frequently wrap their JSON reply in explanatory prose or
//! markdown code fences. These functions recover a single JSON object
//! from whatever the model actually returned. Pure domain logic — no
//! I/O, no session state, just parsing.
//!
//! Recovery attempts, in order (first success wins):
//!
//! 1. Already an object — returned unchanged.
//! 2. Direct parse of the fence-stripped, trimmed text.
//! 3. Slice from the first `{` to the last `}` inclusive and parse that.
//!
//! A top-level array, scalar, or null is never a valid result.

use crate::core::error::AnalysisError;
use serde_json::{Map, Value};

/// Normalize an arbitrary model output value into a JSON object.
///
/// Accepts values that are already structured (object passes through
/// unchanged, making this idempotent) as well as raw text that still
/// needs parsing. Null fails immediately: a transport that produced no
/// body is not recoverable here.
pub fn normalize(raw: Value) -> Result<Map<String, Value>, AnalysisError> {
    match raw {
        Value::Object(map) => Ok(map),
        Value::Null => Err(AnalysisError::MalformedOutput(
            "LLM returned null instead of valid JSON".to_string(),
        )),
        Value::String(text) => normalize_text(&text),
        other => Err(AnalysisError::MalformedOutput(format!(
            "LLM returned unsupported format: {}",
            type_name(&other)
        ))),
    }
}

/// Recover a JSON object from raw model text.
///
/// Strips markdown code fences and surrounding whitespace, then tries a
/// direct parse followed by a first-`{`/last-`}` slice for replies that
/// embed the object in prose.
pub fn normalize_text(raw: &str) -> Result<Map<String, Value>, AnalysisError> {
    let cleaned = strip_code_fences(raw);

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(cleaned) {
        return Ok(map);
    }

    // The model may have added text around the object
    if let Some(start) = cleaned.find('{')
        && let Some(end) = cleaned.rfind('}')
        && start < end
    {
        let sliced = &cleaned[start..=end];
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(sliced) {
            return Ok(map);
        }
    }

    Err(AnalysisError::MalformedOutput(format!(
        "invalid JSON from LLM: {raw}"
    )))
}

/// Strip surrounding markdown code-fence markers, with or without a
/// language tag, and trim whitespace.
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the language tag (e.g. "json") up to the first newline
        text = match rest.split_once('\n') {
            Some((_, body)) => body,
            None => rest,
        };
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
