//! Parse LLM output into verdicts

use crate::error::ClassifierError;
use serde_json::Value;
use tracing::warn;
use vigil_domain::{OffenseType, Verdict};

/// Parse the LLM response for a batch of `expected` comments
///
/// The response must be a JSON array with at least `expected` verdict
/// objects. Any malformed element fails the whole response, since positions
/// would no longer line up with the comments sent.
pub fn parse_llm_response(response: &str, expected: usize) -> Result<Vec<Verdict>, ClassifierError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;

    let items = json
        .as_array()
        .ok_or_else(|| ClassifierError::InvalidFormat("Expected JSON array".to_string()))?;

    if items.len() < expected {
        return Err(ClassifierError::CountMismatch {
            expected,
            actual: items.len(),
        });
    }
    if items.len() > expected {
        warn!(
            "LLM returned {} verdicts for {} comments, ignoring the extra",
            items.len(),
            expected
        );
    }

    items
        .iter()
        .take(expected)
        .enumerate()
        .map(|(idx, item)| {
            parse_verdict_json(item)
                .map_err(|e| ClassifierError::InvalidFormat(format!("verdict {}: {}", idx + 1, e)))
        })
        .collect()
}

/// Extract JSON from response, handling markdown code blocks
pub fn extract_json(response: &str) -> Result<String, ClassifierError> {
    let trimmed = response.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return Ok(trimmed.to_string());
    };

    // Only the fence marker and its language tag go; JSON may follow on the same line
    let body = rest.strip_prefix("json").unwrap_or(rest).trim_end();
    let body = body.strip_suffix("```").unwrap_or(body);

    if body.trim().is_empty() {
        return Err(ClassifierError::InvalidFormat("Empty code block".to_string()));
    }
    Ok(body.trim().to_string())
}

/// Parse a single verdict object
fn parse_verdict_json(json: &Value) -> Result<Verdict, String> {
    let obj = json
        .as_object()
        .ok_or_else(|| "Verdict is not a JSON object".to_string())?;

    let is_offensive = obj
        .get("is_offensive")
        .and_then(Value::as_bool)
        .ok_or_else(|| "Missing or invalid 'is_offensive'".to_string())?;

    let label = obj
        .get("offense_type")
        .and_then(Value::as_str)
        .ok_or_else(|| "Missing or invalid 'offense_type'".to_string())?;
    let offense_type = match OffenseType::parse(label) {
        // The error sentinel is ours to assign, never the model's
        Some(OffenseType::Error) | None => {
            return Err(format!("Unknown offense_type '{}'", label));
        }
        Some(t) => t,
    };

    let severity = obj
        .get("severity")
        .and_then(Value::as_f64)
        .ok_or_else(|| "Missing or invalid 'severity'".to_string())?;

    let explanation = obj
        .get("explanation")
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(Verdict::new(is_offensive, offense_type, explanation, severity))
}
