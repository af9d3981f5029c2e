//! Turns the model's untrusted final answer into a validated [`GoalResponse`].
//!
//! Three steps, each terminal on failure: strip an optional code fence,
//! parse JSON, validate against the typed records.

use serde_json::Value;
use thiserror::Error;

use super::model::GoalResponse;

const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum ParseFailure {
    /// The cleaned answer is not valid JSON.
    #[error("invalid JSON: {source}")]
    Syntax {
        cleaned: String,
        #[source]
        source:  serde_json::Error,
    },

    /// The answer is JSON but does not match the roadmap schema.
    #[error("roadmap failed validation: {reason}")]
    Schema {
        document: Value,
        reason:   String,
    },
}

/// Removes a surrounding Markdown code fence, if there is one.
///
/// The opening fence may carry a language tag (```` ```json ````) and the
/// closing fence may sit on its own line. Input that does not start with
/// a fence (after trimming) is returned unchanged.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return raw;
    };

    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.')))
        .unwrap_or(rest.len());
    let body = &rest[tag_len..];
    let body = body.strip_suffix(FENCE).unwrap_or(body);
    body.trim()
}

/// Parses the cleaned answer as a JSON document.
pub fn parse_document(cleaned: &str) -> Result<Value, ParseFailure> {
    serde_json::from_str(cleaned).map_err(|source| ParseFailure::Syntax {
        cleaned: cleaned.to_string(),
        source,
    })
}

/// Validates a parsed document against the roadmap schema.
///
/// Integers must be JSON integers; no string or float coercion happens.
/// On failure nothing of the document is kept except for diagnostics.
pub fn validate(document: Value) -> Result<GoalResponse, ParseFailure> {
    if !document.is_object() {
        return Err(ParseFailure::Schema {
            reason:   format!("expected a JSON object, got {}", json_kind(&document)),
            document,
        });
    }

    let roadmap: GoalResponse = match serde_json::from_value(document.clone()) {
        Ok(r)  => r,
        Err(e) => return Err(ParseFailure::Schema { document, reason: e.to_string() }),
    };

    match roadmap.check_invariants() {
        Ok(())      => Ok(roadmap),
        Err(reason) => Err(ParseFailure::Schema { document, reason }),
    }
}

/// Strip, parse and validate in one go.
pub fn normalize_and_validate(raw: &str) -> Result<GoalResponse, ParseFailure> {
    let cleaned = strip_code_fence(raw);
    let document = parse_document(cleaned)?;
    validate(document)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null      => "null",
        Value::Bool(_)   => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_)  => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tagged_fence_with_closing_line() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fence(raw), "{\"a\": 1}");
    }

    #[test]
    fn strips_untagged_single_line_fence() {
        assert_eq!(strip_code_fence("```{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn strips_fence_around_multiline_body_with_outer_whitespace() {
        let raw = "\n  ```JSON\n{\n  \"a\": [1,\n 2]\n}  \n```  \n";
        assert_eq!(strip_code_fence(raw), "{\n  \"a\": [1,\n 2]\n}");
    }

    #[test]
    fn unfenced_input_is_untouched() {
        for raw in ["{\"a\": 1}", "  {\"a\": 1}\n", "plain text", "", "`{}`"] {
            assert_eq!(strip_code_fence(raw), raw);
        }
    }

    #[test]
    fn missing_closing_fence_still_strips_opening() {
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn syntax_failure_keeps_cleaned_text() {
        let err = normalize_and_validate("```json\n{\"user_goal\": \n```").unwrap_err();
        match err {
            ParseFailure::Syntax { cleaned, .. } => assert_eq!(cleaned, "{\"user_goal\":"),
            other => panic!("expected syntax failure, got {other:?}"),
        }
    }

    #[test]
    fn non_object_document_is_a_schema_failure() {
        let err = validate(serde_json::json!([1, 2])).unwrap_err();
        assert!(matches!(err, ParseFailure::Schema { ref reason, .. } if reason.contains("an array")));
    }
}
