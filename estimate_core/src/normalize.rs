//! # Response Normalization
//!
//! The automation tool behind the webhook wraps its answer in different
//! envelopes depending on how the workflow is wired. [`normalize`] makes one
//! pass over them in a fixed order and either returns the canonical report
//! document or says why it could not:
//!
//! 1. the body is parsed as JSON
//! 2. an array whose first element has `output` unwraps to that value,
//!    otherwise an object with `output` unwraps to that value
//! 3. a JSON string left over at this point is parsed once more
//! 4. whatever remains must be a JSON object
//!
//! Each step runs at most once. A report whose own fields include `output`
//! is kept as is once the outer envelope is gone.
//!
//! ```rust
//! use estimate_core::normalize::{merged_view, normalize};
//!
//! let raw = r#"[{"output": "{\"overview\":{\"projectName\":\"X\"}}"}]"#;
//! let doc = normalize(raw).unwrap();
//! assert_eq!(doc["overview"]["projectName"], "X");
//! assert_eq!(merged_view(&doc)["projectName"], "X");
//!
//! assert!(normalize("not json").is_err());
//! ```

use serde_json::{Map, Value};
use thiserror::Error;

use crate::errors::EstimateError;

/// Canonical report document: a JSON object with a flexible schema
pub type Document = Map<String, Value>;

/// Key the automation tool nests its payload under
pub const OUTPUT_KEY: &str = "output";

/// Key holding the legacy overview block
pub const OVERVIEW_KEY: &str = "overview";

/// Outer envelope of a parsed response body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    DirectObject,
    ArrayWithOutput,
    ObjectWithOutput,
    EncodedString,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizeError {
    #[error("invalid JSON in {stage}: {reason}")]
    InvalidJson { stage: &'static str, reason: String },

    #[error("expected a JSON object, found {found}")]
    UnexpectedShape { found: &'static str },
}

impl From<NormalizeError> for EstimateError {
    fn from(e: NormalizeError) -> Self {
        EstimateError::parse_failure(e.to_string())
    }
}

/// Decode a stored response into the canonical document.
pub fn normalize(raw: &str) -> Result<Document, NormalizeError> {
    let body = parse(raw, "response body")?;
    let envelope = classify(&body);
    tracing::trace!(?envelope, "decoding estimation payload");

    let value = match envelope {
        Some(Envelope::ArrayWithOutput) => match body {
            Value::Array(items) => items.into_iter().next().map(take_output).unwrap_or_default(),
            other => other,
        },
        Some(Envelope::ObjectWithOutput) => take_output(body),
        _ => body,
    };

    let value = match value {
        Value::String(text) => parse(&text, "embedded output")?,
        other => other,
    };

    match value {
        Value::Object(doc) => Ok(doc),
        other => Err(NormalizeError::UnexpectedShape {
            found: kind_name(&other),
        }),
    }
}

/// Work out which envelope `value` is wrapped in; `None` for shapes that
/// can never hold a document.
pub fn classify(value: &Value) -> Option<Envelope> {
    match value {
        Value::Object(map) if map.contains_key(OUTPUT_KEY) => Some(Envelope::ObjectWithOutput),
        Value::Object(_) => Some(Envelope::DirectObject),
        Value::Array(items) => match items.first() {
            Some(Value::Object(first)) if first.contains_key(OUTPUT_KEY) => {
                Some(Envelope::ArrayWithOutput)
            }
            _ => None,
        },
        Value::String(_) => Some(Envelope::EncodedString),
        _ => None,
    }
}

/// Overlay the document's top-level fields onto a copy of its `overview`
/// block. Top-level values win; documents that keep fields only under
/// `overview` still resolve.
pub fn merged_view(doc: &Document) -> Document {
    let mut merged = match doc.get(OVERVIEW_KEY) {
        Some(Value::Object(overview)) => overview.clone(),
        _ => Map::new(),
    };
    for (key, value) in doc {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

fn parse(text: &str, stage: &'static str) -> Result<Value, NormalizeError> {
    serde_json::from_str(text).map_err(|e| NormalizeError::InvalidJson {
        stage,
        reason: e.to_string(),
    })
}

fn take_output(value: Value) -> Value {
    match value {
        Value::Object(mut obj) => obj.remove(OUTPUT_KEY).unwrap_or_default(),
        other => other,
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_direct_object() {
        let doc = normalize(r#"{"projectName":"Loan App","risks":["scope"]}"#).unwrap();
        assert_eq!(doc["projectName"], "Loan App");
        assert_eq!(doc["risks"], json!(["scope"]));
    }

    #[test]
    fn test_array_with_encoded_output() {
        let raw = r#"[{"output": "{\"overview\":{\"projectName\":\"X\"}}"}]"#;
        let doc = normalize(raw).unwrap();
        assert_eq!(Value::Object(doc.clone()), json!({"overview": {"projectName": "X"}}));
        assert_eq!(merged_view(&doc)["projectName"], "X");
    }

    #[test]
    fn test_object_with_object_output() {
        let doc = normalize(r#"{"output": {"workingDays": 12}}"#).unwrap();
        assert_eq!(doc["workingDays"], 12);
    }

    #[test]
    fn test_object_with_encoded_output() {
        let doc = normalize(r#"{"output": "{\"teamMembers\": 4}"}"#).unwrap();
        assert_eq!(doc["teamMembers"], 4);
    }

    #[test]
    fn test_top_level_encoded_string() {
        let doc = normalize(r#""{\"risks\": []}""#).unwrap();
        assert_eq!(doc["risks"], json!([]));
    }

    #[test]
    fn test_invalid_json_is_an_error_not_a_panic() {
        assert!(matches!(
            normalize("not json"),
            Err(NormalizeError::InvalidJson { stage: "response body", .. })
        ));
        assert!(matches!(
            normalize(r#""not json""#),
            Err(NormalizeError::InvalidJson { stage: "embedded output", .. })
        ));
        assert!(matches!(
            normalize(r#"{"output": "{broken"}"#),
            Err(NormalizeError::InvalidJson { .. })
        ));
    }

    #[test]
    fn test_unexpected_shapes() {
        let shape = |raw: &str| normalize(raw).unwrap_err();
        assert_eq!(shape("42"), NormalizeError::UnexpectedShape { found: "number" });
        assert_eq!(shape("[]"), NormalizeError::UnexpectedShape { found: "array" });
        assert_eq!(shape(r#"[{"id": 1}]"#), NormalizeError::UnexpectedShape { found: "array" });
        assert_eq!(shape(r#"{"output": null}"#), NormalizeError::UnexpectedShape { found: "null" });
    }

    #[test]
    fn test_report_field_named_output_survives() {
        let raw = r#"[{"output": {"output": "Two sprints", "projectName": "X"}}]"#;
        let doc = normalize(raw).unwrap();
        assert_eq!(Value::Object(doc), json!({"output": "Two sprints", "projectName": "X"}));
    }

    #[test]
    fn test_only_the_outer_envelope_is_removed() {
        let doc = normalize(r#"{"output":{"output":{"projectName":"Inner"}}}"#).unwrap();
        assert_eq!(Value::Object(doc), json!({"output": {"projectName": "Inner"}}));

        // One re-parse only: a string that decodes to another envelope stays wrapped
        let raw = json!({"output": json!({"output": "{}"}).to_string()}).to_string();
        assert_eq!(Value::Object(normalize(&raw).unwrap()), json!({"output": "{}"}));
    }

    #[test]
    fn test_classify_outer_envelope() {
        assert_eq!(classify(&json!({"a": 1})), Some(Envelope::DirectObject));
        assert_eq!(classify(&json!([{"output": 1}])), Some(Envelope::ArrayWithOutput));
        assert_eq!(classify(&json!({"output": 1})), Some(Envelope::ObjectWithOutput));
        assert_eq!(classify(&json!("{}")), Some(Envelope::EncodedString));
        assert_eq!(classify(&json!([1])), None);
        assert_eq!(classify(&json!(true)), None);
    }

    #[test]
    fn test_merged_view_prefers_top_level() {
        let raw = r#"{"overview": {"workingDays": 10, "teamMembers": 3}, "workingDays": 20}"#;
        let doc = normalize(raw).unwrap();
        let merged = merged_view(&doc);
        assert_eq!(merged["workingDays"], 20);
        assert_eq!(merged["teamMembers"], 3);
        // The source document is left alone
        assert_eq!(doc["overview"]["workingDays"], 10);
    }

    #[test]
    fn test_merged_view_without_overview() {
        let doc = normalize(r#"{"overview": "n/a", "totalScreens": 8}"#).unwrap();
        let merged = merged_view(&doc);
        assert_eq!(merged["totalScreens"], 8);
        assert_eq!(merged["overview"], "n/a");
    }

    #[test]
    fn test_parse_failure_converts_to_estimate_error() {
        let err: EstimateError = normalize("nope").unwrap_err().into();
        assert_eq!(err.error_code(), "PARSE_FAILURE");
    }
}
