//! Turns a raw program outcome into a transformation result.

use serde_json::Value;

use super::{engine::RawOutcome, error::TransformError};

/// The logical result of one transformation.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformResult {
    /// The script returned a string.
    Value(String),
    /// The script returned `null`.
    Empty,
    /// The invocation failed.
    Failure(TransformError),
}

impl TransformResult {
    /// Converts into the `Result` shape returned to callers.
    pub fn into_result(self) -> Result<Option<String>, TransformError> {
        match self {
            TransformResult::Value(value) => Ok(Some(value)),
            TransformResult::Empty => Ok(None),
            TransformResult::Failure(err) => Err(err),
        }
    }
}

impl From<Result<Option<String>, TransformError>> for TransformResult {
    fn from(result: Result<Option<String>, TransformError>) -> Self {
        match result {
            Ok(Some(value)) => TransformResult::Value(value),
            Ok(None) => TransformResult::Empty,
            Err(err) => TransformResult::Failure(err),
        }
    }
}

/// Classifies the outcome of a composed program.
///
/// A completed program returns the JSON encoding of the script's result, so the
/// completion value is decoded once to recover that result before its type is
/// inspected.
pub fn classify(outcome: RawOutcome) -> TransformResult {
    match outcome {
        RawOutcome::Thrown(thrown) => TransformResult::Failure(classify_thrown(thrown)),
        RawOutcome::Completed(Value::String(encoded)) => classify_output(&encoded),
        RawOutcome::Completed(_) => TransformResult::Failure(TransformError::OutputEncoding(
            "program did not return a JSON string".to_string(),
        )),
    }
}

/// Classifies the JSON encoding of the script's result.
///
/// Arrays and objects are recognised by their opening byte, so nesting deeper
/// than the decoder's recursion limit is still an output shape error.
fn classify_output(encoded: &str) -> TransformResult {
    if let Some(b'[' | b'{') = encoded.trim_start().as_bytes().first() {
        let details =
            serde_json::from_str(encoded).unwrap_or_else(|_| Value::String(encoded.to_string()));
        return TransformResult::Failure(shape_error(details));
    }

    match serde_json::from_str(encoded) {
        Ok(Value::Null) => TransformResult::Empty,
        Ok(Value::String(value)) => TransformResult::Value(value),
        Ok(other) => TransformResult::Failure(shape_error(other)),
        Err(e) => TransformResult::Failure(TransformError::OutputEncoding(e.to_string())),
    }
}

fn shape_error(details: Value) -> TransformError {
    TransformError::OutputShape {
        message: "non-string, non-null transform output".to_string(),
        details,
    }
}

fn classify_thrown(thrown: Value) -> TransformError {
    if let Some(message) = validation_message(&thrown) {
        return TransformError::Validation { message, details: thrown };
    }

    match thrown {
        Value::String(message) => TransformError::ScriptError { message, details: None },
        other => TransformError::ScriptError { message: other.to_string(), details: Some(other) },
    }
}

/// Extracts the message of a `{ type: "validation", message }` payload.
fn validation_message(thrown: &Value) -> Option<String> {
    let payload = thrown.as_object()?;
    if payload.get("type")?.as_str()? != "validation" {
        return None;
    }
    let message = match payload.get("message") {
        Some(Value::String(message)) => message.clone(),
        None | Some(Value::Null) => String::new(),
        Some(other) => other.to_string(),
    };
    Some(message)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn completed(encoded: &str) -> RawOutcome {
        RawOutcome::Completed(Value::String(encoded.to_string()))
    }

    #[test]
    fn test_string_output_is_value() {
        assert_eq!(classify(completed(r#""ABC""#)), TransformResult::Value("ABC".to_string()));
    }

    #[test]
    fn test_escaped_string_output_is_unescaped() {
        let result = classify(completed(r#""a\"b\\c\u0000dé""#));
        assert_eq!(result, TransformResult::Value("a\"b\\c\0dé".to_string()));
    }

    #[test]
    fn test_null_output_is_empty() {
        assert_eq!(classify(completed("null")), TransformResult::Empty);
    }

    #[test]
    fn test_non_string_outputs_are_shape_errors() {
        for encoded in ["42", "true", "[1,2]", r#"{"id":"abc"}"#] {
            match classify(completed(encoded)) {
                TransformResult::Failure(TransformError::OutputShape { message, details }) => {
                    assert_eq!(message, "non-string, non-null transform output");
                    assert_eq!(details, serde_json::from_str::<Value>(encoded).unwrap());
                }
                other => panic!("Expected OutputShape for {encoded}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_deeply_nested_output_is_shape_error() {
        let encoded = format!("{}{}", "[".repeat(200), "]".repeat(200));
        match classify(completed(&encoded)) {
            TransformResult::Failure(TransformError::OutputShape { details, .. }) =>
                assert_eq!(details, Value::String(encoded)),
            other => panic!("Expected OutputShape, got {other:?}"),
        }

        let encoded = format!("{}1{}", r#"{"a":"#.repeat(200), "}".repeat(200));
        let result = classify(completed(&encoded));
        assert!(matches!(result, TransformResult::Failure(TransformError::OutputShape { .. })));
    }

    #[test]
    fn test_undecodable_output_is_encoding_error() {
        let result = classify(completed("undefined"));
        assert!(matches!(result, TransformResult::Failure(TransformError::OutputEncoding(_))));
    }

    #[test]
    fn test_non_string_completion_is_encoding_error() {
        let result = classify(RawOutcome::Completed(Value::Null));
        assert!(matches!(result, TransformResult::Failure(TransformError::OutputEncoding(_))));
    }

    #[test]
    fn test_validation_payload() {
        let thrown = json!({ "type": "validation", "message": "bad id" });
        assert_eq!(
            classify(RawOutcome::Thrown(thrown.clone())),
            TransformResult::Failure(TransformError::Validation {
                message: "bad id".to_string(),
                details: thrown,
            })
        );
    }

    #[test]
    fn test_validation_payload_without_message() {
        let result = classify(RawOutcome::Thrown(json!({ "type": "validation" })));
        match result {
            TransformResult::Failure(TransformError::Validation { message, .. }) =>
                assert_eq!(message, ""),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_other_tagged_payload_is_script_error() {
        let thrown = json!({ "type": "other", "message": "nope" });
        match classify(RawOutcome::Thrown(thrown.clone())) {
            TransformResult::Failure(TransformError::ScriptError { message, details }) => {
                assert_eq!(serde_json::from_str::<Value>(&message).unwrap(), thrown);
                assert_eq!(details, Some(thrown));
            }
            other => panic!("Expected ScriptError, got {other:?}"),
        }
    }

    #[test]
    fn test_thrown_string_is_script_error() {
        let result = classify(RawOutcome::Thrown(json!("TypeError: x is not a function")));
        assert_eq!(
            result,
            TransformResult::Failure(TransformError::ScriptError {
                message: "TypeError: x is not a function".to_string(),
                details: None,
            })
        );
    }

    #[test]
    fn test_into_result() {
        assert_eq!(TransformResult::Value("a".into()).into_result(), Ok(Some("a".to_string())));
        assert_eq!(TransformResult::Empty.into_result(), Ok(None));
    }
}
