//! Runs a composed program inside an execution context and captures how it
//! finished.

use std::time::Instant;

use serde_json::Value;

use super::{
    engine::{EvaluationError, ExecutionContext, RawOutcome},
    error::TransformError,
};

/// Wraps a program so that its outcome, normal or abrupt, leaves the context
/// as one JSON record. The intrinsics it relies on are captured before any
/// script code runs, and the record is assembled as text so prototype hooks
/// cannot reshape it. Thrown values too deep to decode travel as JSON text.
const CAPTURE_HARNESS: &str = include_str!("js/capture.js");

const PROGRAM_SLOT: &str = "/*@program*/";

/// Evaluates `program` in `context` to completion.
///
/// Thrown values come back by value in [`RawOutcome::Thrown`]. Exceptions the
/// harness cannot catch, such as syntax errors in the program, are reported the
/// same way with the interpreter's message as the thrown value.
pub fn run(context: &mut dyn ExecutionContext, program: &str) -> Result<RawOutcome, TransformError> {
    let source = CAPTURE_HARNESS.replacen(PROGRAM_SLOT, program, 1);

    let started = Instant::now();
    let result = context.evaluate(source);
    tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Program evaluated.");

    match result {
        Ok(record) => decode_record(&record),
        Err(EvaluationError::Uncaught(message)) => Ok(RawOutcome::Thrown(Value::String(message))),
        Err(EvaluationError::Terminated(budget)) => Err(TransformError::ResourceLimit(budget)),
        Err(EvaluationError::Transport(e)) => Err(TransformError::OutputEncoding(e)),
        Err(e @ EvaluationError::Disposed) => Err(TransformError::EngineUnavailable(e.to_string())),
    }
}

fn decode_record(record: &str) -> Result<RawOutcome, TransformError> {
    serde_json::from_str(record)
        .map_err(|e| TransformError::OutputEncoding(format!("malformed completion record: {e}")))
}

#[cfg(test)]
mod tests {
    use mockall::predicate::function;
    use serde_json::json;

    use super::*;
    use crate::sandbox::{engine::MockExecutionContext, error::Budget};

    fn context_returning(
        result: Result<String, EvaluationError>,
    ) -> MockExecutionContext {
        let mut context = MockExecutionContext::new();
        context.expect_evaluate().times(1).return_once(move |_| result);
        context
    }

    #[test]
    fn test_program_is_placed_inside_harness() {
        let mut context = MockExecutionContext::new();
        context
            .expect_evaluate()
            .with(function(|source: &String| {
                source.contains("() => (\n\"program\"\n  ),") &&
                    !source.contains(PROGRAM_SLOT)
            }))
            .times(1)
            .returning(|_| Ok(r#"{"state":"completed","value":"\"x\""}"#.to_string()));

        let outcome = run(&mut context, "\"program\"").unwrap();
        assert_eq!(outcome, RawOutcome::Completed(json!("\"x\"")));
    }

    #[test]
    fn test_thrown_record_is_decoded_by_value() {
        let mut context = context_returning(Ok(
            r#"{"state":"thrown","value":{"type":"validation","message":"bad id"}}"#.to_string(),
        ));
        let outcome = run(&mut context, "0").unwrap();
        assert_eq!(outcome, RawOutcome::Thrown(json!({ "type": "validation", "message": "bad id" })));
    }

    #[test]
    fn test_deep_thrown_value_arrives_as_text() {
        let nested = format!("{}{}", "[".repeat(200), "]".repeat(200));
        let record = json!({ "state": "thrown", "value": nested }).to_string();
        let mut context = context_returning(Ok(record));

        let outcome = run(&mut context, "0").unwrap();
        assert_eq!(outcome, RawOutcome::Thrown(Value::String(nested)));
    }

    #[test]
    fn test_uncaught_exception_becomes_thrown_message() {
        let mut context = context_returning(Err(EvaluationError::Uncaught(
            "SyntaxError: Unexpected token '}'".to_string(),
        )));
        let outcome = run(&mut context, "0").unwrap();
        assert_eq!(outcome, RawOutcome::Thrown(json!("SyntaxError: Unexpected token '}'")));
    }

    #[test]
    fn test_termination_maps_to_resource_limit() {
        let mut context = context_returning(Err(EvaluationError::Terminated(Budget::Heap)));
        let err = run(&mut context, "0").unwrap_err();
        assert_eq!(err, TransformError::ResourceLimit(Budget::Heap));
    }

    #[test]
    fn test_malformed_record_is_output_encoding_error() {
        let mut context = context_returning(Ok("5".to_string()));
        let err = run(&mut context, "0").unwrap_err();
        assert!(matches!(err, TransformError::OutputEncoding(_)));
    }
}
