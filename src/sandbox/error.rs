//! Error taxonomy for sandboxed transformations.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The class of a transformation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// No execution context could be created.
    EngineUnavailable,
    /// The script rejected its input through `fail(message)`.
    Validation,
    /// The script threw, or failed to compile.
    ScriptError,
    /// The program's return value was not a JSON-encoded string.
    OutputEncodingError,
    /// The decoded output was neither `null` nor a string.
    OutputShapeError,
    /// The script exceeded its execution budget and was terminated.
    ResourceLimit,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::EngineUnavailable => "EngineUnavailable",
            ErrorKind::Validation => "Validation",
            ErrorKind::ScriptError => "ScriptError",
            ErrorKind::OutputEncodingError => "OutputEncodingError",
            ErrorKind::OutputShapeError => "OutputShapeError",
            ErrorKind::ResourceLimit => "ResourceLimit",
        };
        f.write_str(name)
    }
}

/// The budget a terminated script ran out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Wall-clock execution time.
    ExecutionTime,
    /// V8 heap size.
    Heap,
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Budget::ExecutionTime => f.write_str("execution time budget"),
            Budget::Heap => f.write_str("heap budget"),
        }
    }
}

/// A classified transformation failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// No execution context could be created.
    #[error("Execution engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The script rejected its input through `fail(message)`.
    #[error("{message}")]
    Validation {
        /// The message passed to `fail`.
        message: String,
        /// The thrown payload as it crossed the sandbox boundary.
        details: Value,
    },

    /// The script threw, or the composed program failed to compile.
    #[error("Script error: {message}")]
    ScriptError {
        /// The stringified thrown value.
        message: String,
        /// The thrown value, when it was structured data.
        details: Option<Value>,
    },

    /// The program's return value was not a JSON-encoded string.
    #[error("Transform output is not valid JSON: {0}")]
    OutputEncoding(String),

    /// The decoded output was neither `null` nor a string.
    #[error("Invalid output format: {message}")]
    OutputShape {
        /// A description of the shape violation.
        message: String,
        /// The offending output value.
        details: Value,
    },

    /// The script exceeded its execution budget.
    #[error("Script exceeded its {0}")]
    ResourceLimit(Budget),
}

impl TransformError {
    /// Returns the failure class.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TransformError::EngineUnavailable(_) => ErrorKind::EngineUnavailable,
            TransformError::Validation { .. } => ErrorKind::Validation,
            TransformError::ScriptError { .. } => ErrorKind::ScriptError,
            TransformError::OutputEncoding(_) => ErrorKind::OutputEncodingError,
            TransformError::OutputShape { .. } => ErrorKind::OutputShapeError,
            TransformError::ResourceLimit(_) => ErrorKind::ResourceLimit,
        }
    }

    /// Returns the human-readable message without the kind prefix.
    pub fn message(&self) -> String {
        match self {
            TransformError::Validation { message, .. } |
            TransformError::ScriptError { message, .. } |
            TransformError::OutputShape { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Returns the structured payload attached to the failure, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            TransformError::Validation { details, .. } |
            TransformError::OutputShape { details, .. } => Some(details),
            TransformError::ScriptError { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// True for failures caused by the script or its input rather than by the
    /// host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Validation |
                ErrorKind::ScriptError |
                ErrorKind::OutputShapeError |
                ErrorKind::ResourceLimit
        )
    }
}
