//! Seams between the sandbox and the script engine it embeds.

#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::error::Budget;

/// The engine could not hand out an execution context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineUnavailable(pub String);

/// Errors raised by an execution context while evaluating a program, other than
/// values thrown by the program itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    /// An exception escaped the evaluation, typically a compile error of the
    /// submitted source. Holds the interpreter's rendering of it.
    #[error("Uncaught exception: {0}")]
    Uncaught(String),

    /// The isolate was terminated for exceeding a budget.
    #[error("Execution terminated: {0} exceeded")]
    Terminated(Budget),

    /// The completion value could not be read out of the context.
    #[error("Failed to read completion value: {0}")]
    Transport(String),

    /// The context was already disposed.
    #[error("Execution context already disposed")]
    Disposed,
}

/// How a program finished, as transported out of the execution context.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum RawOutcome {
    /// Normal completion. Holds the completion value, which for a well-formed
    /// program is a JSON-encoded string.
    Completed(Value),
    /// Abrupt completion. Holds the thrown value, dumped by value.
    Thrown(Value),
}

/// A fresh, isolated interpreter instance.
#[cfg_attr(test, automock)]
pub trait ExecutionContext {
    /// Evaluates `source` synchronously and returns its completion value
    /// rendered as a string.
    fn evaluate(&mut self, source: String) -> Result<String, EvaluationError>;

    /// Frees the interpreter. Calling it more than once is a no-op.
    fn dispose(&mut self);
}

/// A reusable factory of execution contexts.
///
/// Implementations hold no per-invocation state and must be safe to call from
/// many threads at once.
#[cfg_attr(test, automock)]
pub trait EngineProvider: Send + Sync {
    /// Creates a new execution context that shares nothing with any other.
    fn new_context(&self) -> Result<Box<dyn ExecutionContext>, EngineUnavailable>;
}
