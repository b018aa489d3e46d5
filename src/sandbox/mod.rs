//! Sandboxed evaluation of untrusted transformation scripts.
//!
//! One invocation walks `acquire -> compose -> run -> classify -> release`.
//! The context is owned by a [`ContextGuard`], so it is disposed of on every
//! path out of [`transform`], including early returns and panics.

mod classifier;
mod composer;
mod deno;
mod driver;
mod engine;
mod error;
mod lifecycle;

use std::sync::Arc;

pub use classifier::{TransformResult, classify};
pub use composer::{ENTRY_POINT, INPUT_BINDING, VALIDATION_HELPER, compose};
pub use deno::{DenoContext, DenoEngine};
pub use driver::run;
pub use engine::{EngineProvider, EngineUnavailable, EvaluationError, ExecutionContext, RawOutcome};
pub use error::{Budget, ErrorKind, TransformError};
pub use lifecycle::ContextGuard;
use serde_json::Value;
use transform_models::TransformRequest;

use crate::config::SandboxConfig;

/// Evaluates `script` against `input` in a fresh context from `engine`.
#[tracing::instrument(skip_all, level = "debug")]
pub fn transform(
    engine: &dyn EngineProvider,
    script: &str,
    input: &Value,
) -> Result<Option<String>, TransformError> {
    let mut context = ContextGuard::acquire(engine)?;
    let program = compose(script, input);
    let outcome = run(&mut *context, &program);
    context.release();

    let result = match outcome {
        Ok(outcome) => classify(outcome),
        Err(err) => TransformResult::Failure(err),
    };

    if let TransformResult::Failure(err) = &result {
        log_failure(err);
    }
    result.into_result()
}

fn log_failure(err: &TransformError) {
    match err.kind() {
        ErrorKind::Validation => tracing::debug!(reason = %err, "Script rejected its input."),
        ErrorKind::ScriptError | ErrorKind::ResourceLimit =>
            tracing::warn!(kind = %err.kind(), error = %err, "Transformation script failed."),
        ErrorKind::OutputEncodingError | ErrorKind::OutputShapeError =>
            tracing::error!(kind = %err.kind(), error = %err, "Transformation broke its output contract."),
        ErrorKind::EngineUnavailable =>
            tracing::error!(error = %err, "Transformation could not be executed."),
    }
}

/// A cheap-to-clone handle evaluating transformation scripts with a shared
/// engine.
#[derive(Clone)]
pub struct Sandbox {
    engine: Arc<dyn EngineProvider>,
}

impl Sandbox {
    /// Creates a new `Sandbox` backed by `engine`.
    pub fn new(engine: Arc<dyn EngineProvider>) -> Self {
        Self { engine }
    }

    /// Creates a new `Sandbox` backed by V8 isolates with the given budget.
    pub fn from_config(config: SandboxConfig) -> Self {
        Self::new(Arc::new(DenoEngine::new(config)))
    }

    /// Evaluates `script` against `input`, blocking the current thread.
    pub fn transform(&self, script: &str, input: &Value) -> Result<Option<String>, TransformError> {
        transform(self.engine.as_ref(), script, input)
    }

    /// Evaluates a request and returns the tagged result.
    pub fn evaluate(&self, request: &TransformRequest) -> TransformResult {
        self.transform(&request.script, &request.input).into()
    }

    /// Evaluates `script` against `input` on tokio's blocking pool.
    pub async fn transform_blocking(
        &self,
        script: String,
        input: Value,
    ) -> Result<Option<String>, TransformError> {
        let sandbox = self.clone();
        tokio::task::spawn_blocking(move || sandbox.transform(&script, &input))
            .await
            .map_err(|e| TransformError::EngineUnavailable(format!("runtime task failed: {e}")))?
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::from_config(SandboxConfig::default())
    }
}
