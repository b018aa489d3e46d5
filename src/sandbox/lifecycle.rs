//! Scoped ownership of an execution context.

use std::ops::{Deref, DerefMut};

use super::{
    engine::{EngineProvider, ExecutionContext},
    error::TransformError,
};

/// Owns one execution context for the duration of one invocation and disposes
/// of it exactly once, on every exit path.
pub struct ContextGuard {
    context: Box<dyn ExecutionContext>,
    released: bool,
}

impl ContextGuard {
    /// Acquires a fresh context from `engine`.
    ///
    /// When the engine fails no context exists and there is nothing to release.
    pub fn acquire(engine: &dyn EngineProvider) -> Result<Self, TransformError> {
        let context = engine.new_context().map_err(|e| {
            tracing::error!(error = %e, "Failed to create execution context.");
            TransformError::EngineUnavailable(e.0)
        })?;
        tracing::debug!("Execution context acquired.");
        Ok(Self { context, released: false })
    }

    /// Disposes of the context. Subsequent calls, including the implicit one on
    /// drop, do nothing.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.context.dispose();
        tracing::debug!("Execution context disposed.");
    }

    /// True once the context has been disposed.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Deref for ContextGuard {
    type Target = dyn ExecutionContext;

    fn deref(&self) -> &Self::Target {
        self.context.as_ref()
    }
}

impl DerefMut for ContextGuard {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context.as_mut()
    }
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        self.release();
    }
}
