use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::sandbox::{
    EngineProvider, EngineUnavailable, EvaluationError, ExecutionContext,
};

/// Shared tallies of contexts handed out and disposed of by a
/// [`CountingEngine`].
#[derive(Debug, Default, Clone)]
pub struct ContextCounters {
    acquired: Arc<AtomicUsize>,
    disposed: Arc<AtomicUsize>,
}

impl ContextCounters {
    /// Number of contexts created so far.
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Number of `dispose` calls observed so far, repeated calls included.
    pub fn disposed(&self) -> usize {
        self.disposed.load(Ordering::SeqCst)
    }
}

/// Wraps an engine and counts the lifecycle of every context it creates.
pub struct CountingEngine<E> {
    inner: E,
    counters: ContextCounters,
}

impl<E: EngineProvider> CountingEngine<E> {
    /// Creates a new `CountingEngine` around `inner`.
    pub fn new(inner: E) -> Self {
        Self { inner, counters: ContextCounters::default() }
    }

    /// Returns a handle to the counters, usable after the engine moved.
    pub fn counters(&self) -> ContextCounters {
        self.counters.clone()
    }
}

impl<E: EngineProvider> EngineProvider for CountingEngine<E> {
    fn new_context(&self) -> Result<Box<dyn ExecutionContext>, EngineUnavailable> {
        let inner = self.inner.new_context()?;
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountingContext { inner, counters: self.counters.clone() }))
    }
}

struct CountingContext {
    inner: Box<dyn ExecutionContext>,
    counters: ContextCounters,
}

impl ExecutionContext for CountingContext {
    fn evaluate(&mut self, source: String) -> Result<String, EvaluationError> {
        self.inner.evaluate(source)
    }

    fn dispose(&mut self) {
        self.counters.disposed.fetch_add(1, Ordering::SeqCst);
        self.inner.dispose();
    }
}
