//! V8-backed engine built on `deno_core`.
//!
//! Every context is a dedicated `JsRuntime` (one V8 isolate) with no
//! extensions registered, so scripts get the ECMAScript built-ins and nothing
//! else: no filesystem, network, timers or environment.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use deno_core::{JsRuntime, RuntimeOptions, error::JsError, serde_v8, v8};

use super::{
    engine::{EngineProvider, EngineUnavailable, EvaluationError, ExecutionContext},
    error::Budget,
};
use crate::config::SandboxConfig;

/// Removes the host bindings `deno_core` installs on the global object.
const HARDEN_SCRIPT: &str =
    "delete globalThis.Deno; delete globalThis.__bootstrap; delete globalThis.__infra;";

/// An [`EngineProvider`] handing out one fresh V8 isolate per context.
#[derive(Debug, Clone, Default)]
pub struct DenoEngine {
    config: SandboxConfig,
}

impl DenoEngine {
    /// Creates a new `DenoEngine` applying the given budget to each context.
    pub fn new(config: SandboxConfig) -> Self {
        Self { config }
    }
}

impl EngineProvider for DenoEngine {
    fn new_context(&self) -> Result<Box<dyn ExecutionContext>, EngineUnavailable> {
        let context = DenoContext::new(&self.config)?;
        Ok(Box::new(context))
    }
}

/// A single-use V8 isolate.
pub struct DenoContext {
    runtime: Option<JsRuntime>,
    execution_timeout: Option<Duration>,
    heap_exhausted: Arc<AtomicBool>,
}

impl DenoContext {
    fn new(config: &SandboxConfig) -> Result<Self, EngineUnavailable> {
        let create_params =
            config.max_heap_size.map(|max| v8::CreateParams::default().heap_limits(0, max));

        // `JsRuntime::new` reports setup failures by panicking. A V8 out of
        // memory during creation aborts the process and is not caught here.
        let mut runtime = panic::catch_unwind(AssertUnwindSafe(|| {
            JsRuntime::new(RuntimeOptions { create_params, ..Default::default() })
        }))
        .map_err(|_| EngineUnavailable("failed to create a V8 isolate".to_string()))?;

        let heap_exhausted = Arc::new(AtomicBool::new(false));
        if config.max_heap_size.is_some() {
            let handle = runtime.v8_isolate().thread_safe_handle();
            let exhausted = Arc::clone(&heap_exhausted);
            runtime.add_near_heap_limit_callback(move |current_limit, _initial_limit| {
                exhausted.store(true, Ordering::SeqCst);
                handle.terminate_execution();
                // Headroom for the termination to unwind.
                current_limit * 2
            });
        }

        runtime
            .execute_script("<harden>", HARDEN_SCRIPT)
            .map_err(|e| EngineUnavailable(format!("failed to prepare isolate: {e}")))?;

        Ok(Self { runtime: Some(runtime), execution_timeout: config.execution_timeout, heap_exhausted })
    }
}

impl ExecutionContext for DenoContext {
    fn evaluate(&mut self, source: String) -> Result<String, EvaluationError> {
        let runtime = self.runtime.as_mut().ok_or(EvaluationError::Disposed)?;

        let watchdog = self
            .execution_timeout
            .map(|timeout| Watchdog::arm(runtime.v8_isolate().thread_safe_handle(), timeout));

        let result = runtime.execute_script("<transform>", source);

        let timed_out = watchdog.is_some_and(Watchdog::disarm);
        if timed_out {
            runtime.v8_isolate().cancel_terminate_execution();
        }

        let value = match result {
            Ok(value) => value,
            Err(_) if timed_out => return Err(EvaluationError::Terminated(Budget::ExecutionTime)),
            Err(_) if self.heap_exhausted.load(Ordering::SeqCst) =>
                return Err(EvaluationError::Terminated(Budget::Heap)),
            Err(e) => return Err(EvaluationError::Uncaught(describe_js_error(&e))),
        };

        let scope = &mut runtime.handle_scope();
        let local = v8::Local::new(scope, value);
        serde_v8::from_v8::<String>(scope, local)
            .map_err(|e| EvaluationError::Transport(e.to_string()))
    }

    fn dispose(&mut self) {
        // Dropping the runtime tears down the isolate and its heap.
        self.runtime.take();
    }
}

/// Renders an escaped exception without its stack trace.
fn describe_js_error(error: &JsError) -> String {
    let message = error.exception_message.as_str();
    message.strip_prefix("Uncaught ").unwrap_or(message).to_string()
}

/// Terminates a running isolate once its deadline passes.
struct Watchdog {
    cancel: mpsc::Sender<()>,
    handle: thread::JoinHandle<bool>,
}

impl Watchdog {
    fn arm(isolate: v8::IsolateHandle, timeout: Duration) -> Self {
        let (cancel, cancelled) = mpsc::channel::<()>();
        let handle = thread::spawn(move || match cancelled.recv_timeout(timeout) {
            Err(mpsc::RecvTimeoutError::Timeout) => {
                tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Terminating script past its deadline.");
                isolate.terminate_execution();
                true
            }
            _ => false,
        });
        Self { cancel, handle }
    }

    /// Stops the watchdog and reports whether it fired.
    fn disarm(self) -> bool {
        self.cancel.send(()).ok();
        self.handle.join().unwrap_or(false)
    }
}
