use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use arc_ir::Program;

use crate::ast_exec::Interpreter;
use crate::core::Globals;
use crate::errors::RuntimeError;

#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// Length of `sleep`.
    pub sleep: Duration,
    /// Upper bound (inclusive) of `sleepr`.
    pub sleepr_max: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            sleep: Duration::from_millis(100),
            sleepr_max: Duration::from_millis(20),
        }
    }
}

/// A spawned thread that ended with an error. The rest of the program is
/// unaffected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadFailure {
    pub thread: String,
    pub error: RuntimeError,
}

#[derive(Clone, Debug, Default)]
pub struct ExecResult {
    /// Dump lines in the order they were produced.
    pub output: String,
    pub thread_failures: Vec<ThreadFailure>,
}

/// Receives dump lines as they are produced.
pub type OutputSink = Box<dyn Write + Send>;

struct Output {
    text: String,
    sink: Option<OutputSink>,
    sink_error: Option<io::Error>,
}

/// State every interpreter of one run can reach.
pub(crate) struct Shared {
    pub(crate) config: RuntimeConfig,
    output: Mutex<Output>,
    failures: Mutex<Vec<ThreadFailure>>,
    next_thread: AtomicUsize,
}

impl Shared {
    fn new(config: RuntimeConfig, sink: Option<OutputSink>) -> Self {
        Self {
            config,
            output: Mutex::new(Output {
                text: String::new(),
                sink,
                sink_error: None,
            }),
            failures: Mutex::new(Vec::new()),
            next_thread: AtomicUsize::new(1),
        }
    }

    pub(crate) fn write_line(&self, line: &str) {
        let mut out = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        out.text.push_str(line);
        out.text.push('\n');
        // Written under the lock so the sink sees the same order as `text`.
        let failed = match out.sink.as_mut() {
            Some(sink) => writeln!(sink, "{line}").and_then(|()| sink.flush()).err(),
            None => None,
        };
        if let Some(error) = failed {
            tracing::warn!(%error, "output sink failed, buffering only");
            out.sink = None;
            out.sink_error = Some(error);
        }
    }

    pub(crate) fn record_failure(&self, thread: String, error: RuntimeError) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ThreadFailure { thread, error });
    }

    pub(crate) fn next_thread_name(&self) -> String {
        let id = self.next_thread.fetch_add(1, Ordering::Relaxed);
        format!("arc-thread-{id}")
    }
}

pub struct Runtime {
    config: RuntimeConfig,
    output: String,
    sink: Option<OutputSink>,
    sink_error: Option<io::Error>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self {
            config,
            output: String::new(),
            sink: None,
            sink_error: None,
        }
    }

    /// Also stream every dump line to `sink` while the program runs. The
    /// collected output is still returned. If a write fails, streaming stops
    /// and the error is kept for `take_sink_error`.
    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn take_sink_error(&mut self) -> Option<io::Error> {
        self.sink_error.take()
    }

    pub fn config(&self) -> RuntimeConfig {
        self.config
    }

    /// Execute a prepared program (see `arc_driver::liveness`) and wait for
    /// every thread it spawned.
    ///
    /// On a top-level error the output produced so far stays available
    /// through `take_output`.
    pub fn run(&mut self, program: &Program) -> Result<ExecResult, RuntimeError> {
        self.output.clear();
        let shared = Shared::new(self.config, self.sink.take());
        tracing::debug!(globals = program.globals.len(), "run start");

        let result = thread::scope(|s| {
            let globals = Globals::new(program.globals.iter().map(String::as_str));
            Interpreter::new(&shared, s, globals, "main".to_string()).run(&program.stmts)
        });

        let Shared {
            output, failures, ..
        } = shared;
        let Output {
            text,
            sink,
            sink_error,
        } = output.into_inner().unwrap_or_else(PoisonError::into_inner);
        self.output = text;
        self.sink = sink;
        self.sink_error = sink_error;
        let thread_failures = failures.into_inner().unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(
            ok = result.is_ok(),
            thread_failures = thread_failures.len(),
            "run finished"
        );
        result?;
        Ok(ExecResult {
            output: self.take_output(),
            thread_failures,
        })
    }

    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
