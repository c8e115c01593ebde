//! Tree-walking interpreter.
//!
//! One `Interpreter` per OS thread. Each owns its `Globals` table, spawns
//! children inside the run's `thread::scope`, and joins them when its own
//! body is done.
mod dump;
mod expr;
mod stmt;

use std::any::Any;
use std::thread::{self, Scope, ScopedJoinHandle};

use arc_ir::{Stmt, ThreadStmt};

use crate::core::Globals;
use crate::errors::RuntimeError;
use crate::runtime::Shared;

pub(crate) struct Interpreter<'scope, 'env: 'scope> {
    shared: &'env Shared,
    scope: &'scope Scope<'scope, 'env>,
    globals: Globals,
    name: String,
    children: Vec<(String, ScopedJoinHandle<'scope, ()>)>,
}

impl<'scope, 'env> Interpreter<'scope, 'env> {
    pub(crate) fn new(
        shared: &'env Shared,
        scope: &'scope Scope<'scope, 'env>,
        globals: Globals,
        name: String,
    ) -> Self {
        Self {
            shared,
            scope,
            globals,
            name,
            children: Vec::new(),
        }
    }

    /// Run `stmts`, then join every thread spawned along the way. The globals
    /// table is released last.
    pub(crate) fn run(mut self, stmts: &'env [Stmt]) -> Result<(), RuntimeError> {
        let result = self.exec_block(stmts);
        self.join_children();
        result
    }

    fn exec_block(&mut self, stmts: &'env [Stmt]) -> Result<(), RuntimeError> {
        for stmt in stmts {
            tracing::trace!(thread = %self.name, %stmt, "exec");
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn spawn(&mut self, t: &'env ThreadStmt) -> Result<(), RuntimeError> {
        let globals = self.globals.capture(t.captures.as_slice());
        let name = self.shared.next_thread_name();
        let shared = self.shared;
        let scope = self.scope;
        let body: &'env [Stmt] = &t.body;
        let thread_name = name.clone();

        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn_scoped(self.scope, move || {
                let child = Interpreter::new(shared, scope, globals, thread_name.clone());
                if let Err(error) = child.run(body) {
                    tracing::error!(thread = %thread_name, %error, "thread failed");
                    shared.record_failure(thread_name, error);
                }
            })
            .map_err(|e| RuntimeError::ThreadSpawn(e.to_string()))?;
        tracing::debug!(parent = %self.name, thread = %name, captures = ?t.captures, "spawned");
        self.children.push((name, handle));
        Ok(())
    }

    fn join_children(&mut self) {
        for (name, handle) in self.children.drain(..) {
            match handle.join() {
                Ok(()) => tracing::debug!(parent = %self.name, thread = %name, "joined"),
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::error!(thread = %name, %message, "thread panicked");
                    self.shared
                        .record_failure(name, RuntimeError::Panicked(message));
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
