//! arc-lang runtime.
//!
//! A manually reference-counted heap with strong and weak references, the
//! global/field scopes built on it, and a tree-walking interpreter that runs
//! `thread` blocks on real OS threads.
pub mod core;
pub mod errors;
mod ast_exec;
mod runtime;

pub use self::core::{Collectible, Fields, Globals, Object, ObjectHandle, Reference, Scope, WeakProxy};
pub use errors::RuntimeError;
pub use runtime::{ExecResult, OutputSink, Runtime, RuntimeConfig, ThreadFailure};
