//! Runtime errors.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Read of an undeclared or released global, or of an absent field.
    #[error("no such variable or field `{0}`")]
    NoSuchVar(String),
    /// Dereference of a weak reference whose object is gone.
    #[error("invalid access: weak reference target was collected")]
    InvalidAccess,
    #[error("failed to spawn thread: {0}")]
    ThreadSpawn(String),
    /// A spawned thread panicked. Only ever recorded as a thread failure.
    #[error("thread panicked: {0}")]
    Panicked(String),
}

/// Broken counting contract. There is no way to recover a heap whose counts
/// are wrong, so this logs and aborts.
#[cold]
#[inline(never)]
pub(crate) fn usage_violation(what: &str) -> ! {
    tracing::error!(violation = what, "reference counting usage violation");
    std::process::abort()
}
