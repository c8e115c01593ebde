//! Strong/weak reference handles.
use super::object::{Object, ObjectHandle, ProxyHandle};
use crate::errors::{RuntimeError, usage_violation};

/// What a variable or field holds.
///
/// A `Strong` reference owns one count on its object, a `Weak` one owns one
/// count on the object's proxy. There is no `Clone`: copies go through
/// `duplicate`, `make_strong` or `make_weak`, which say which count they bump.
#[derive(Default)]
pub enum Reference {
    #[default]
    Empty,
    Strong(ObjectHandle),
    Weak(ProxyHandle),
}

impl Reference {
    /// Wrap a freshly allocated object without touching its count.
    pub fn new_strong(obj: ObjectHandle) -> Self {
        if obj.counter() != 1 {
            usage_violation("new_strong on an object that is already shared");
        }
        Reference::Strong(obj)
    }

    /// A strong reference to whatever `other` points at.
    pub fn make_strong(other: &Reference) -> Result<Self, RuntimeError> {
        Ok(Reference::Strong(other.get()?))
    }

    /// A weak reference to whatever `other` points at.
    pub fn make_weak(other: &Reference) -> Result<Self, RuntimeError> {
        let obj = other.get()?;
        Ok(Reference::Weak(Object::weak_proxy(&obj)))
    }

    /// A temporary strong handle to the live target.
    pub fn get(&self) -> Result<ObjectHandle, RuntimeError> {
        match self {
            Reference::Empty => Err(RuntimeError::InvalidAccess),
            Reference::Strong(obj) => Ok(obj.share()),
            Reference::Weak(proxy) => proxy.upgrade().ok_or(RuntimeError::InvalidAccess),
        }
    }

    /// Same variant, one more count on the underlying object or proxy.
    pub fn duplicate(&self) -> Self {
        match self {
            Reference::Empty => Reference::Empty,
            Reference::Strong(obj) => Reference::Strong(obj.share()),
            Reference::Weak(proxy) => Reference::Weak(proxy.share()),
        }
    }

    /// Move out, leaving `Empty` behind.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Reference::Empty)
    }

    pub fn is_weak(&self) -> bool {
        matches!(self, Reference::Weak(_))
    }
}

impl std::fmt::Debug for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reference::Empty => f.write_str("Empty"),
            Reference::Strong(obj) => write!(f, "Strong({:#x})", obj.addr()),
            Reference::Weak(proxy) => {
                write!(f, "Weak({:#x} -> {:#x})", proxy.addr(), proxy.target_addr())
            }
        }
    }
}
