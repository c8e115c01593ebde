//! Heap and scope primitives.
//!
//! - `Collectible` - atomically counted allocation, exactly-once free
//! - `Object` / `WeakProxy` - heap entities and their weak indirection
//! - `Reference` - what variables and fields hold
//! - `Globals` / `Fields` - the two kinds of `Scope`
mod collectible;
mod object;
mod reference;
mod scope;

pub use collectible::Collectible;
pub use object::{Object, ObjectHandle, ProxyHandle, WeakProxy};
pub use reference::Reference;
pub use scope::{FastHashMap, Fields, Global, Globals, Scope};
