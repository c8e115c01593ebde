//! Heap objects and their weak proxies.
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::{PoisonError, RwLock};

use super::collectible::{Collectible, Inner, RawCollectible};
use super::reference::Reference;
use super::scope::Fields;

pub type ObjectHandle = Collectible<Object>;
pub type ProxyHandle = Collectible<WeakProxy>;

pub struct Object {
    name: Option<String>,
    fields: Fields,
    /// Lazily created proxy. When set, the object owns one count on it.
    weak_proxy: AtomicPtr<Inner<WeakProxy>>,
}

impl Object {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            fields: Fields::new(),
            weak_proxy: AtomicPtr::new(ptr::null_mut()),
        }
    }

    /// Allocate a fresh object. The returned handle holds the only count.
    pub fn alloc(name: Option<String>) -> ObjectHandle {
        let obj = Collectible::new(Self::new(name));
        tracing::debug!(addr = obj.addr(), name = ?obj.name, "object created");
        obj
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// The object's proxy, created on first use. Concurrent first uses agree
    /// on a single proxy: the loser of the compare-exchange frees its own.
    pub fn weak_proxy(this: &ObjectHandle) -> ProxyHandle {
        let cached = this.weak_proxy.load(Ordering::Acquire);
        if let Some(raw) = RawCollectible::from_ptr(cached) {
            // SAFETY: the cache's count is only released when the object dies,
            // and `this` keeps it alive.
            return unsafe { raw.share_live() };
        }

        let fresh = Collectible::new(WeakProxy::new(this));
        let for_cache = fresh.share().into_raw();
        match this.weak_proxy.compare_exchange(
            ptr::null_mut(),
            for_cache.as_ptr(),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                tracing::debug!(addr = fresh.addr(), target = this.addr(), "weak proxy created");
                fresh
            }
            Err(winner) => {
                // SAFETY: the cache never took `for_cache`.
                drop(unsafe { Collectible::from_raw(for_cache) });
                drop(fresh);
                match RawCollectible::from_ptr(winner) {
                    // SAFETY: as above, the winner's cache count is held.
                    Some(raw) => unsafe { raw.share_live() },
                    None => Self::weak_proxy(this),
                }
            }
        }
    }

    /// The proxy if one was ever created, without creating it.
    pub fn cached_proxy(this: &ObjectHandle) -> Option<ProxyHandle> {
        let raw = RawCollectible::from_ptr(this.weak_proxy.load(Ordering::Acquire))?;
        // SAFETY: see `weak_proxy`.
        Some(unsafe { raw.share_live() })
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        tracing::debug!(name = ?self.name, "object destroyed");
        if let Some(raw) = RawCollectible::from_ptr(*self.weak_proxy.get_mut()) {
            // SAFETY: the cache's count, released exactly once here.
            let cached = unsafe { Collectible::from_raw(raw) };
            cached.invalidate();
        }

        // Objects only reachable through these fields die with us. Empty
        // them here, one at a time, so a long chain does not recurse.
        let mut pending = self.fields.drain();
        while let Some(field) = pending.pop() {
            if let Reference::Strong(obj) = field {
                obj.release_with(|dying| pending.append(&mut dying.fields.drain()));
            }
        }
    }
}

/// Indirection cell shared by all weak references to one object.
///
/// `referent` is non-null exactly while the object is alive. Upgrades run
/// under the read side of `gate`; the dying object nulls `referent` under the
/// write side, so no upgrade can touch the object's memory after it is freed.
pub struct WeakProxy {
    referent: AtomicPtr<Inner<Object>>,
    gate: RwLock<()>,
}

impl WeakProxy {
    fn new(target: &ObjectHandle) -> Self {
        Self {
            referent: AtomicPtr::new(target.as_ptr()),
            gate: RwLock::new(()),
        }
    }

    /// A strong handle to the object, or `None` once it has died.
    pub fn upgrade(&self) -> Option<ObjectHandle> {
        let _read = self.gate.read().unwrap_or_else(PoisonError::into_inner);
        let raw = RawCollectible::from_ptr(self.referent.load(Ordering::Acquire))?;
        // SAFETY: the object frees its memory only after `invalidate`, which
        // waits for this read guard.
        unsafe { raw.try_share() }
    }

    pub fn is_alive(&self) -> bool {
        !self.referent.load(Ordering::Acquire).is_null()
    }

    /// Address of the target, 0 once collected.
    pub fn target_addr(&self) -> usize {
        self.referent.load(Ordering::Acquire) as usize
    }

    fn invalidate(&self) {
        let _write = self.gate.write().unwrap_or_else(PoisonError::into_inner);
        self.referent.store(ptr::null_mut(), Ordering::Release);
    }
}
