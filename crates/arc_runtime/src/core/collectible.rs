//! Atomically reference-counted allocations.
//!
//! `Collectible<T>` is an owning handle: it holds exactly one count on its
//! allocation. The count starts at 1 for the creator, `share` adds one, and
//! dropping a handle removes one. The handle that observes the 1 -> 0
//! transition frees the allocation, after an acquire fence that pairs with
//! the release decrements of every other handle.
//!
//! `RawCollectible<T>` is a non-owning pointer used where the count is owned
//! by a data structure instead of a handle (the weak proxy cache on an object,
//! the referent pointer of a weak proxy).
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ops::Deref;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering, fence};

use crate::errors::usage_violation;

/// Counts above this are treated as overflow. Leaves room for racing
/// increments between the check and the abort.
const MAX_COUNT: usize = isize::MAX as usize;

pub(crate) struct Inner<T> {
    counter: AtomicUsize,
    content: T,
}

pub struct Collectible<T> {
    ptr: NonNull<Inner<T>>,
    _marker: PhantomData<Inner<T>>,
}

// Shared like `Arc`: the content is reached from several threads at once.
unsafe impl<T: Send + Sync> Send for Collectible<T> {}
unsafe impl<T: Send + Sync> Sync for Collectible<T> {}

impl<T> Collectible<T> {
    pub fn new(content: T) -> Self {
        let inner = Box::new(Inner {
            counter: AtomicUsize::new(1),
            content,
        });
        Self {
            ptr: NonNull::from(Box::leak(inner)),
            _marker: PhantomData,
        }
    }

    #[inline]
    fn inner(&self) -> &Inner<T> {
        // SAFETY: a live handle owns a count, so the allocation is not freed.
        unsafe { self.ptr.as_ref() }
    }

    /// A new handle to the same allocation.
    #[inline]
    pub fn share(&self) -> Self {
        self.inc_counter();
        Self {
            ptr: self.ptr,
            _marker: PhantomData,
        }
    }

    #[inline]
    fn inc_counter(&self) {
        let old = self.inner().counter.fetch_add(1, Ordering::Relaxed);
        if old == 0 {
            usage_violation("increment of a collectible whose count already reached zero");
        }
        if old > MAX_COUNT {
            usage_violation("collectible counter overflow");
        }
    }

    /// Current count. Only exact when no other thread is sharing or
    /// dropping handles concurrently.
    pub fn counter(&self) -> usize {
        self.inner().counter.load(Ordering::Acquire)
    }

    /// Address of the allocation, used as the object identity in dumps.
    pub fn addr(&self) -> usize {
        self.ptr.as_ptr() as usize
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        a.ptr == b.ptr
    }

    pub(crate) fn as_ptr(&self) -> *mut Inner<T> {
        self.ptr.as_ptr()
    }

    /// Drop this handle. If it held the last count, `last` gets exclusive
    /// access to the content before it is freed. A weak upgrade racing with
    /// this sees a zero count and fails.
    pub(crate) fn release_with(self, last: impl FnOnce(&mut T)) {
        let this = ManuallyDrop::new(self);
        if this.inner().counter.fetch_sub(1, Ordering::Release) != 1 {
            return;
        }
        fence(Ordering::Acquire);
        // SAFETY: this handle observed the last count; the allocation came
        // from `Box::new` in `new` and is freed once, here.
        let mut inner = unsafe { Box::from_raw(this.ptr.as_ptr()) };
        last(&mut inner.content);
    }

    /// Give up the handle without releasing its count.
    pub(crate) fn into_raw(self) -> RawCollectible<T> {
        let raw = RawCollectible { ptr: self.ptr };
        std::mem::forget(self);
        raw
    }

    /// Take back a count previously given up with `into_raw`.
    ///
    /// # Safety
    /// `raw` must carry a count that no other handle will release.
    pub(crate) unsafe fn from_raw(raw: RawCollectible<T>) -> Self {
        Self {
            ptr: raw.ptr,
            _marker: PhantomData,
        }
    }
}

impl<T> Deref for Collectible<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.inner().content
    }
}

impl<T> Drop for Collectible<T> {
    #[inline]
    fn drop(&mut self) {
        if self.inner().counter.fetch_sub(1, Ordering::Release) != 1 {
            return;
        }
        fence(Ordering::Acquire);
        // SAFETY: this handle observed the last count.
        unsafe { destroy(self.ptr) }
    }
}

#[cold]
#[inline(never)]
unsafe fn destroy<T>(ptr: NonNull<Inner<T>>) {
    // SAFETY: allocated by `Box::new` in `Collectible::new`, freed once.
    drop(unsafe { Box::from_raw(ptr.as_ptr()) });
}

/// Non-owning pointer to a collectible allocation.
pub(crate) struct RawCollectible<T> {
    ptr: NonNull<Inner<T>>,
}

impl<T> Clone for RawCollectible<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawCollectible<T> {}

impl<T> RawCollectible<T> {
    pub(crate) fn from_ptr(ptr: *mut Inner<T>) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr })
    }

    pub(crate) fn as_ptr(self) -> *mut Inner<T> {
        self.ptr.as_ptr()
    }

    /// A new owning handle, for an allocation known to hold a count.
    ///
    /// # Safety
    /// Some count on the allocation must stay held for the duration of the
    /// call.
    pub(crate) unsafe fn share_live(self) -> Collectible<T> {
        let borrowed = ManuallyDrop::new(Collectible {
            ptr: self.ptr,
            _marker: PhantomData,
        });
        borrowed.share()
    }

    /// Increment only if the count is not zero.
    ///
    /// # Safety
    /// The allocation must not have been freed yet. A count of zero is
    /// allowed: the owner may be in the middle of destroying it.
    pub(crate) unsafe fn try_share(self) -> Option<Collectible<T>> {
        // SAFETY: caller guarantees the memory is still allocated.
        let counter = unsafe { &self.ptr.as_ref().counter };
        let mut cur = counter.load(Ordering::Relaxed);
        loop {
            if cur == 0 {
                return None;
            }
            if cur > MAX_COUNT {
                usage_violation("collectible counter overflow");
            }
            match counter.compare_exchange_weak(cur, cur + 1, Ordering::Acquire, Ordering::Relaxed)
            {
                Ok(_) => {
                    return Some(Collectible {
                        ptr: self.ptr,
                        _marker: PhantomData,
                    });
                }
                Err(actual) => cur = actual,
            }
        }
    }
}
