//! Named tables of references: process-wide globals and per-object fields.
use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard, PoisonError};

use indexmap::IndexMap;
use smallvec::SmallVec;

use super::collectible::Collectible;
use super::reference::Reference;
use crate::errors::RuntimeError;

pub type FastHashMap<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;

/// Anything a target can resolve to. `get` copies the stored reference out
/// (bumping its count); `put` replaces it and releases the old one after the
/// table lock is gone.
pub trait Scope {
    fn get(&self, name: &str) -> Result<Reference, RuntimeError>;
    fn put(&self, name: &str, value: Reference) -> Result<(), RuntimeError>;
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking thread cannot leave a half-written Reference behind.
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Field table of one object. Insertion ordered, grows on demand.
pub struct Fields {
    map: Mutex<IndexMap<String, Reference, ahash::RandomState>>,
}

impl Fields {
    pub fn new() -> Self {
        Self {
            map: Mutex::new(IndexMap::with_hasher(ahash::RandomState::new())),
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.map).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move every entry out, leaving the table empty.
    pub(crate) fn drain(&mut self) -> Vec<Reference> {
        let map = self.map.get_mut().unwrap_or_else(PoisonError::into_inner);
        map.drain(..).map(|(_, v)| v).collect()
    }

    /// Copies of every entry in insertion order.
    pub fn snapshot(&self) -> SmallVec<[(String, Reference); 4]> {
        lock(&self.map)
            .iter()
            .map(|(k, v)| (k.clone(), v.duplicate()))
            .collect()
    }
}

impl Default for Fields {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope for Fields {
    fn get(&self, name: &str) -> Result<Reference, RuntimeError> {
        lock(&self.map)
            .get(name)
            .map(Reference::duplicate)
            .ok_or_else(|| RuntimeError::NoSuchVar(name.to_string()))
    }

    fn put(&self, name: &str, value: Reference) -> Result<(), RuntimeError> {
        let old = {
            let mut map = lock(&self.map);
            match map.get_mut(name) {
                Some(slot) => std::mem::replace(slot, value),
                None => {
                    map.insert(name.to_string(), value);
                    Reference::Empty
                }
            }
        };
        drop(old);
        Ok(())
    }
}

/// One global variable. Shared between the interpreter that declared it and
/// every thread that captured it.
#[derive(Default)]
pub struct Global {
    slot: Mutex<Reference>,
}

type GlobalHandle = Collectible<Global>;

/// The globals visible to one interpreter.
///
/// The name set is fixed at construction and the table never grows. A name
/// whose cell handle is `None` is undeclared (never assigned, or released by
/// `end_of_life`).
pub struct Globals {
    table: FastHashMap<String, RefCell<Option<GlobalHandle>>>,
}

impl Globals {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter();
        let mut table =
            FastHashMap::with_capacity_and_hasher(names.size_hint().0, ahash::RandomState::new());
        for name in names {
            table.insert(name.into(), RefCell::new(None));
        }
        Self { table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Whether `name` currently has a cell in this table.
    pub fn is_declared(&self, name: &str) -> bool {
        self.table
            .get(name)
            .is_some_and(|cell| cell.borrow().is_some())
    }

    /// Release this table's handle on `name`'s cell. Other holders (threads
    /// that captured it) keep the cell and its value alive.
    pub fn end_of_life(&self, name: &str) {
        let released = self.table.get(name).and_then(|cell| cell.borrow_mut().take());
        if let Some(global) = released {
            tracing::trace!(name, holders = global.counter() - 1, "global released");
        }
    }

    /// A table for a child thread holding exactly `names`. Names not yet
    /// declared here get an empty cell first, so both sides see later
    /// assignments.
    pub fn capture<S: AsRef<str>>(&self, names: &[S]) -> Globals {
        let mut table =
            FastHashMap::with_capacity_and_hasher(names.len(), ahash::RandomState::new());
        for name in names {
            let name = name.as_ref();
            let shared = match self.table.get(name) {
                Some(cell) => cell
                    .borrow_mut()
                    .get_or_insert_with(|| Collectible::new(Global::default()))
                    .share(),
                None => Collectible::new(Global::default()),
            };
            table.insert(name.to_string(), RefCell::new(Some(shared)));
        }
        Globals { table }
    }

    fn cell(&self, name: &str) -> Result<&RefCell<Option<GlobalHandle>>, RuntimeError> {
        self.table
            .get(name)
            .ok_or_else(|| RuntimeError::NoSuchVar(name.to_string()))
    }
}

impl Scope for Globals {
    fn get(&self, name: &str) -> Result<Reference, RuntimeError> {
        let cell = self.cell(name)?.borrow();
        let value = match cell.as_ref() {
            Some(global) => lock(&global.slot).duplicate(),
            None => Reference::Empty,
        };
        if value.is_empty() {
            return Err(RuntimeError::NoSuchVar(name.to_string()));
        }
        Ok(value)
    }

    fn put(&self, name: &str, value: Reference) -> Result<(), RuntimeError> {
        let global = self
            .cell(name)?
            .borrow_mut()
            .get_or_insert_with(|| Collectible::new(Global::default()))
            .share();
        let old = std::mem::replace(&mut *lock(&global.slot), value);
        drop(old);
        Ok(())
    }
}
