//! Shared string-identifier pool.
//!
//! Every raw category value observed during the fetch phase is interned
//! here. The pool guarantees one stable id per distinct string for the
//! lifetime of a build, no matter which locale or category produced it, so
//! later phases can compare and reference values by id. Ids are only
//! meaningful within a single run.

use std::collections::HashMap;
use std::sync::Mutex;

/// Thread-safe bidirectional mapping between strings and dense `u32` ids.
///
/// Shared across all fetch tasks behind an `Arc`. Ids are handed out in
/// first-intern order starting at 0.
#[derive(Debug, Default)]
pub struct IdentifierPool {
    inner: Mutex<PoolInner>,
}

#[derive(Debug, Default)]
struct PoolInner {
    ids: HashMap<String, u32>,
    values: Vec<String>,
}

impl IdentifierPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id for `value`, interning it first if it is new.
    ///
    /// Interning the same string again always returns the original id.
    pub fn intern(&self, value: &str) -> u32 {
        let mut inner = self.inner.lock().unwrap();
        if let Some(&id) = inner.ids.get(value) {
            return id;
        }
        let id = inner.values.len() as u32;
        inner.ids.insert(value.to_string(), id);
        inner.values.push(value.to_string());
        id
    }

    /// The id for `value` without interning it (useful for testing).
    #[cfg(test)]
    pub fn resolve(&self, value: &str) -> Option<u32> {
        self.inner.lock().unwrap().ids.get(value).copied()
    }

    /// The string behind `id`, if the pool handed that id out.
    pub fn lookup(&self, id: u32) -> Option<String> {
        self.inner.lock().unwrap().values.get(id as usize).cloned()
    }

    /// Number of distinct strings interned so far.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
