use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::foundation::error::BlockrayResult;

/// Populate-once map shared between threads.
///
/// The map lock is only held while looking up the per-key cell, never while computing a
/// value, so initializers may consult other caches. Concurrent first requests for the same
/// key block on that key's cell and all observe the single winning value. Failed
/// initializations are not stored; the next caller retries.
pub(crate) struct MemoCache<K, V> {
    cells: Mutex<HashMap<K, Arc<OnceCell<V>>>>,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub(crate) fn new() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn get_or_try_init<F>(&self, key: &K, init: F) -> BlockrayResult<V>
    where
        F: FnOnce() -> BlockrayResult<V>,
    {
        let cell = {
            let mut cells = self.cells.lock();
            Arc::clone(cells.entry(key.clone()).or_default())
        };
        cell.get_or_try_init(init).cloned()
    }

    /// Number of keys holding a computed value.
    pub(crate) fn len(&self) -> usize {
        let cells = self.cells.lock();
        cells.values().filter(|cell| cell.get().is_some()).count()
    }
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/memo.rs"]
mod tests;
