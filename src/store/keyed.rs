//! KeyedStore - concurrent job-name keyed storage with DashMap
//!
//! Values are wrapped in `Arc` on insert and never handed out mutably,
//! so a stored value is immutable until it is replaced by another `store`.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::error::{LintaggError, Result};

/// Thread-safe job-name → value map (lock-free reads, sharded writes)
///
/// Cloning is shallow: every clone shares the same underlying map, so a
/// run context can hand one clone to each job executor.
///
/// # Consistency
///
/// [`range`](Self::range) and [`len`](Self::len) are weakly consistent.
/// A `store` racing with either may or may not be observed, and there is no
/// snapshot isolation. Read them after every producer has finished when an
/// exact view is needed.
pub struct KeyedStore<V> {
    /// job name → stored value
    entries: Arc<DashMap<Arc<str>, Arc<V>>>,
}

impl<V> KeyedStore<V> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    /// Insert or replace the value for `key` (last write wins, no merge)
    pub fn store(&self, key: impl Into<Arc<str>>, value: V) {
        let key = key.into();
        if self
            .entries
            .insert(Arc::clone(&key), Arc::new(value))
            .is_some()
        {
            debug!(key = %key, "replaced previously stored value");
        }
    }

    /// Fetch the current value for `key`
    ///
    /// Absence is an ordinary outcome and comes back as
    /// [`LintaggError::KeyNotFound`].
    pub fn load(&self, key: &str) -> Result<Arc<V>> {
        self.entries
            .get(key)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| LintaggError::KeyNotFound {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Visit every entry once, in unspecified order
    ///
    /// Shard read locks are held while `visit` runs: it must not call back
    /// into this store (directly or through a clone).
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &Arc<V>),
    {
        for entry in self.entries.iter() {
            visit(entry.key(), entry.value());
        }
    }

    /// Number of distinct keys, summed from each shard's length on every call
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored keys in sorted order (for deterministic reports)
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().to_string()).collect();
        keys.sort_unstable();
        keys
    }
}

impl<V> Clone for KeyedStore<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V> Default for KeyedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for KeyedStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedStore")
            .field("len", &self.len())
            .finish()
    }
}
