//! Concurrent compute-if-absent cache shared by the analysis services
//!
//! Every analysis cache in the engine (phase analyses, per-goal introspection,
//! per-signature execution analyses and plans) is an instance of
//! [`AnalysisCache`]. A key maps to a once-only cell: the map shard lock is held
//! only long enough to fetch or insert the cell, and the computation itself runs
//! outside any map lock. Threads racing on the same key block on the cell and all
//! receive the one shared `Arc` produced by the winner.

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Slot<V> = Arc<OnceCell<Arc<V>>>;

/// Concurrent cache with at-most-once computation per key
pub struct AnalysisCache<K, V> {
    name: &'static str,
    entries: DashMap<K, Slot<V>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

/// Snapshot of cache usage counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub name: &'static str,
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

impl<K, V> AnalysisCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: DashMap::new(),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    /// Return the cached value for `key`, computing it with `compute` if absent.
    ///
    /// `compute` runs at most once per key for the lifetime of the entry, and
    /// never while a map lock is held, so it may block on external work.
    pub fn get_or_compute<F>(&self, key: &K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        let slot = self.slot(key);

        let mut computed = false;
        let value = slot.get_or_init(|| {
            computed = true;
            Arc::new(compute())
        });

        if computed {
            self.misses.fetch_add(1, Ordering::Relaxed);
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }

        Arc::clone(value)
    }

    /// Return the cached value without computing it
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let slot = self.entries.get(key).map(|entry| Arc::clone(entry.value()))?;
        slot.get().cloned()
    }

    /// Number of fully computed entries
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys of all fully computed entries
    pub fn keys(&self) -> Vec<K> {
        self.entries
            .iter()
            .filter(|entry| entry.value().get().is_some())
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        self.entries.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            name: self.name,
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn slot(&self, key: &K) -> Slot<V> {
        // Look up first so the common hit path only takes a shard read lock.
        let existing = self.entries.get(key).map(|entry| Arc::clone(entry.value()));
        match existing {
            Some(slot) => slot,
            None => Arc::clone(self.entries.entry(key.clone()).or_default().value()),
        }
    }
}
