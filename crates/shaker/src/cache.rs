//! Per-component result cache.
//!
//! A [`ShakeCache`] is owned by the caller and shared between runs. Entries
//! are keyed by component name and hold the fingerprint of the inputs they
//! were computed from; a lookup with a different fingerprint is a miss and
//! the entry is replaced on the next insert.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::result::ComponentOutcome;

/// SHA-256 over everything a component's result depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    pub fn builder() -> CacheKeyBuilder {
        CacheKeyBuilder {
            hasher: Sha256::new(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0[..8] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Feeds labelled, length-prefixed fields so adjacent values cannot run
/// together.
pub struct CacheKeyBuilder {
    hasher: Sha256,
}

impl CacheKeyBuilder {
    pub fn field(mut self, label: &str, value: &[u8]) -> Self {
        self.hasher.update(label.as_bytes());
        self.hasher.update((value.len() as u64).to_le_bytes());
        self.hasher.update(value);
        self
    }

    pub fn list<'a>(mut self, label: &str, values: impl IntoIterator<Item = &'a str>) -> Self {
        for value in values {
            self = self.field(label, value.as_bytes());
        }
        self
    }

    pub fn finish(self) -> CacheKey {
        CacheKey(self.hasher.finalize().into())
    }
}

#[derive(Debug)]
struct Entry {
    key: CacheKey,
    value: ComponentOutcome,
}

#[derive(Debug, Default)]
struct Inner {
    entries: RwLock<FxHashMap<String, Entry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Shared component cache. Clones share storage.
#[derive(Debug, Clone, Default)]
pub struct ShakeCache {
    inner: Arc<Inner>,
}

impl ShakeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached result for `component` if it was computed from `key`.
    pub fn get(&self, component: &str, key: &CacheKey) -> Option<ComponentOutcome> {
        let entries = self.inner.entries.read();
        match entries.get(component) {
            Some(entry) if entry.key == *key => {
                self.inner.hits.fetch_add(1, Ordering::Relaxed);
                Some(entry.value.clone())
            }
            _ => {
                self.inner.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    pub fn insert(&self, component: &str, key: CacheKey, value: ComponentOutcome) {
        self.inner
            .entries
            .write()
            .insert(component.to_string(), Entry { key, value });
    }

    pub fn invalidate(&self, component: &str) -> bool {
        self.inner.entries.write().remove(component).is_some()
    }

    pub fn clear(&self) {
        self.inner.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats::new(
            self.inner.hits.load(Ordering::Relaxed),
            self.inner.misses.load(Ordering::Relaxed),
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

impl CacheStats {
    pub fn new(hits: u64, misses: u64) -> Self {
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        Self {
            hits,
            misses,
            hit_rate,
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} hits, {} misses ({:.1}%)",
            self.hits,
            self.misses,
            self.hit_rate * 100.0
        )
    }
}
