//! Bounded least-recently-used cache of analysis results.
//!
//! One mutex guards the whole lookup + touch + insert + evict sequence. A
//! poisoned lock never fails an analysis: lookups report a miss and inserts
//! are dropped, so callers recompute.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use layered_clause::normalize;

use crate::ReviewError;

/// SHA-256 of the normalized clause text and the rewrite flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    pub fn new(clause: &str, with_rewrite: bool) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(normalize(clause).as_bytes());
        hasher.update([0u8]);
        hasher.update(if with_rewrite { b"1" } else { b"0" });
        Self(hasher.finalize().into())
    }
}

impl fmt::Debug for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 bytes are enough to tell keys apart in logs.
        write!(f, "CacheKey(")?;
        for byte in &self.0[..8] {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

/// Counters reported by [`ResultCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub max_size: usize,
}

impl CacheStats {
    /// `hits / (hits + misses)`, 0 before any lookup.
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            return 0.0;
        }
        self.hits as f64 / lookups as f64
    }
}

/// Thread-safe LRU cache handing out shared values.
pub struct ResultCache<V> {
    inner: Mutex<LruCache<CacheKey, Arc<V>>>,
    max_size: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V> fmt::Debug for ResultCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCache")
            .field("stats", &self.stats())
            .finish()
    }
}

impl<V> ResultCache<V> {
    /// A cache holding at most `max_size` entries; `None` when `max_size` is 0.
    pub fn new(max_size: usize) -> Option<Self> {
        let capacity = NonZeroUsize::new(max_size)?;
        Some(Self {
            inner: Mutex::new(LruCache::new(capacity)),
            max_size,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    fn lock(&self) -> Option<MutexGuard<'_, LruCache<CacheKey, Arc<V>>>> {
        match self.inner.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                let err = ReviewError::CacheUnavailable {
                    reason: "lock poisoned".to_string(),
                };
                log::warn!("{}", err);
                None
            }
        }
    }

    /// Look up `key`, marking it most recently used.
    pub fn get(&self, key: &CacheKey) -> Option<Arc<V>> {
        let found = self.lock().and_then(|mut cache| cache.get(key).cloned());
        match found {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::debug!("cache hit {:?}", key);
                Some(value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                log::debug!("cache miss {:?}", key);
                None
            }
        }
    }

    /// Insert or replace `key`. Inserting a new key into a full cache evicts
    /// the least recently used entry.
    pub fn set(&self, key: CacheKey, value: Arc<V>) {
        let Some(mut cache) = self.lock() else {
            return;
        };
        if let Some((evicted, _)) = cache.push(key, value) {
            if evicted != key {
                log::debug!("cache evicted {:?}", evicted);
            }
        }
    }

    /// Whether `key` is cached, without touching its recency.
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.lock().map_or(false, |cache| cache.contains(key))
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |cache| cache.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Some(mut cache) = self.lock() {
            cache.clear();
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.len(),
            max_size: self.max_size,
        }
    }
}
