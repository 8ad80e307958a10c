//! Cache Store Module
//!
//! Key-to-entry map with a fixed TTL shared by every entry.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats, StatsRecorder};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Map storage with a store-wide TTL.
///
/// The store itself is not synchronized; [`Cache`](crate::cache::Cache) wraps
/// it in a `RwLock` shared with the sweeper task.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Lookup and sweep counters
    stats: StatsRecorder,
    /// Lifetime of every entry, measured from its latest write
    ttl: Duration,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when `ttl` is zero.
    pub fn new(ttl: Duration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "ttl must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            entries: HashMap::new(),
            stats: StatsRecorder::new(),
            ttl,
        })
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// The entry's age restarts from now, even when overwriting.
    pub fn add(&mut self, key: String, value: Bytes) {
        self.entries.insert(key, CacheEntry::new(value));
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Does not touch the entry: repeated reads never extend its lifetime.
    pub fn get(&self, key: &str) -> Result<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Ok(entry.value().clone())
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::NotFound(key.to_string()))
            }
        }
    }

    // == Sweep Expired ==
    /// Removes every entry whose TTL has elapsed at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self, now: Instant) -> usize {
        let ttl = self.ttl;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(ttl, now));

        let removed = before - self.entries.len();
        self.stats.record_sweep(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
