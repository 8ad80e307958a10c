//! Cache Statistics Module
//!
//! Tracks lookup and expiry metrics for a cache store.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Point-in-time snapshot of cache metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of lookups that found the key
    pub hits: u64,
    /// Number of lookups that missed
    pub misses: u64,
    /// Number of entries removed by the sweeper
    pub expirations: u64,
    /// Number of completed sweep passes
    pub sweeps: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Wall-clock time of the last completed sweep
    pub last_sweep_at: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

// == Stats Recorder ==
/// Live counters owned by a store.
///
/// Lookup counters are atomic so that reads only need the shared lock; sweep
/// counters are updated by the sweeper while it holds the exclusive lock.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    expirations: u64,
    sweeps: u64,
    last_sweep_at: Option<DateTime<Utc>>,
}

impl StatsRecorder {
    /// Creates a recorder with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a finished sweep pass and how many entries it removed.
    pub fn record_sweep(&mut self, removed: usize) {
        self.sweeps += 1;
        self.expirations += removed as u64;
        self.last_sweep_at = Some(Utc::now());
    }

    /// Builds a snapshot for a store currently holding `total_entries`.
    pub fn snapshot(&self, total_entries: usize) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            expirations: self.expirations,
            sweeps: self.sweeps,
            total_entries,
            last_sweep_at: self.last_sweep_at,
        }
    }
}
