//! Cache Handle Module
//!
//! Thread-safe cache handle owning a store and its expiry sweeper.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::{debug, info, trace};

use crate::cache::{CacheStats, CacheStore};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_sweeper, Sweeper, SweeperState};

// == Cache ==
/// A key-to-bytes cache whose entries expire after a fixed TTL.
///
/// Expired entries are removed by a background sweeper, so an entry stays
/// readable for at most `ttl + sweep_interval` after its latest write. Reads
/// share the lock with each other; writes and sweeps are exclusive.
///
/// The sweeper stops on [`close`](Self::close), [`shutdown`](Self::shutdown)
/// or when the cache is dropped.
/// Share a cache between tasks with `Arc<Cache>` or by reference.
#[derive(Debug)]
pub struct Cache {
    name: &'static str,
    store: Arc<RwLock<CacheStore>>,
    ttl: Duration,
    sweep_interval: Duration,
    sweeper: Sweeper,
}

impl Cache {
    // == Constructors ==
    /// Creates a cache that sweeps once per `ttl`.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when `ttl` is zero.
    pub fn new(ttl: Duration) -> Result<Self> {
        Self::with_sweep_interval(ttl, ttl)
    }

    /// Creates a cache with a sweep period independent of the TTL.
    ///
    /// A shorter interval tightens the staleness bound to
    /// `ttl + sweep_interval`.
    pub fn with_sweep_interval(ttl: Duration, sweep_interval: Duration) -> Result<Self> {
        Self::build("cache", ttl, sweep_interval)
    }

    /// Creates a named cache from configuration.
    pub fn from_config(name: &'static str, config: &Config) -> Result<Self> {
        config.validate()?;
        Self::build(name, config.ttl(), config.sweep_interval())
    }

    fn build(name: &'static str, ttl: Duration, sweep_interval: Duration) -> Result<Self> {
        if sweep_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "sweep interval must be greater than zero".to_string(),
            ));
        }

        let store = Arc::new(RwLock::new(CacheStore::new(ttl)?));
        let sweeper = spawn_sweeper(store.clone(), sweep_interval, name);
        info!(cache = name, ?ttl, ?sweep_interval, "Cache created");

        Ok(Self {
            name,
            store,
            ttl,
            sweep_interval,
            sweeper,
        })
    }

    // == Add ==
    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// Expiry is always measured from the most recent write.
    pub async fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        trace!(cache = self.name, %key, size = value.len(), "Cache add");

        self.store.write().await.add(key, value);
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Reading does not extend the entry's lifetime.
    ///
    /// # Errors
    /// Returns `NotFound` when the key was never added or has been swept.
    pub async fn get(&self, key: &str) -> Result<Bytes> {
        let result = self.store.read().await.get(key);
        match &result {
            Ok(_) => debug!(cache = self.name, key, "Cache hit"),
            Err(_) => debug!(cache = self.name, key, "Cache miss"),
        }
        result
    }

    // == Get Or Fetch ==
    /// Returns the cached value, or runs `fetch` on a miss and caches its result.
    ///
    /// No lock is held while `fetch` runs. Errors from `fetch` are returned
    /// as-is and nothing is cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: &str,
        fetch: F,
    ) -> std::result::Result<Bytes, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Bytes, E>>,
    {
        if let Ok(value) = self.get(key).await {
            return Ok(value);
        }

        let value = fetch().await?;
        self.add(key, value.clone()).await;
        Ok(value)
    }

    // == Introspection ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Returns the current number of entries, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Lifetime of every entry.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Period of the background sweeper.
    pub fn sweep_interval(&self) -> Duration {
        self.sweep_interval
    }

    /// Name used in log events.
    pub fn name(&self) -> &'static str {
        self.name
    }

    // == Close ==
    /// Stops the background sweeper.
    ///
    /// Idempotent. Entries stay readable after closing but no longer expire.
    pub fn close(&self) {
        if !self.sweeper.is_stop_requested() {
            debug!(cache = self.name, "Closing cache");
        }
        self.sweeper.stop();
    }

    /// Stops the background sweeper and waits for it to exit.
    ///
    /// Once this returns no sweep can run against the cache, including one
    /// that was already waiting for the lock when shutdown began.
    pub async fn shutdown(&self) {
        self.close();
        self.sweeper.shutdown().await;
        debug!(cache = self.name, "Cache sweeper shut down");
    }

    /// Returns the sweeper's lifecycle state.
    pub fn sweeper_state(&self) -> SweeperState {
        self.sweeper.state()
    }
}
