//! Expiry Sweeper Task
//!
//! Background task that periodically removes expired cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Lifecycle state of a sweeper task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweeperState {
    /// Looping: sleep, lock, sweep, unlock
    Running,
    /// Loop exited, no further sweeps
    Stopped,
}

/// Handle to a running sweeper task.
///
/// Dropping the handle stops the task.
#[derive(Debug)]
pub struct Sweeper {
    shutdown: watch::Sender<bool>,
    state: watch::Receiver<SweeperState>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    /// Signals the task to exit. Safe to call any number of times.
    pub fn stop(&self) {
        self.shutdown.send_replace(true);
    }

    /// Reports whether the task loop is still alive.
    pub fn state(&self) -> SweeperState {
        if self.handle.is_finished() {
            SweeperState::Stopped
        } else {
            *self.state.borrow()
        }
    }

    /// Signals the task to exit and waits until it has.
    ///
    /// A sweep already in progress, including one still waiting for the
    /// write lock, completes before this returns.
    pub async fn shutdown(&self) {
        self.stop();
        let mut state = self.state.clone();
        // An error means the task is gone without reporting, which is stopped too.
        let _ = state.wait_for(|s| *s == SweeperState::Stopped).await;
    }

    /// Returns true once [`stop`](Self::stop) has been requested.
    pub fn is_stop_requested(&self) -> bool {
        *self.shutdown.borrow()
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawns a background task that removes expired entries from `cache`.
///
/// The task sleeps for `interval` between sweeps and takes the write lock only
/// for the duration of one pass. It exits as soon as the returned [`Sweeper`]
/// is stopped or dropped, without waiting for the current sleep to finish.
///
/// Must be called from within a Tokio runtime.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheStore::new(Duration::from_secs(60))?));
/// let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(60), "pokemon");
/// // Later, during teardown:
/// sweeper.stop();
/// ```
pub fn spawn_sweeper(
    cache: Arc<RwLock<CacheStore>>,
    interval: Duration,
    name: &'static str,
) -> Sweeper {
    let (shutdown, mut shutdown_rx) = watch::channel(false);
    let (state_tx, state) = watch::channel(SweeperState::Running);

    let handle = tokio::spawn(async move {
        info!(cache = name, ?interval, "Starting expiry sweeper");

        loop {
            tokio::select! {
                biased;

                changed = shutdown_rx.changed() => {
                    // A dropped sender also ends the loop.
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                    continue;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            let removed = {
                let mut cache_guard = cache.write().await;
                cache_guard.sweep_expired(Instant::now())
            };

            if removed > 0 {
                info!(cache = name, removed, "Expiry sweep removed entries");
            } else {
                debug!(cache = name, "Expiry sweep: no expired entries found");
            }
        }

        state_tx.send_replace(SweeperState::Stopped);
        info!(cache = name, "Expiry sweeper stopped");
    });

    Sweeper {
        shutdown,
        state,
        handle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn shared_store(ttl: Duration) -> Arc<RwLock<CacheStore>> {
        Arc::new(RwLock::new(CacheStore::new(ttl).unwrap()))
    }

    async fn wait_until_stopped(sweeper: &Sweeper) {
        for _ in 0..100 {
            if sweeper.state() == SweeperState::Stopped {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("sweeper did not stop");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_removes_expired_entries() {
        let cache = shared_store(Duration::from_secs(1));
        cache
            .write()
            .await
            .add("expire_soon".to_string(), Bytes::from_static(b"value"));

        let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(1), "test");

        tokio::time::sleep(Duration::from_millis(1500)).await;

        let cache_guard = cache.read().await;
        assert!(
            cache_guard.get("expire_soon").is_err(),
            "Expired entry should have been swept"
        );
        assert_eq!(cache_guard.stats().expirations, 1);
        drop(cache_guard);

        sweeper.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_preserves_valid_entries() {
        let cache = shared_store(Duration::from_secs(3600));
        cache
            .write()
            .await
            .add("long_lived".to_string(), Bytes::from_static(b"value"));

        let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(1), "test");

        tokio::time::sleep(Duration::from_millis(3500)).await;

        let cache_guard = cache.read().await;
        assert_eq!(
            cache_guard.get("long_lived").unwrap(),
            Bytes::from_static(b"value")
        );
        assert_eq!(cache_guard.stats().sweeps, 3);
        drop(cache_guard);

        sweeper.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_on_request() {
        let sweeper = spawn_sweeper(
            shared_store(Duration::from_secs(60)),
            Duration::from_secs(60),
            "test",
        );
        assert_eq!(sweeper.state(), SweeperState::Running);

        sweeper.stop();
        sweeper.stop();
        assert!(sweeper.is_stop_requested());

        wait_until_stopped(&sweeper).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_stops_when_dropped() {
        let cache = shared_store(Duration::from_secs(1));
        let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(1), "test");
        drop(sweeper);

        // The task releases its clone of the store when it exits.
        for _ in 0..100 {
            if Arc::strong_count(&cache) == 1 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("sweeper still holds the store after drop");
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_waits_for_pending_sweep() {
        let cache = shared_store(Duration::from_secs(1));
        cache
            .write()
            .await
            .add("expire_soon".to_string(), Bytes::from_static(b"value"));
        let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(1), "test");

        // Hold the write lock across the first wake-up so the sweep is pending.
        let guard = cache.write().await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        sweeper.stop();
        drop(guard);

        sweeper.shutdown().await;
        assert_eq!(sweeper.state(), SweeperState::Stopped);

        let cache_guard = cache.read().await;
        assert_eq!(cache_guard.stats().sweeps, 1);
        assert!(cache_guard.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stopped_sweeper_no_longer_sweeps() {
        let cache = shared_store(Duration::from_secs(1));
        let sweeper = spawn_sweeper(cache.clone(), Duration::from_secs(1), "test");

        tokio::time::sleep(Duration::from_millis(1500)).await;
        sweeper.shutdown().await;

        cache
            .write()
            .await
            .add("survivor".to_string(), Bytes::from_static(b"value"));
        tokio::time::sleep(Duration::from_secs(5)).await;

        let cache_guard = cache.read().await;
        assert!(cache_guard.get("survivor").is_ok());
        assert_eq!(cache_guard.stats().sweeps, 1);
    }
}
