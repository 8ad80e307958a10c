//! Cache Module
//!
//! Provides an in-memory key-to-bytes cache with TTL expiration.

mod entry;
mod handle;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use stats::{CacheStats, StatsRecorder};
pub use store::CacheStore;
