//! Cache Entry Module
//!
//! Defines the immutable value-with-timestamp record stored per key.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// A cached payload together with the instant it was written.
///
/// Entries are never mutated; overwriting a key builds a new entry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: Bytes,
    created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: Bytes) -> Self {
        Self::created_at(value, Instant::now())
    }

    /// Creates an entry with an explicit creation instant.
    pub fn created_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    /// The stored payload.
    pub fn value(&self) -> &Bytes {
        &self.value
    }

    // == Is Expired ==
    /// Checks whether the entry is past `ttl` at `now`.
    ///
    /// Boundary condition: an entry is expired once `created_at + ttl` is at
    /// or before `now`.
    pub fn is_expired_at(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}
