//! Poke Cache - A time-bounded concurrent in-memory cache
//!
//! Memoizes network responses by key and expires them after a fixed TTL
//! through a stoppable background sweeper.

pub mod cache;
pub mod config;
pub mod error;
pub mod registry;
pub mod tasks;

pub use cache::{Cache, CacheStats};
pub use config::Config;
pub use error::{CacheError, Result};
pub use registry::{CacheRegistry, ResourceKind};
pub use tasks::SweeperState;
