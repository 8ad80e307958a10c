//! Background Tasks Module
//!
//! Contains background tasks that run for the lifetime of a cache.
//!
//! # Tasks
//! - Expiry Sweeper: removes expired cache entries once per sweep interval

mod sweeper;

pub use sweeper::{spawn_sweeper, Sweeper, SweeperState};
