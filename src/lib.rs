//! inmemcache - A local in-memory memcache client
//!
//! Provides the memcache client operation set over a concurrent in-process
//! store with TTL expiration and CAS tokens, for tests and single-node setups.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod tasks;

pub use client::{Client, Item, MemcacheClient};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
