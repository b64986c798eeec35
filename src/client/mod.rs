//! Client Module
//!
//! The memcache-compatible operation surface over the entry store.
//!
//! # Operations
//! - Storage: `add`, `set`, `replace`, `append`, `prepend`, `compare_and_swap`
//! - Retrieval: `get`, `get_multi`
//! - Removal: `delete`, `delete_all`, `flush_all`
//! - Mutation: `touch`, `increment`, `decrement`

use std::collections::HashMap;

mod expiration;
mod item;
mod local;

pub use expiration::{to_ttl, to_ttl_at, RELATIVE_EXPIRATION_LIMIT};
pub use item::{is_legal_key, Item, MAX_KEY_LENGTH};
pub use local::Client;

use crate::error::{CacheError, Result};

// == Memcache Client Trait ==
/// Operation set of a memcache client.
///
/// Code written against this trait can run on [`Client`] or on any
/// network-backed implementation. Operations an implementation does not
/// support return [`CacheError::NotImplemented`].
pub trait MemcacheClient: Send + Sync {
    /// Stores the item only if its key holds no live value.
    fn add(&self, item: &Item) -> Result<()>;

    /// Stores the item only if its CAS token matches the stored one.
    fn compare_and_swap(&self, item: &Item) -> Result<()>;

    /// Subtracts `delta` from a counter, stopping at zero.
    fn decrement(&self, key: &str, delta: u64) -> Result<u64>;

    /// Removes a live key.
    fn delete(&self, key: &str) -> Result<()>;

    /// Removes every key.
    fn delete_all(&self) -> Result<()>;

    /// Clears the whole cache.
    fn flush_all(&self) -> Result<()>;

    /// Fetches a live item.
    fn get(&self, key: &str) -> Result<Item>;

    /// Fetches every live item among `keys`; misses are omitted.
    fn get_multi(&self, keys: &[&str]) -> Result<HashMap<String, Item>>;

    /// Adds `delta` to a counter.
    fn increment(&self, key: &str, delta: u64) -> Result<u64>;

    /// Stores the item only if its key holds a live value.
    fn replace(&self, item: &Item) -> Result<()>;

    /// Stores the item unconditionally.
    fn set(&self, item: &Item) -> Result<()>;

    /// Updates the expiration of a live key.
    fn touch(&self, key: &str, seconds: i32) -> Result<()>;

    /// Appends the item's value to the stored value.
    fn append(&self, _item: &Item) -> Result<()> {
        Err(CacheError::NotImplemented("append"))
    }

    /// Prepends the item's value to the stored value.
    fn prepend(&self, _item: &Item) -> Result<()> {
        Err(CacheError::NotImplemented("prepend"))
    }

    /// Checks that the cache is reachable.
    fn ping(&self) -> Result<()> {
        Err(CacheError::NotImplemented("ping"))
    }
}
