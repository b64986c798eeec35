//! Local Client
//!
//! In-process implementation of [`MemcacheClient`] backed by an [`EntryStore`].

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, EntryStore};
use crate::client::expiration::to_ttl;
use crate::client::item::{check_key, Item};
use crate::client::MemcacheClient;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::tasks::spawn_sweep_task;

// == Client ==
/// Local in-memory stand-in for a memcache client.
///
/// Clones share the same store, so a `Client` can be handed to any number of
/// threads or tasks.
#[derive(Debug, Clone, Default)]
pub struct Client {
    store: Arc<EntryStore<Item>>,
}

impl Client {
    // == Constructor ==
    /// Creates a client over an empty store with no background sweep.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a client and starts the background sweep described by `config`.
    ///
    /// The sweep only starts when the interval is non-zero and a Tokio runtime
    /// is available; expired entries are still reclaimed lazily without it.
    pub fn from_config(config: &Config) -> (Self, Option<JoinHandle<()>>) {
        let client = Self::new();
        let sweeper = client.spawn_sweeper(config.sweep_interval);
        debug!(
            "Client created: sweep_interval={}s, sweeper_running={}",
            config.sweep_interval,
            sweeper.is_some()
        );
        (client, sweeper)
    }

    /// Starts a background sweep of this client's store.
    ///
    /// Returns None if `interval_secs` is zero or no Tokio runtime is running.
    pub fn spawn_sweeper(&self, interval_secs: u64) -> Option<JoinHandle<()>> {
        if interval_secs == 0 || tokio::runtime::Handle::try_current().is_err() {
            return None;
        }
        Some(spawn_sweep_task(Arc::clone(&self.store), interval_secs))
    }

    /// Returns the underlying entry store.
    pub fn store(&self) -> Arc<EntryStore<Item>> {
        Arc::clone(&self.store)
    }

    /// Returns current usage statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Applies `f` to the counter stored under `key`.
    fn apply_delta(&self, key: &str, f: impl FnOnce(u64) -> u64) -> Result<u64> {
        let outcome = self.store.update(key, |entry| -> Result<u64> {
            let current = parse_counter(&entry.value.value)?;
            let next = f(current);
            entry.value.value = next.to_string().into_bytes();
            entry.cas = self.store.issue_token();
            Ok(next)
        });
        outcome.unwrap_or(Err(CacheError::CacheMiss))
    }

    /// Joins `item`'s value onto the live value, after it or before it.
    fn concat(&self, item: &Item, after: bool) -> Result<()> {
        check_key(&item.key)?;
        self.store
            .update(&item.key, |entry| {
                let stored = &mut entry.value.value;
                if after {
                    stored.extend_from_slice(&item.value);
                } else {
                    stored.splice(0..0, item.value.iter().copied());
                }
                entry.cas = self.store.issue_token();
            })
            .ok_or(CacheError::NotStored)
    }
}

impl MemcacheClient for Client {
    fn add(&self, item: &Item) -> Result<()> {
        check_key(&item.key)?;
        self.store
            .put_if_absent(item.key.clone(), item.clone(), to_ttl(item.expiration))
            .map(|_| ())
            .ok_or(CacheError::NotStored)
    }

    fn compare_and_swap(&self, item: &Item) -> Result<()> {
        check_key(&item.key)?;
        let ttl = to_ttl(item.expiration);
        let outcome = self.store.update(&item.key, |entry| -> Result<()> {
            if entry.cas != item.cas {
                return Err(CacheError::CasConflict);
            }
            entry.value = item.clone();
            entry.set_ttl(ttl);
            entry.cas = self.store.issue_token();
            Ok(())
        });
        outcome.unwrap_or(Err(CacheError::CacheMiss))
    }

    fn decrement(&self, key: &str, delta: u64) -> Result<u64> {
        self.apply_delta(key, |current| current.saturating_sub(delta))
    }

    fn delete(&self, key: &str) -> Result<()> {
        if self.store.delete_live(key) {
            Ok(())
        } else {
            Err(CacheError::CacheMiss)
        }
    }

    fn delete_all(&self) -> Result<()> {
        for (key, _) in self.store.list() {
            self.store.delete(&key);
        }
        Ok(())
    }

    fn flush_all(&self) -> Result<()> {
        self.store.clear();
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Item> {
        self.store
            .get(key)
            .map(into_item)
            .ok_or(CacheError::CacheMiss)
    }

    fn get_multi(&self, keys: &[&str]) -> Result<HashMap<String, Item>> {
        Ok(keys
            .iter()
            .filter_map(|key| self.store.get(key).map(into_item))
            .map(|item| (item.key.clone(), item))
            .collect())
    }

    fn increment(&self, key: &str, delta: u64) -> Result<u64> {
        self.apply_delta(key, |current| current.wrapping_add(delta))
    }

    fn replace(&self, item: &Item) -> Result<()> {
        check_key(&item.key)?;
        self.store
            .replace_if_present(&item.key, item.clone(), to_ttl(item.expiration))
            .map(|_| ())
            .ok_or(CacheError::NotStored)
    }

    fn set(&self, item: &Item) -> Result<()> {
        check_key(&item.key)?;
        self.store
            .put(item.key.clone(), item.clone(), to_ttl(item.expiration));
        Ok(())
    }

    /// Keeps the stored CAS token: only the deadline and expiration field change.
    fn touch(&self, key: &str, seconds: i32) -> Result<()> {
        let ttl = to_ttl(seconds);
        self.store
            .update(key, |entry| {
                entry.value.expiration = seconds;
                entry.set_ttl(ttl);
            })
            .ok_or(CacheError::CacheMiss)
    }

    fn append(&self, item: &Item) -> Result<()> {
        self.concat(item, true)
    }

    fn prepend(&self, item: &Item) -> Result<()> {
        self.concat(item, false)
    }

    fn ping(&self) -> Result<()> {
        Ok(())
    }
}

// == Utility Functions ==
/// Returns the stored item carrying the entry's current CAS token.
fn into_item(entry: CacheEntry<Item>) -> Item {
    let mut item = entry.value;
    item.cas = entry.cas;
    item
}

/// Parses a stored value as a base-10 unsigned counter.
///
/// Surrounding ASCII whitespace is ignored; anything else but digits is rejected.
fn parse_counter(value: &[u8]) -> Result<u64> {
    let invalid = || CacheError::InvalidValue(String::from_utf8_lossy(value).into_owned());
    let text = std::str::from_utf8(value)
        .map_err(|_| invalid())?
        .trim_matches(|c: char| c.is_ascii_whitespace());
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse().map_err(|_| invalid())
}
