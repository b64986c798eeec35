//! Cache Store Module
//!
//! Concurrent entry storage with lazy and periodic expiration.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats};

// == Entry Store ==
/// Thread-safe mapping from key to [`CacheEntry`] with expiration.
///
/// Backed by a sharded `DashMap`: readers of different keys never block each
/// other and each key has a single writer at a time. An expired entry that is
/// still resident is invisible to every read; it is reclaimed on the next
/// lookup of its key or by [`EntryStore::sweep_expired`].
///
/// None of the operations fail. Absence is reported through `Option`/`bool`.
pub struct EntryStore<V> {
    /// Key-value storage
    entries: DashMap<String, CacheEntry<V>>,
    /// Source of CAS tokens, shared by all keys
    next_cas: AtomicU64,
    /// Usage counters
    counters: StatsCounters,
}

impl<V: Clone> EntryStore<V> {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_cas: AtomicU64::new(1),
            counters: StatsCounters::default(),
        }
    }

    // == Issue Token ==
    /// Returns a CAS token never handed out before by this store.
    pub fn issue_token(&self) -> u64 {
        self.next_cas.fetch_add(1, Ordering::Relaxed)
    }

    // == Put ==
    /// Inserts or replaces the entry for `key`, resetting any prior deadline.
    ///
    /// Returns the CAS token of the new entry.
    pub fn put(&self, key: String, value: V, ttl: Option<Duration>) -> u64 {
        let cas = self.issue_token();
        let previous = self.entries.insert(key, CacheEntry::new(value, ttl, cas));
        if previous.is_some_and(|entry| entry.is_expired()) {
            self.counters.record_expired(1);
        }
        cas
    }

    // == Put If Absent ==
    /// Atomically inserts the entry only if `key` has no live entry.
    ///
    /// An expired entry counts as absent and is overwritten. Returns the new
    /// CAS token, or None if a live entry was already present.
    pub fn put_if_absent(&self, key: String, value: V, ttl: Option<Duration>) -> Option<u64> {
        match self.entries.entry(key) {
            Entry::Occupied(mut occupied) => {
                if !occupied.get().is_expired() {
                    return None;
                }
                self.counters.record_expired(1);
                let cas = self.issue_token();
                occupied.insert(CacheEntry::new(value, ttl, cas));
                Some(cas)
            }
            Entry::Vacant(vacant) => {
                let cas = self.issue_token();
                vacant.insert(CacheEntry::new(value, ttl, cas));
                Some(cas)
            }
        }
    }

    // == Replace If Present ==
    /// Atomically overwrites the entry only if `key` has a live entry.
    ///
    /// Returns the new CAS token, or None if the key was absent or expired.
    pub fn replace_if_present(&self, key: &str, value: V, ttl: Option<Duration>) -> Option<u64> {
        self.update(key, |entry| {
            let cas = self.issue_token();
            *entry = CacheEntry::new(value, ttl, cas);
            cas
        })
    }

    // == Update ==
    /// Runs `f` on the live entry for `key` while holding its write lock.
    ///
    /// Returns None without calling `f` if the key is absent or expired.
    /// `f` is responsible for issuing a new token if it rewrites the value.
    pub fn update<R>(&self, key: &str, f: impl FnOnce(&mut CacheEntry<V>) -> R) -> Option<R> {
        let mut entry = self.entries.get_mut(key)?;
        if entry.is_expired() {
            drop(entry);
            self.reclaim(key);
            return None;
        }
        Some(f(entry.value_mut()))
    }

    // == Get ==
    /// Retrieves a copy of the live entry for `key`.
    ///
    /// Returns None if the key is absent or expired. Expired entries are
    /// removed and counted as misses.
    pub fn get(&self, key: &str) -> Option<CacheEntry<V>> {
        let Some(entry) = self.entries.get(key) else {
            self.counters.record_miss();
            return None;
        };

        if entry.is_expired() {
            // Drop the read guard before taking the shard write lock
            drop(entry);
            self.reclaim(key);
            self.counters.record_miss();
            return None;
        }

        self.counters.record_hit();
        Some(entry.value().clone())
    }

    // == Delete ==
    /// Removes the entry for `key` regardless of expiration.
    ///
    /// Returns true if an entry was resident.
    pub fn delete(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Delete Live ==
    /// Removes the entry for `key` only if it is live.
    ///
    /// An expired entry is reclaimed and reported as absent.
    pub fn delete_live(&self, key: &str) -> bool {
        if self.entries.remove_if(key, |_, entry| !entry.is_expired()).is_some() {
            return true;
        }
        self.reclaim(key);
        false
    }

    // == List ==
    /// Returns a snapshot of all live entries in unspecified order.
    pub fn list(&self) -> Vec<(String, CacheEntry<V>)> {
        self.entries
            .iter()
            .filter(|entry| !entry.value().is_expired())
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    // == Clear ==
    /// Removes all entries unconditionally.
    pub fn clear(&self) {
        self.entries.clear();
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&self) -> usize {
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            if entry.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        self.counters.record_expired(removed);
        removed
    }

    // == Stats ==
    /// Returns current usage statistics.
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.entries.len())
    }

    // == Length ==
    /// Returns the number of resident entries, including expired ones not yet reclaimed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if no entries are resident.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the entry for `key` if it is still expired.
    fn reclaim(&self, key: &str) {
        if self.entries.remove_if(key, |_, entry| entry.is_expired()).is_some() {
            self.counters.record_expired(1);
        }
    }
}

impl<V: Clone> Default for EntryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for EntryStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryStore")
            .field("entries", &self.entries.len())
            .field("next_cas", &self.next_cas.load(Ordering::Relaxed))
            .finish()
    }
}
