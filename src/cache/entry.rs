//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with deadline and CAS support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// Represents a single cache entry with its value and metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Absolute deadline, None = no expiration
    pub expires_at: Option<Instant>,
    /// Token identifying this stored version of the value
    pub cas: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Optional time-to-live, None never expires
    /// * `cas` - Token assigned by the store for this write
    pub fn new(value: V, ttl: Option<Duration>, cas: u64) -> Self {
        Self {
            value,
            expires_at: deadline_after(ttl),
            cas,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its deadline, so a zero TTL is expired on the very next check.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    // == Set TTL ==
    /// Replaces the deadline with one `ttl` from now.
    pub fn set_ttl(&mut self, ttl: Option<Duration>) {
        self.expires_at = deadline_after(ttl);
    }

    // == Time To Live ==
    /// Returns remaining time to live, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has a deadline in the future
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }
}

// == Utility Functions ==
/// Converts a TTL into an absolute deadline.
///
/// A TTL too large to represent as an `Instant` is treated as no expiration.
fn deadline_after(ttl: Option<Duration>) -> Option<Instant> {
    ttl.and_then(|ttl| Instant::now().checked_add(ttl))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new("test_value", None, 1);

        assert_eq!(entry.value, "test_value");
        assert_eq!(entry.cas, 1);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("test_value", Some(Duration::from_secs(60)), 1);

        assert!(entry.expires_at.is_some());
        assert!(!entry.is_expired());
    }

    #[test]
    fn test_entry_expiration() {
        let entry = CacheEntry::new("test_value", Some(Duration::from_secs(1)), 1);

        assert!(!entry.is_expired());

        sleep(Duration::from_millis(1100));

        assert!(entry.is_expired());
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new("test_value", Some(Duration::ZERO), 1);
        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn test_set_ttl_resets_deadline() {
        let mut entry = CacheEntry::new("test_value", Some(Duration::ZERO), 1);
        assert!(entry.is_expired());

        entry.set_ttl(Some(Duration::from_secs(60)));
        assert!(!entry.is_expired());

        entry.set_ttl(None);
        assert!(entry.ttl_remaining().is_none());
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("test_value", Some(Duration::from_secs(10)), 1);

        let remaining = entry.ttl_remaining().unwrap();
        assert!(remaining <= Duration::from_secs(10));
        assert!(remaining >= Duration::from_secs(9));
    }

    #[test]
    fn test_unrepresentable_ttl_never_expires() {
        let entry = CacheEntry::new("test_value", Some(Duration::MAX), 1);
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired());
    }
}
