//! Error types for the cache client
//!
//! Mirrors the error vocabulary of a network memcache client so callers can
//! branch on the same kinds against the local stand-in.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type returned by every client operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// A conditional write's precondition failed
    #[error("memcache: item not stored")]
    NotStored,

    /// The key was absent or expired
    #[error("memcache: cache miss")]
    CacheMiss,

    /// The compare-and-swap token did not match the stored token
    #[error("memcache: compare-and-swap conflict")]
    CasConflict,

    /// The stored value is not a well-formed counter
    #[error("memcache: cannot increment or decrement non-numeric value: {0}")]
    InvalidValue(String),

    /// The key is empty, too long, or contains illegal characters
    #[error("malformed: key is too long or contains invalid characters: {0:?}")]
    MalformedKey(String),

    /// The operation is not supported by this client
    #[error("memcache: operation not implemented: {0}")]
    NotImplemented(&'static str),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(CacheError::CacheMiss.to_string(), "memcache: cache miss");
        assert_eq!(CacheError::NotStored.to_string(), "memcache: item not stored");
        assert!(CacheError::InvalidValue("abc".to_string())
            .to_string()
            .contains("abc"));
        assert!(CacheError::NotImplemented("gat")
            .to_string()
            .ends_with("gat"));
    }

    #[test]
    fn test_errors_compare_by_kind() {
        assert_eq!(CacheError::CasConflict, CacheError::CasConflict);
        assert_ne!(CacheError::CacheMiss, CacheError::NotStored);
    }
}
