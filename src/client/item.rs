//! Cache Item Module
//!
//! The caller-facing unit of storage and the key legality rules.

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 250;

// == Item ==
/// An item to be stored in or retrieved from the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// The cache key
    pub key: String,
    /// Opaque value bytes
    pub value: Vec<u8>,
    /// Opaque flags, stored and returned verbatim
    #[serde(default)]
    pub flags: u32,
    /// Expiration in the protocol convention, 0 means never
    #[serde(default)]
    pub expiration: i32,
    /// CAS token, filled in on reads and checked by compare-and-swap
    #[serde(default)]
    pub cas: u64,
}

impl Item {
    /// Creates an item with no flags and no expiration.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            ..Self::default()
        }
    }

    /// Sets the opaque flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    /// Sets the expiration field.
    pub fn with_expiration(mut self, expiration: i32) -> Self {
        self.expiration = expiration;
        self
    }
}

// == Key Validation ==
/// Checks that a key is 1 to 250 bytes with no whitespace or control bytes.
pub fn is_legal_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LENGTH
        && key.bytes().all(|b| b > b' ' && b != 0x7f)
}

/// Returns `MalformedKey` for keys rejected by [`is_legal_key`].
pub(crate) fn check_key(key: &str) -> Result<()> {
    if is_legal_key(key) {
        Ok(())
    } else {
        Err(CacheError::MalformedKey(key.to_string()))
    }
}
