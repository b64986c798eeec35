//! Expiration Normalization
//!
//! Translates the protocol's expiration field into a time-to-live.

use std::time::Duration;

use chrono::Utc;

/// Largest expiration value read as relative seconds (30 days).
///
/// Values above it are absolute Unix timestamps in seconds.
pub const RELATIVE_EXPIRATION_LIMIT: i32 = 60 * 60 * 24 * 30;

/// Converts an expiration field into a TTL measured from now.
///
/// # Returns
/// - `None` for 0 (never expires)
/// - `Some(e seconds)` for `0 < e <= RELATIVE_EXPIRATION_LIMIT`
/// - `Some(max(0, e - now))` for absolute timestamps
/// - `Some(Duration::ZERO)` for negative values, which are already expired
pub fn to_ttl(expiration: i32) -> Option<Duration> {
    to_ttl_at(expiration, Utc::now().timestamp())
}

/// Same as [`to_ttl`] with an explicit current Unix time in seconds.
pub fn to_ttl_at(expiration: i32, now_unix: i64) -> Option<Duration> {
    match expiration {
        0 => None,
        e if e < 0 => Some(Duration::ZERO),
        e if e <= RELATIVE_EXPIRATION_LIMIT => Some(Duration::from_secs(e as u64)),
        e => {
            let remaining = i64::from(e) - now_unix;
            Some(Duration::from_secs(remaining.max(0) as u64))
        }
    }
}
