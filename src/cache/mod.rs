//! Cache Module
//!
//! Provides the concurrent in-memory entry store with time-based expiration.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::EntryStore;
