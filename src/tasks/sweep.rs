//! Expiration Sweep Task
//!
//! Background task that periodically removes expired entries from a store.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::EntryStore;

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task sleeps for the specified interval between sweeps. Each sweep only
/// holds one map shard lock at a time, so callers keep reading and writing
/// other keys while it runs. The task keeps only a weak reference and exits
/// once every other owner of the store has dropped it.
///
/// # Arguments
/// * `store` - Shared reference to the entry store
/// * `sweep_interval_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during shutdown.
///
/// # Example
/// ```ignore
/// let client = Client::new();
/// let sweep_handle = spawn_sweep_task(client.store(), 60);
/// // Later, during shutdown:
/// sweep_handle.abort();
/// ```
pub fn spawn_sweep_task<V>(store: Arc<EntryStore<V>>, sweep_interval_secs: u64) -> JoinHandle<()>
where
    V: Clone + Send + Sync + 'static,
{
    let interval = Duration::from_secs(sweep_interval_secs);
    let store: Weak<EntryStore<V>> = Arc::downgrade(&store);

    tokio::spawn(async move {
        info!(
            "Starting expiration sweep task with interval of {} seconds",
            sweep_interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            let Some(live) = store.upgrade() else {
                debug!("Expiration sweep: store dropped, stopping");
                break;
            };
            let removed = live.sweep_expired();
            drop(live);

            if removed > 0 {
                info!("Expiration sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiration sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("inmemcache=debug")
            .with_test_writer()
            .try_init();
    }

    #[tokio::test]
    async fn test_sweep_task_removes_expired_entries() {
        init_tracing();
        let store = Arc::new(EntryStore::new());

        store.put(
            "expire_soon".to_string(),
            "value".to_string(),
            Some(Duration::from_secs(1)),
        );

        let handle = spawn_sweep_task(Arc::clone(&store), 1);

        // Wait for entry to expire and the sweep to run
        tokio::time::sleep(Duration::from_millis(2500)).await;

        // Physically gone, not just hidden
        assert_eq!(store.len(), 0, "Expired entry should have been swept");
        assert_eq!(store.stats().expired, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_preserves_valid_entries() {
        init_tracing();
        let store = Arc::new(EntryStore::new());

        store.put(
            "long_lived".to_string(),
            "value".to_string(),
            Some(Duration::from_secs(3600)),
        );
        store.put("forever".to_string(), "value".to_string(), None);

        let handle = spawn_sweep_task(Arc::clone(&store), 1);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("long_lived").unwrap().value, "value");

        handle.abort();
    }

    #[tokio::test]
    async fn test_sweep_task_stops_when_store_dropped() {
        let store: Arc<EntryStore<String>> = Arc::new(EntryStore::new());

        let handle = spawn_sweep_task(Arc::clone(&store), 1);
        drop(store);

        // The next wake-up finds nothing to upgrade
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(handle.is_finished(), "Task should exit once the store is gone");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_sweep_racing_reads_sees_whole_entries() {
        let store = Arc::new(EntryStore::new());
        for i in 0..200 {
            let ttl = if i % 2 == 0 { Some(Duration::from_millis(900)) } else { None };
            store.put(format!("key{}", i), format!("value{}", i), ttl);
        }

        let handle = spawn_sweep_task(Arc::clone(&store), 1);

        // Readers run across the expiry and the first sweep
        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let started = std::time::Instant::now();
                    while started.elapsed() < Duration::from_millis(1500) {
                        for i in 0..200 {
                            match store.get(&format!("key{}", i)) {
                                Some(entry) => assert_eq!(entry.value, format!("value{}", i)),
                                None => assert_eq!(i % 2, 0, "live key{} went missing", i),
                            }
                        }
                    }
                })
            })
            .collect();
        for reader in readers {
            reader.join().unwrap();
        }

        assert_eq!(store.len(), 100);
        for i in (0..200).step_by(2) {
            assert!(store.get(&format!("key{}", i)).is_none());
        }

        handle.abort();
    }
}
