//! Per-runner reader/writer locks, created lazily on first access.
//!
//! The registry hands out scoped guards: many concurrent readers or one
//! exclusive writer per key. Entries are never evicted; the key space is
//! bounded by the real-world runner population, not by request volume.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

use crate::model::RunnerKey;

/// Lazily populated map of one `RwLock` per runner.
///
/// Concurrent first access for the same key publishes exactly one lock
/// instance; the dashmap entry insert is linearizable, so racing creators all
/// end up sharing the winner.
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: DashMap<RunnerKey, Arc<RwLock<()>>>,
}

impl LockRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            locks: DashMap::new(),
        }
    }

    /// Acquire the exclusive write lock for `key`.
    ///
    /// Suspends until no other reader or writer holds the key. The returned
    /// guard releases on drop, on every exit path.
    pub async fn acquire_write(&self, key: &RunnerKey) -> OwnedRwLockWriteGuard<()> {
        self.lock_for(key).write_owned().await
    }

    /// Acquire a shared read lock for `key`.
    ///
    /// Suspends until no writer holds the key; readers share freely.
    pub async fn acquire_read(&self, key: &RunnerKey) -> OwnedRwLockReadGuard<()> {
        self.lock_for(key).read_owned().await
    }

    // The Arc is cloned out of the map before the caller awaits, so a blocked
    // acquirer never holds a map shard.
    fn lock_for(&self, key: &RunnerKey) -> Arc<RwLock<()>> {
        self.locks.entry(key.clone()).or_default().clone()
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
