//! The update/query orchestrator: validate, acquire the right lock, touch the
//! store, release by guard drop, respond.

use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::lock_registry::LockRegistry;
use crate::model::{CountryDistance, Order, RunnerKey, RunnerStatus, RunnerUpdate, SortCriteria};
use crate::store::TallyStore;

/// Orchestrates updates and queries over a shared store and lock registry.
///
/// Both collaborators are injected; the service owns neither. Every request
/// follows validate → acquire → mutate/read → release, where release is the
/// guard going out of scope on every exit path, including cancellation.
/// A request that fails validation is rejected before any lock is touched.
#[derive(Debug, Clone)]
pub struct RunnerService {
    store: Arc<TallyStore>,
    locks: Arc<LockRegistry>,
}

impl RunnerService {
    pub fn new(store: Arc<TallyStore>, locks: Arc<LockRegistry>) -> Self {
        Self { store, locks }
    }

    /// Apply one distance update, returning the runner's new total.
    ///
    /// Applied at most once; there are no retries at this layer. Rejected
    /// updates leave no trace: no lock acquired, no counter bumped.
    pub async fn submit_update(&self, update: RunnerUpdate) -> Result<u64> {
        let (key, km) = update.validate()?;

        let _guard = self.locks.acquire_write(&key).await;
        Ok(self.store.record_update(&key, km))
    }

    /// Current status of one runner, or `Ok(None)` for a runner never seen.
    pub async fn runner_status(&self, name: &str, country: &str) -> Result<Option<RunnerStatus>> {
        info!("Requested status of runner \"{}\" in {}", name, country);

        let key = RunnerKey::new(name, country)?;

        let _guard = self.locks.acquire_read(&key).await;
        Ok(self.store.runner_total(&key).map(|total_km| RunnerStatus {
            name: key.name().to_string(),
            country: key.country().to_string(),
            total_km,
        }))
    }

    /// Snapshot of all runners. Bypasses the lock registry; see
    /// [`TallyStore::runner_snapshot`] for the consistency trade-off.
    pub fn list_runners(&self) -> Vec<RunnerStatus> {
        self.store.runner_snapshot()
    }

    /// Sorted snapshot of all country totals. Bypasses the lock registry.
    pub fn list_countries(&self, criteria: SortCriteria, order: Order) -> Vec<CountryDistance> {
        self.store.country_snapshot(criteria, order)
    }

    /// Number of successfully applied updates, readable without blocking.
    pub fn updates_count(&self) -> u64 {
        self.store.updates_count()
    }
}
