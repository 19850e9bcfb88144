//! In-memory aggregation of distances: one total per runner, one per country,
//! and a process-wide update counter.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::info;

use crate::model::{CountryDistance, Order, RunnerKey, RunnerStatus, SortCriteria};

/// The two aggregation maps and the update counter.
///
/// Constructed empty and shared via `Arc`; there is no global instance. The
/// per-runner map is mutated only while the caller holds that runner's write
/// lock from the registry, which is what makes the two-map update atomic as
/// seen by read-locked status queries for the same runner.
#[derive(Debug, Default)]
pub struct TallyStore {
    runner_km: DashMap<RunnerKey, u64>,
    country_km: DashMap<String, u64>,
    updates: AtomicU64,
}

impl TallyStore {
    /// Create an empty store: no runners, no countries, zero updates.
    pub fn new() -> Self {
        Self {
            runner_km: DashMap::new(),
            country_km: DashMap::new(),
            updates: AtomicU64::new(0),
        }
    }

    /// Apply one distance update to both maps and bump the counter.
    ///
    /// The caller must hold the write lock for `key`. Returns the runner's
    /// new total.
    pub fn record_update(&self, key: &RunnerKey, km: u64) -> u64 {
        let total = {
            let mut entry = self.runner_km.entry(key.clone()).or_insert(0);
            *entry += km;
            *entry
        };

        // Updates for the same country can arrive under different runner
        // locks; the entry guard serializes this read-modify-write so no
        // increment is ever lost.
        *self.country_km.entry(key.country().to_string()).or_insert(0) += km;

        self.updates.fetch_add(1, Ordering::Relaxed);

        info!(
            "Runner \"{}\" in {} ran {} km, for a total of {} km",
            key.name(),
            key.country(),
            km,
            total
        );

        total
    }

    /// Current total for one runner, or `None` if never updated.
    ///
    /// The caller must hold the read lock for `key`. Absence is a normal
    /// result, not an error.
    pub fn runner_total(&self, key: &RunnerKey) -> Option<u64> {
        self.runner_km.get(key).map(|entry| *entry.value())
    }

    /// Snapshot of every runner's current total.
    ///
    /// Iterates without taking per-runner locks: under concurrent updates the
    /// entries may mix generations. Callers that need an exact total for one
    /// runner should use the read-locked status path instead.
    pub fn runner_snapshot(&self) -> Vec<RunnerStatus> {
        self.runner_km
            .iter()
            .map(|entry| RunnerStatus {
                name: entry.key().name().to_string(),
                country: entry.key().country().to_string(),
                total_km: *entry.value(),
            })
            .collect()
    }

    /// Snapshot of every country's total, sorted as requested.
    ///
    /// Same weak-consistency trade-off as `runner_snapshot`. With
    /// `SortCriteria::None` the result keeps map iteration order, which is
    /// unspecified.
    pub fn country_snapshot(&self, criteria: SortCriteria, order: Order) -> Vec<CountryDistance> {
        let mut countries: Vec<CountryDistance> = self
            .country_km
            .iter()
            .map(|entry| CountryDistance {
                name: entry.key().clone(),
                total_km: *entry.value(),
            })
            .collect();

        match criteria {
            SortCriteria::None => {}
            SortCriteria::ByName => countries.sort_by(|a, b| order.apply(a.name.cmp(&b.name))),
            SortCriteria::ByDistance => {
                countries.sort_by(|a, b| order.apply(a.total_km.cmp(&b.total_km)))
            }
        }

        countries
    }

    /// Number of successfully applied updates. Lock-free.
    pub fn updates_count(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Number of distinct runners seen so far.
    pub fn runner_count(&self) -> usize {
        self.runner_km.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runner_km.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(name: &str, country: &str) -> RunnerKey {
        RunnerKey::new(name, country).unwrap()
    }

    #[test]
    fn test_fresh_store_is_empty() {
        let store = TallyStore::new();

        assert_eq!(store.runner_total(&key("One", "Australia")), None);
        assert!(store.is_empty());
        assert_eq!(store.runner_count(), 0);
        assert_eq!(store.updates_count(), 0);
    }

    #[test]
    fn test_first_update_creates_entries() {
        let store = TallyStore::new();

        let total = store.record_update(&key("One", "Australia"), 10);

        assert_eq!(total, 10);
        assert_eq!(store.runner_total(&key("One", "Australia")), Some(10));
        assert_eq!(
            store.country_snapshot(SortCriteria::None, Order::default()),
            vec![CountryDistance {
                name: "Australia".to_string(),
                total_km: 10
            }]
        );
        assert_eq!(store.updates_count(), 1);
    }

    #[test]
    fn test_updates_accumulate_per_runner_and_country() {
        let store = TallyStore::new();
        let one = key("One", "Australia");

        assert_eq!(store.record_update(&one, 10), 10);
        assert_eq!(store.record_update(&one, 20), 30);

        assert_eq!(store.runner_total(&one), Some(30));
        assert_eq!(store.updates_count(), 2);
    }

    #[test]
    fn test_same_name_different_countries_are_distinct_runners() {
        let store = TallyStore::new();

        store.record_update(&key("One", "Australia"), 10);
        store.record_update(&key("One", "The Netherlands"), 20);

        assert_eq!(store.runner_total(&key("One", "Australia")), Some(10));
        assert_eq!(store.runner_total(&key("One", "The Netherlands")), Some(20));
        assert_eq!(store.runner_count(), 2);
    }

    #[test]
    fn test_different_runners_same_country_share_one_country_total() {
        let store = TallyStore::new();

        store.record_update(&key("One", "Australia"), 10);
        store.record_update(&key("Two", "Australia"), 20);

        let countries = store.country_snapshot(SortCriteria::None, Order::default());
        assert_eq!(countries.len(), 1);
        assert_eq!(countries[0].name, "Australia");
        assert_eq!(countries[0].total_km, 30);

        assert_eq!(store.runner_total(&key("One", "Australia")), Some(10));
        assert_eq!(store.runner_total(&key("Two", "Australia")), Some(20));
    }

    #[test]
    fn test_runner_snapshot_lists_every_runner() {
        let store = TallyStore::new();
        store.record_update(&key("One", "Australia"), 10);
        store.record_update(&key("Two", "The Netherlands"), 20);
        store.record_update(&key("Three", "Italy"), 30);

        let mut runners = store.runner_snapshot();
        runners.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(
            runners,
            vec![
                RunnerStatus {
                    name: "One".to_string(),
                    country: "Australia".to_string(),
                    total_km: 10
                },
                RunnerStatus {
                    name: "Three".to_string(),
                    country: "Italy".to_string(),
                    total_km: 30
                },
                RunnerStatus {
                    name: "Two".to_string(),
                    country: "The Netherlands".to_string(),
                    total_km: 20
                },
            ]
        );
    }

    fn store_with_two_countries() -> TallyStore {
        let store = TallyStore::new();
        store.record_update(&key("One", "Australia"), 10);
        store.record_update(&key("Two", "The Netherlands"), 20);
        store.record_update(&key("Three", "The Netherlands"), 30);
        store
    }

    #[test]
    fn test_country_list_by_distance_descending() {
        let countries =
            store_with_two_countries().country_snapshot(SortCriteria::ByDistance, Order::Descending);

        assert_eq!(countries.len(), 2);
        assert_eq!(countries[0].name, "The Netherlands");
        assert_eq!(countries[0].total_km, 50);
        assert_eq!(countries[1].name, "Australia");
        assert_eq!(countries[1].total_km, 10);
    }

    #[test]
    fn test_country_list_by_distance_ascending() {
        let countries =
            store_with_two_countries().country_snapshot(SortCriteria::ByDistance, Order::Ascending);

        assert_eq!(countries[0].name, "Australia");
        assert_eq!(countries[1].name, "The Netherlands");
    }

    #[test]
    fn test_country_list_by_name_both_directions() {
        let store = store_with_two_countries();

        let ascending = store.country_snapshot(SortCriteria::ByName, Order::Ascending);
        assert_eq!(ascending[0].name, "Australia");
        assert_eq!(ascending[1].name, "The Netherlands");

        let descending = store.country_snapshot(SortCriteria::ByName, Order::Descending);
        assert_eq!(descending[0].name, "The Netherlands");
        assert_eq!(descending[1].name, "Australia");
    }

    #[test]
    fn test_country_list_unsorted_has_correct_totals() {
        let countries =
            store_with_two_countries().country_snapshot(SortCriteria::None, Order::Descending);

        assert_eq!(countries.len(), 2);
        for country in countries {
            match country.name.as_str() {
                "Australia" => assert_eq!(country.total_km, 10),
                "The Netherlands" => assert_eq!(country.total_km, 50),
                other => panic!("unexpected country: {other}"),
            }
        }
    }
}
