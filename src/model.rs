//! Data model: the runner identity used for locking and aggregation, the
//! inbound update record, the outbound status records, and the sort
//! vocabulary for country listings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};

/// Identity of a runner: name plus country.
///
/// Equality and hashing are structural and case-sensitive; the same name in
/// two countries is two distinct runners. Keys are immutable once constructed
/// and serve as the key of both the aggregation map and the lock registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunnerKey {
    name: String,
    country: String,
}

impl RunnerKey {
    /// Build a key from its two fields, rejecting empty ones.
    ///
    /// Validation lives here so that no invalid key can ever reach the lock
    /// registry or the store.
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(TallyError::MissingName);
        }
        let country = country.into();
        if country.is_empty() {
            return Err(TallyError::MissingCountry);
        }
        Ok(Self { name, country })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

/// An inbound distance update as the transport layer hands it over.
///
/// The distance is optional at this point; `validate` turns the record into a
/// checked `(key, km)` pair or a rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerUpdate {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub km: Option<i64>,
}

impl RunnerUpdate {
    pub fn new(name: impl Into<String>, country: impl Into<String>, km: i64) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            km: Some(km),
        }
    }

    /// Check the update and split it into its key and distance.
    ///
    /// Checks run in a fixed order: name, country, distance presence,
    /// distance sign. The first failing check wins.
    pub fn validate(self) -> Result<(RunnerKey, u64)> {
        let key = RunnerKey::new(self.name, self.country)?;
        let km = self.km.ok_or(TallyError::MissingDistance)?;
        if km < 0 {
            return Err(TallyError::NegativeDistance { km });
        }
        Ok((key, km as u64))
    }
}

/// A runner's current total, as returned by status queries and listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerStatus {
    pub name: String,
    pub country: String,
    pub total_km: u64,
}

/// A country's aggregated total across all of its runners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDistance {
    pub name: String,
    pub total_km: u64,
}

/// Sort criteria for country listings. Defaults to by-distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortCriteria {
    /// Map iteration order; callers must not depend on it.
    None,
    ByName,
    #[default]
    ByDistance,
}

/// Sort direction for country listings. Defaults to descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    Ascending,
    #[default]
    Descending,
}

impl Order {
    /// Apply the direction to a comparator result.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Order::Ascending => ord,
            Order::Descending => ord.reverse(),
        }
    }
}
