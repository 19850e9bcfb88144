//! # Runtally: Concurrent Distance Aggregation
//!
//! Tracks cumulative distance run by individual runners and by country, and
//! stays exact under many concurrent updates to overlapping and disjoint
//! runners. The concurrency control is a lazily populated registry of one
//! reader/writer lock per runner; the aggregation is a pair of in-memory maps
//! (runner → km, country → km) plus a process-wide update counter.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use runtally::{LockRegistry, RunnerService, RunnerUpdate, TallyStore};
//!
//! #[tokio::main]
//! async fn main() -> runtally::Result<()> {
//!     let service = RunnerService::new(
//!         Arc::new(TallyStore::new()),
//!         Arc::new(LockRegistry::new()),
//!     );
//!
//!     let total = service
//!         .submit_update(RunnerUpdate::new("One", "Australia", 10))
//!         .await?;
//!     assert_eq!(total, 10);
//!
//!     let status = service.runner_status("One", "Australia").await?;
//!     assert_eq!(status.unwrap().total_km, 10);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod error;
pub mod lock_registry;
pub mod model;
pub mod service;
pub mod store;

// Re-exports for convenience
pub use error::{Result, TallyError};
pub use lock_registry::LockRegistry;
pub use model::{CountryDistance, Order, RunnerKey, RunnerStatus, RunnerUpdate, SortCriteria};
pub use service::RunnerService;
pub use store::TallyStore;
