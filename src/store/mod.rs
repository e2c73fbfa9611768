//! Store Module - per-run result aggregation
//!
//! Thread-safe storage for linter job results.
//! Uses DashMap for lock-free concurrent access.
//!
//! Key types:
//! - `KeyedStore<V>`: concurrent job-name → value map, shared by both stores
//! - `ResultStore`: raw `JobResult` per job, written by job executors
//! - `FilteredResultStore`: `FilteredResult` per job, written by the filter stage
//! - `JobResult`: diagnostics plus optional command error, with failure classification

mod filtered;
mod keyed;
mod result;

// Re-export all public types
pub use filtered::{FilteredResult, FilteredResultStore};
pub use keyed::KeyedStore;
pub use result::{CommandError, JobResult, Level, ResultStore};
