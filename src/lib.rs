//! lintagg - concurrent result aggregation for parallel linter jobs
//!
//! Each linter job stores one [`JobResult`] under its name in a shared
//! [`ResultStore`]; a filter stage derives a [`FilteredResultStore`] with the
//! same keys; the reporter enumerates both and classifies jobs that errored
//! without producing any findings.

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod logging;
pub mod remote;
pub mod run;
pub mod store;

pub use config::Config;
pub use diagnostic::{Diagnostic, FilteredDiagnostic, Severity};
pub use error::{FixSuggestion, LintaggError, Result};
pub use remote::{CheckClient, CheckRequest, CheckResponse, Checker, DirectClient};
pub use run::{RunContext, RunSummary};
pub use store::{
    CommandError, FilteredResult, FilteredResultStore, JobResult, KeyedStore, Level, ResultStore,
};
