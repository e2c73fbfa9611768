//! Run context - owns the stores for one run
//!
//! Job executors get shallow store handles from the context and write into
//! them concurrently. Once they are done, the filter stage and the reporter
//! read through the same context.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::{Config, ReportConfig};
use crate::diagnostic::{Diagnostic, FilteredDiagnostic};
use crate::error::{LintaggError, Result};
use crate::store::{FilteredResult, FilteredResultStore, JobResult, Level, ResultStore};

/// Per-run owner of the result stores
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    config: Arc<Config>,
    results: ResultStore,
    filtered: FilteredResultStore,
}

impl RunContext {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            results: ResultStore::new(),
            filtered: FilteredResultStore::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle for job executors (shares the underlying map)
    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn filtered(&self) -> &FilteredResultStore {
        &self.filtered
    }

    /// Filter every stored result into the filtered store, same key
    ///
    /// `filter` runs once per job on the blocking pool. Call after all job
    /// executors have finished; results stored meanwhile may be missed.
    /// Returns how many entries were filtered.
    pub async fn apply_filter<F>(&self, filter: F) -> Result<usize>
    where
        F: Fn(&[Diagnostic]) -> Vec<FilteredDiagnostic> + Send + Sync + 'static,
    {
        let filter = Arc::new(filter);

        // Collect first: shard locks must not be held across spawns
        let mut pending = Vec::with_capacity(self.results.len());
        self.results
            .range(|name, result| pending.push((name.to_string(), Arc::clone(result))));

        let mut join_set = JoinSet::new();
        for (name, result) in pending {
            let filter = Arc::clone(&filter);
            let filtered = self.filtered.clone();
            join_set.spawn_blocking(move || {
                let entry = FilteredResult::from_job(&result, |diags| (*filter)(diags));
                debug!(
                    job = %name,
                    diagnostics = result.diagnostics.len(),
                    filtered = entry.filtered_diagnostics.len(),
                    "filtered job result"
                );
                filtered.store(name, entry);
            });
        }

        // Blocking tasks cannot be aborted: drain every one before returning,
        // even after a failure, so the filtered store is settled either way
        let mut count = 0;
        let mut first_err = None;
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok(()) => count += 1,
                Err(e) => {
                    warn!(error = %e, "filter task failed");
                    first_err.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_err {
            return Err(LintaggError::FilterTask {
                reason: e.to_string(),
            });
        }

        info!(jobs = count, "filter stage complete");
        Ok(count)
    }

    /// Classify every stored result, sorted by job name
    pub fn unexpected_failures(&self) -> Vec<LintaggError> {
        let mut failures: Vec<(String, LintaggError)> = Vec::new();
        self.results.range(|name, result| {
            if let Err(e) = result.check_unexpected_failure() {
                failures.push((name.to_string(), e));
            }
        });
        failures.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, err) in &failures {
            warn!(job = %name, error = %err, "unexpected job failure");
        }
        failures.into_iter().map(|(_, e)| e).collect()
    }

    /// Aggregate counts over both stores
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();

        self.results.range(|name, result| {
            summary.add_result(name, result);
        });
        self.filtered.range(|_, filtered| {
            let reported = filtered.reported_count();
            summary.reported += reported;
            if reported > 0 {
                summary.reported_levels.push(filtered.level);
            }
        });

        summary.unexpected_failures.sort();
        summary.reported_levels.sort();
        summary
    }
}

/// Counts a reporter needs to size its output and decide pass/fail
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub jobs: usize,
    pub diagnostics: usize,
    /// Raw diagnostic count per job level
    pub by_level: BTreeMap<Level, usize>,
    /// Filtered diagnostics marked for reporting
    pub reported: usize,
    /// Level of each filtered job that reported something
    #[serde(skip)]
    reported_levels: Vec<Level>,
    /// Jobs that errored with zero findings
    pub unexpected_failures: Vec<String>,
}

impl RunSummary {
    fn add_result(&mut self, name: &str, result: &JobResult) {
        self.jobs += 1;
        self.diagnostics += result.diagnostics.len();
        *self.by_level.entry(result.level).or_insert(0) += result.diagnostics.len();
        if result.check_unexpected_failure().is_err() {
            self.unexpected_failures.push(name.to_string());
        }
    }

    /// Whether the run as a whole should be marked failed
    pub fn is_failure(&self, report: &ReportConfig) -> bool {
        if report.fail_on_unexpected_failure && !self.unexpected_failures.is_empty() {
            return true;
        }
        self.reported_levels
            .iter()
            .any(|&level| level >= report.fail_level)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
