//! Post-filter job results

use super::{JobResult, KeyedStore, Level};
use crate::diagnostic::{Diagnostic, FilteredDiagnostic};

/// Job name → filtered result, written by the filter stage
pub type FilteredResultStore = KeyedStore<FilteredResult>;

/// Diagnostics of one job after diff filtering
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilteredResult {
    /// Mirrors the source `JobResult` level
    pub level: Level,
    pub filtered_diagnostics: Vec<FilteredDiagnostic>,
}

impl FilteredResult {
    pub fn new(level: Level, filtered_diagnostics: Vec<FilteredDiagnostic>) -> Self {
        Self {
            level,
            filtered_diagnostics,
        }
    }

    /// Run `filter` over a raw result's diagnostics, keeping its level
    pub fn from_job<F>(result: &JobResult, filter: F) -> Self
    where
        F: FnOnce(&[Diagnostic]) -> Vec<FilteredDiagnostic>,
    {
        Self::new(result.level, filter(&result.diagnostics))
    }

    /// Diagnostics the reporter should surface
    pub fn reported(&self) -> impl Iterator<Item = &FilteredDiagnostic> {
        self.filtered_diagnostics.iter().filter(|d| d.should_report)
    }

    pub fn reported_count(&self) -> usize {
        self.reported().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_job_mirrors_level_and_order() {
        let job = JobResult::new("golint", Level::Warning).with_diagnostics(vec![
            Diagnostic::new("a.go", 1, "first"),
            Diagnostic::new("b.go", 2, "second"),
        ]);

        let filtered = FilteredResult::from_job(&job, |diags| {
            diags.iter().cloned().map(FilteredDiagnostic::reported).collect()
        });

        assert_eq!(filtered.level, Level::Warning);
        let messages: Vec<_> = filtered
            .filtered_diagnostics
            .iter()
            .map(|d| d.diagnostic.message.as_str())
            .collect();
        assert_eq!(messages, vec!["first", "second"]);
    }

    #[test]
    fn reported_skips_outside_diff() {
        let d = Diagnostic::new("a.go", 1, "x");
        let filtered = FilteredResult::new(
            Level::Error,
            vec![
                FilteredDiagnostic::reported(d.clone()),
                FilteredDiagnostic::outside_diff(d.clone()),
                FilteredDiagnostic::reported(d),
            ],
        );

        assert_eq!(filtered.reported_count(), 2);
    }

    #[test]
    fn filter_may_expand() {
        let job = JobResult::new("vet", Level::Error)
            .with_diagnostics(vec![Diagnostic::new("a.go", 1, "x")]);

        let filtered = FilteredResult::from_job(&job, |diags| {
            diags
                .iter()
                .flat_map(|d| {
                    [
                        FilteredDiagnostic::reported(d.clone()),
                        FilteredDiagnostic::outside_diff(d.clone()),
                    ]
                })
                .collect()
        });

        assert_eq!(filtered.filtered_diagnostics.len(), 2);
        assert_eq!(filtered.reported_count(), 1);
    }
}
