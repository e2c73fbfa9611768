//! Request/response DTOs for the remote check
//!
//! The schema belongs to the external checker; these mirror it so results can
//! be handed over without another conversion layer.

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, FilteredDiagnostic};
use crate::store::Level;

/// Which diagnostics the checker should report relative to the diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterMode {
    /// Only lines added or modified in the diff
    #[default]
    Added,
    /// Lines inside diff hunks, context included
    DiffContext,
    /// Any line of a file touched by the diff
    File,
    NoFilter,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CheckRequest {
    /// Check name, usually the job name
    pub name: String,
    pub owner: String,
    pub repo: String,
    #[serde(default)]
    pub pull_request: u64,
    pub sha: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default)]
    pub annotations: Vec<Diagnostic>,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub filter_mode: FilterMode,
    /// Report diagnostics outside the diff as well (as a summary)
    #[serde(default)]
    pub outside_diff: bool,
}

impl CheckRequest {
    /// `owner/repo`
    pub fn repo_slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CheckResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_url: Option<String>,
    /// e.g. `success`, `failure`, `neutral`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_run_id: Option<i64>,
    /// Annotations the checker decided to report after its own filtering
    #[serde(default)]
    pub reported_annotations: Vec<FilteredDiagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn filter_mode_kebab_case() {
        let json = serde_json::to_string(&FilterMode::DiffContext).unwrap();
        assert_eq!(json, "\"diff-context\"");
        let parsed: FilterMode = serde_json::from_str("\"no-filter\"").unwrap();
        assert_eq!(parsed, FilterMode::NoFilter);
    }

    #[test]
    fn request_minimal_json() {
        let req: CheckRequest = serde_json::from_str(
            r#"{"name":"golint","owner":"acme","repo":"widgets","sha":"abc"}"#,
        )
        .unwrap();

        assert_eq!(req.repo_slug(), "acme/widgets");
        assert_eq!(req.level, Level::Error);
        assert_eq!(req.filter_mode, FilterMode::Added);
        assert!(req.annotations.is_empty());
    }

    #[test]
    fn response_omits_empty_optionals() {
        let json = serde_json::to_string(&CheckResponse::default()).unwrap();
        assert_eq!(json, r#"{"reported_annotations":[]}"#);
    }
}
