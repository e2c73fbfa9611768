//! Diagnostic value types
//!
//! Produced by upstream linter parsers and the diff filter. The stores treat
//! them as opaque, comparable values and never inspect or mutate them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Severity reported by the linter itself (independent of the job level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Unknown,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line, 0 when unknown
    pub line: u32,
    /// 1-based column, 0 when unknown
    #[serde(default)]
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(default)]
    pub range: Range,
}

/// Tool that emitted the diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Rule code (e.g. `SA4006`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Code {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub range: Range,
    pub text: String,
}

/// One lint finding
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub location: Location,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<Code>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    /// Raw linter output this diagnostic was parsed from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub original_output: String,
}

impl Diagnostic {
    pub fn new(path: impl Into<String>, line: u32, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Location {
                path: path.into(),
                range: Range {
                    start: Position { line, column: 0 },
                    end: None,
                },
            },
            ..Default::default()
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_source(mut self, name: impl Into<String>) -> Self {
        self.source = Some(Source {
            name: name.into(),
            url: None,
        });
        self
    }

    pub fn with_code(mut self, value: impl Into<String>) -> Self {
        self.code = Some(Code {
            value: value.into(),
            url: None,
        });
        self
    }

    pub fn path(&self) -> &str {
        &self.location.path
    }

    pub fn line(&self) -> u32 {
        self.location.range.start.line
    }
}

/// A diagnostic annotated by the diff filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilteredDiagnostic {
    pub diagnostic: Diagnostic,
    /// Whether the reporter should surface this diagnostic
    pub should_report: bool,
    /// The file appears in the diff
    pub in_diff_file: bool,
    /// The line falls inside a diff hunk's context
    pub in_diff_context: bool,
    /// Source lines around the diagnostic, keyed by line number
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub source_lines: BTreeMap<u32, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_line: Option<u32>,
}

impl FilteredDiagnostic {
    /// Diagnostic inside the diff, to be reported
    pub fn reported(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostic,
            should_report: true,
            in_diff_file: true,
            in_diff_context: true,
            ..Default::default()
        }
    }

    /// Diagnostic outside the diff, kept for completeness but not reported
    pub fn outside_diff(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostic,
            ..Default::default()
        }
    }
}
