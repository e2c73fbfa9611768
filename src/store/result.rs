//! Raw job results and the unexpected-failure rule

use std::fmt;
use std::io;
use std::process::ExitStatus;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::KeyedStore;
use crate::diagnostic::Diagnostic;
use crate::error::{LintaggError, Result};

/// Job name → raw result, written once per job by its executor
pub type ResultStore = KeyedStore<JobResult>;

/// Reporting level of a job
///
/// Ordered by severity, so `level >= Level::Warning` reads naturally.
/// Parsing (`FromStr` and serde alike) trims and ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
    #[default]
    Error,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LintaggError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "warning" => Ok(Level::Warning),
            "error" => Ok(Level::Error),
            _ => Err(LintaggError::InvalidLevel {
                level: s.to_string(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Abnormal termination of a linter command
///
/// Many linters exit non-zero precisely because they found something, so
/// this alone says nothing about whether the job failed.
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    #[error("exit status {0}")]
    ExitStatus(i32),

    #[error("terminated by signal")]
    Terminated,

    #[error("failed to run command: {0}")]
    Spawn(#[source] Arc<io::Error>),

    #[error("{0}")]
    Other(String),
}

impl CommandError {
    /// `None` for a successful exit
    pub fn from_exit_status(status: ExitStatus) -> Option<Self> {
        if status.success() {
            return None;
        }
        Some(match status.code() {
            Some(code) => CommandError::ExitStatus(code),
            None => CommandError::Terminated,
        })
    }
}

impl From<io::Error> for CommandError {
    fn from(err: io::Error) -> Self {
        CommandError::Spawn(Arc::new(err))
    }
}

impl PartialEq for CommandError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ExitStatus(a), Self::ExitStatus(b)) => a == b,
            (Self::Terminated, Self::Terminated) => true,
            (Self::Spawn(a), Self::Spawn(b)) => {
                Arc::ptr_eq(a, b) || (a.kind() == b.kind() && a.to_string() == b.to_string())
            }
            (Self::Other(a), Self::Other(b)) => a == b,
            _ => false,
        }
    }
}

/// Output of one linter job
#[derive(Debug, Clone, PartialEq)]
pub struct JobResult {
    /// Producing job; unique within a run
    pub name: String,
    pub level: Level,
    /// In the order the parser produced them
    pub diagnostics: Vec<Diagnostic>,
    /// Optional. `Some` does not mean failure and diagnostics may still be present.
    pub cmd_err: Option<CommandError>,
}

impl JobResult {
    pub fn new(name: impl Into<String>, level: Level) -> Self {
        Self {
            name: name.into(),
            level,
            diagnostics: Vec::new(),
            cmd_err: None,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_cmd_err(mut self, err: impl Into<CommandError>) -> Self {
        self.cmd_err = Some(err.into());
        self
    }

    /// Flag the job as an unexpected failure
    ///
    /// Only a command error with zero diagnostics counts: either the command
    /// itself broke or its output could not be parsed. A command error with
    /// diagnostics is the usual "found issues" exit and passes.
    pub fn check_unexpected_failure(&self) -> Result<()> {
        match &self.cmd_err {
            Some(err) if self.diagnostics.is_empty() => Err(LintaggError::UnexpectedFailure {
                name: self.name.clone(),
                source: err.clone(),
            }),
            _ => Ok(()),
        }
    }
}
