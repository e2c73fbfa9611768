//! Error types with fix suggestions

use thiserror::Error;

use crate::store::CommandError;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

pub type Result<T, E = LintaggError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum LintaggError {
    // ─────────────────────────────────────────────────────────────
    // Store errors (LAG-010 to LAG-019)
    // ─────────────────────────────────────────────────────────────
    #[error("LAG-010: fail to get the value of key '{key}' from results")]
    KeyNotFound { key: String },

    // ─────────────────────────────────────────────────────────────
    // Classification errors (LAG-020 to LAG-039)
    // ─────────────────────────────────────────────────────────────
    #[error(
        "LAG-020: {name} failed with zero findings: the command itself failed ({source}) \
         or its output could not be parsed"
    )]
    UnexpectedFailure {
        name: String,
        #[source]
        source: CommandError,
    },

    #[error("LAG-030: Unknown level '{level}' (expected info, warning or error)")]
    InvalidLevel { level: String },

    // ─────────────────────────────────────────────────────────────
    // Remote check errors (LAG-040 to LAG-049)
    // ─────────────────────────────────────────────────────────────
    #[error("LAG-040: Check cancelled")]
    Cancelled,

    #[error("LAG-041: Check timed out after {timeout_ms}ms")]
    TimedOut { timeout_ms: u64 },

    /// Error returned by the delegate checker, passed through unchanged
    #[error(transparent)]
    Delegate(#[from] anyhow::Error),

    // ─────────────────────────────────────────────────────────────
    // Configuration errors (LAG-050 to LAG-059)
    // ─────────────────────────────────────────────────────────────
    #[error("LAG-050: Configuration error: {reason}")]
    Config { reason: String },

    // ─────────────────────────────────────────────────────────────
    // Filter stage errors (LAG-060 to LAG-069)
    // ─────────────────────────────────────────────────────────────
    #[error("LAG-060: Filter stage task failed: {reason}")]
    FilterTask { reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LintaggError {
    /// Stable error code, if the variant carries one
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::KeyNotFound { .. } => Some("LAG-010"),
            Self::UnexpectedFailure { .. } => Some("LAG-020"),
            Self::InvalidLevel { .. } => Some("LAG-030"),
            Self::Cancelled => Some("LAG-040"),
            Self::TimedOut { .. } => Some("LAG-041"),
            Self::Config { .. } => Some("LAG-050"),
            Self::FilterTask { .. } => Some("LAG-060"),
            Self::Delegate(_) | Self::Json(_) | Self::YamlParse(_) | Self::Io(_) => None,
        }
    }

    /// Whether the error came from cancelling or timing out a remote check
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::TimedOut { .. })
    }
}

impl FixSuggestion for LintaggError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            Self::KeyNotFound { .. } => {
                Some("Check the job name, or load only after the job has stored its result")
            }
            Self::UnexpectedFailure { .. } => {
                Some("Run the linter by hand and check that its output format matches the parser")
            }
            Self::InvalidLevel { .. } => Some("Use one of: info, warning, error"),
            Self::Cancelled => None,
            Self::TimedOut { .. } => Some("Raise remote.timeout_ms in the config"),
            Self::Delegate(_) => None,
            Self::Config { .. } => Some("Check the config file against the documented keys"),
            Self::FilterTask { .. } => {
                Some("The filter function panicked; check it against this job's diagnostics")
            }
            Self::Json(_) => None,
            Self::YamlParse(_) => Some("Check YAML syntax: indentation and quoting"),
            Self::Io(_) => Some("Check file path and permissions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_not_found_names_key() {
        let err = LintaggError::KeyNotFound {
            key: "golint".to_string(),
        };
        assert!(err.to_string().contains("'golint'"));
        assert_eq!(err.code(), Some("LAG-010"));
        assert!(err.fix_suggestion().is_some());
    }

    #[test]
    fn delegate_error_is_transparent() {
        let err = LintaggError::from(anyhow::anyhow!("rate limited by api"));
        assert_eq!(err.to_string(), "rate limited by api");
        assert_eq!(err.code(), None);
        assert!(!err.is_cancellation());
    }

    #[test]
    fn cancellation_variants() {
        assert!(LintaggError::Cancelled.is_cancellation());
        assert!(LintaggError::TimedOut { timeout_ms: 5 }.is_cancellation());
        assert!(LintaggError::TimedOut { timeout_ms: 5 }
            .to_string()
            .contains("5ms"));
    }
}
