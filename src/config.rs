//! Run configuration
//!
//! Loaded from a YAML file; every section and key is optional.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. Environment variables (`LINTAGG_LOG`, `LINTAGG_REMOTE_TIMEOUT_MS`)
//! 2. Config file
//! 3. Defaults

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{LintaggError, Result};
use crate::store::Level;

pub const ENV_LOG: &str = "LINTAGG_LOG";
pub const ENV_REMOTE_TIMEOUT_MS: &str = "LINTAGG_REMOTE_TIMEOUT_MS";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` EnvFilter directive (e.g. `info`, `lintagg=debug`)
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// How a run summary turns into pass/fail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Fail the run when any job errored with zero findings
    #[serde(default = "default_true")]
    pub fail_on_unexpected_failure: bool,

    /// Reported diagnostics from jobs at or above this level fail the run
    #[serde(default)]
    pub fail_level: Level,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fail_on_unexpected_failure: true,
            fail_level: Level::Error,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Deadline for a remote check; `None` waits until cancelled
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl RemoteConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Merge with environment variables
    ///
    /// Environment variables take precedence over config file values.
    /// An unparsable timeout is ignored with a warning.
    pub fn with_env(mut self) -> Self {
        if let Ok(filter) = std::env::var(ENV_LOG) {
            if !filter.is_empty() {
                self.log.filter = filter;
            }
        }

        if let Ok(raw) = std::env::var(ENV_REMOTE_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.remote.timeout_ms = Some(ms),
                Err(e) => warn!(
                    var = ENV_REMOTE_TIMEOUT_MS,
                    value = %raw,
                    error = %e,
                    "ignoring unparsable remote timeout"
                ),
            }
        }

        self
    }

    /// Reject values that parse but cannot be used
    pub fn validate(&self) -> Result<()> {
        if self.log.filter.trim().is_empty() {
            return Err(LintaggError::Config {
                reason: "log.filter must not be empty".to_string(),
            });
        }
        if self.remote.timeout_ms == Some(0) {
            return Err(LintaggError::Config {
                reason: "remote.timeout_ms must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.log.filter, "info");
        assert!(config.report.fail_on_unexpected_failure);
        assert_eq!(config.report.fail_level, Level::Error);
        assert_eq!(config.remote.timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_yaml_is_default() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = Config::from_yaml(
            r#"
report:
  fail_level: warning
remote:
  timeout_ms: 1500
"#,
        )
        .unwrap();

        assert_eq!(config.report.fail_level, Level::Warning);
        assert!(config.report.fail_on_unexpected_failure);
        assert_eq!(config.remote.timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn unknown_key_rejected() {
        let err = Config::from_yaml("report:\n  fail_lvl: error\n").unwrap_err();
        assert!(matches!(err, LintaggError::YamlParse(_)));
    }

    #[test]
    fn fail_level_ignores_case() {
        let config = Config::from_yaml("report:\n  fail_level: Warning\n").unwrap();
        assert_eq!(config.report.fail_level, Level::Warning);
    }

    #[test]
    fn unknown_level_rejected() {
        assert!(Config::from_yaml("report:\n  fail_level: fatal\n").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lintagg.yaml");
        fs::write(&path, "log:\n  filter: lintagg=debug\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.log.filter, "lintagg=debug");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, LintaggError::Io(_)));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config::from_yaml("remote:\n  timeout_ms: 0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(LintaggError::Config { .. })
        ));
    }

    #[test]
    #[serial]
    fn env_overrides_file_values() {
        std::env::set_var(ENV_LOG, "warn");
        std::env::set_var(ENV_REMOTE_TIMEOUT_MS, "250");

        let config = Config::default().with_env();

        std::env::remove_var(ENV_LOG);
        std::env::remove_var(ENV_REMOTE_TIMEOUT_MS);

        assert_eq!(config.log.filter, "warn");
        assert_eq!(config.remote.timeout_ms, Some(250));
    }

    #[test]
    #[serial]
    fn env_bad_timeout_ignored() {
        std::env::set_var(ENV_REMOTE_TIMEOUT_MS, "soon");

        let config = Config::from_yaml("remote:\n  timeout_ms: 10\n")
            .unwrap()
            .with_env();

        std::env::remove_var(ENV_REMOTE_TIMEOUT_MS);

        assert_eq!(config.remote.timeout_ms, Some(10));
    }
}
