//! Error types for linkshared
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a single toolchain invocation failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// The toolchain process could not be started
    #[error("failed to start '{program}': {error}")]
    Spawn { program: String, error: String },

    /// The toolchain ran but exited with a non-zero status
    #[error("{status}")]
    Exit { status: String },

    /// The deadline expired and the process was killed
    #[error("timed out after {}ms", timeout.as_millis())]
    TimedOut { timeout: Duration },

    /// Reading output or waiting for the process failed
    #[error("failed to collect output: {error}")]
    Io { error: String },
}

/// A failed invocation together with everything it printed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{error}")]
pub struct TaskFailure {
    /// Combined stdout and stderr captured before the failure
    pub output: String,
    /// Underlying cause
    pub error: TaskError,
}

impl TaskFailure {
    /// Create a failure from captured output and a cause
    pub fn new(output: impl Into<String>, error: TaskError) -> Self {
        Self {
            output: output.into(),
            error,
        }
    }

    /// Whether the failure was caused by deadline expiry
    pub fn is_timeout(&self) -> bool {
        matches!(self.error, TaskError::TimedOut { .. })
    }
}

/// Catalog loading errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read catalog file
    #[error("Failed to read catalog '{path}': {error}")]
    Read { path: PathBuf, error: String },

    /// Catalog file is not valid TOML or has the wrong shape
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Orchestration errors
///
/// Only the bootstrap phase can fail a run; per-package failures are logged
/// and never surface here.
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// The aggregate standard library did not build
    #[error("Failed to compile the Go standard library libstd.so: {0}")]
    Bootstrap(TaskFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_mentions_duration() {
        let err = TaskError::TimedOut {
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.to_string(), "timed out after 5000ms");
    }

    #[test]
    fn test_failure_displays_cause_only() {
        let failure = TaskFailure::new(
            "can't load package: foo",
            TaskError::Exit {
                status: "exit status: 1".to_string(),
            },
        );
        assert_eq!(failure.to_string(), "exit status: 1");
        assert!(!failure.is_timeout());
    }

    #[test]
    fn test_bootstrap_error_message() {
        let err = OrchestratorError::Bootstrap(TaskFailure::new(
            "",
            TaskError::TimedOut {
                timeout: Duration::from_secs(60),
            },
        ));
        assert!(err.to_string().contains("libstd.so"));
        assert!(err.to_string().contains("timed out"));
    }
}
