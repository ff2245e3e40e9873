//! Build orchestration logic
//!
//! Drives a run in two phases: one bootstrap build of the whole standard
//! library as libstd.so, then one build per catalog entry against it.
//!
//! Builds run strictly one after another. The toolchain mutates a shared
//! on-disk package cache and serializing invocations is what keeps that
//! cache consistent; no lock is taken here.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::Instant;

use crate::config::{defaults, RunConfig};
use crate::core::catalog::Catalog;
use crate::error::{OrchestratorError, TaskFailure};

/// Result of one toolchain invocation: combined output on success
pub type BuildOutcome = Result<String, TaskFailure>;

/// A single toolchain invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTask {
    /// Directory the toolchain runs in
    pub working_dir: PathBuf,
    /// Positional arguments appended after the fixed flags
    pub extra_args: Vec<String>,
    /// Time budget the deadline was derived from
    pub timeout: Duration,
    /// Instant after which the invocation is cancelled
    pub deadline: Instant,
}

impl BuildTask {
    /// Create a task whose deadline starts now
    pub fn new(working_dir: PathBuf, extra_args: Vec<String>, timeout: Duration) -> Self {
        Self {
            working_dir,
            extra_args,
            timeout,
            deadline: Instant::now() + timeout,
        }
    }

    /// The aggregate `std` build, run from the source root
    pub fn bootstrap(source_root: &Path, timeout: Duration) -> Self {
        Self::new(
            source_root.to_path_buf(),
            vec![defaults::STD_TARGET.to_string()],
            timeout,
        )
    }

    /// A single package build, run from the package directory
    pub fn package(source_root: &Path, id: &str, timeout: Duration) -> Self {
        Self::new(package_dir(source_root, id), Vec::new(), timeout)
    }
}

/// Directory of a package: the source root joined with the id's segments
pub fn package_dir(source_root: &Path, id: &str) -> PathBuf {
    id.split('/')
        .filter(|segment| !segment.is_empty())
        .fold(source_root.to_path_buf(), |dir, segment| dir.join(segment))
}

/// Something that can run a build task
///
/// Implementations must not panic or exit; every problem is reported
/// through the returned outcome.
#[async_trait]
pub trait BuildExecutor: Send + Sync {
    /// Run one task to completion or until its deadline
    async fn execute(&self, task: &BuildTask) -> BuildOutcome;
}

/// Timing and location settings of the orchestrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Source root; bootstrap working directory
    pub source_root: PathBuf,
    /// Deadline for the bootstrap build
    pub std_timeout: Duration,
    /// Deadline for each package build
    pub package_timeout: Duration,
    /// Pause after each package build
    pub pause: Duration,
    /// Pause after the bootstrap build
    pub settle: Duration,
}

impl From<&RunConfig> for BuildSettings {
    fn from(config: &RunConfig) -> Self {
        Self {
            source_root: config.source_root(),
            std_timeout: config.std_timeout,
            package_timeout: config.package_timeout,
            pause: config.pause,
            settle: config.settle,
        }
    }
}

/// What happened during the package phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Packages that built
    pub succeeded: Vec<String>,
    /// Packages that failed, timed out included
    pub failed: Vec<String>,
}

impl RunSummary {
    /// Number of package builds attempted
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Build orchestrator
#[derive(Debug)]
pub struct BuildOrchestrator<E> {
    executor: E,
    settings: BuildSettings,
}

impl<E: BuildExecutor> BuildOrchestrator<E> {
    /// Create a new build orchestrator
    pub fn new(executor: E, settings: BuildSettings) -> Self {
        Self { executor, settings }
    }

    /// Build libstd.so, then every enabled catalog entry in order
    ///
    /// Only a bootstrap failure is returned as an error. Package failures are
    /// logged and counted, and the loop always reaches the end of the catalog.
    pub async fn run(&self, catalog: &Catalog) -> Result<RunSummary, OrchestratorError> {
        self.bootstrap().await?;
        pause(self.settings.settle).await;

        let mut summary = RunSummary::default();
        for id in catalog.packages() {
            if self.build_package(id).await {
                summary.succeeded.push(id.to_string());
            } else {
                summary.failed.push(id.to_string());
            }
            pause(self.settings.pause).await;
        }

        tracing::info!(
            "finished: {} attempted, {} succeeded, {} failed",
            summary.attempted(),
            summary.succeeded.len(),
            summary.failed.len()
        );
        Ok(summary)
    }

    async fn bootstrap(&self) -> Result<(), OrchestratorError> {
        tracing::info!("building shared standard library libstd.so");
        let task = BuildTask::bootstrap(&self.settings.source_root, self.settings.std_timeout);

        match self.executor.execute(&task).await {
            Ok(output) => {
                log_output(&output);
                tracing::info!("successfully built libstd.so");
                Ok(())
            }
            Err(failure) => {
                if !failure.output.is_empty() {
                    tracing::error!("{}", failure.output.trim_end());
                }
                Err(OrchestratorError::Bootstrap(failure))
            }
        }
    }

    async fn build_package(&self, id: &str) -> bool {
        tracing::info!("building package: {id}");
        let task = BuildTask::package(&self.settings.source_root, id, self.settings.package_timeout);

        match self.executor.execute(&task).await {
            Ok(output) => {
                log_output(&output);
                tracing::info!("successfully built {id}");
                true
            }
            Err(failure) => {
                tracing::error!("error building package {id}: {failure}");
                if !failure.output.is_empty() {
                    tracing::error!("{}", failure.output.trim_end());
                }
                false
            }
        }
    }
}

fn log_output(output: &str) {
    if !output.is_empty() {
        tracing::debug!("{}", output.trim_end());
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}
