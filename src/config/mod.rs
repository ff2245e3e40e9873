//! Run configuration
//!
//! Everything a run needs is collected once into [`RunConfig`] after flag
//! parsing and handed explicitly to the orchestrator and the task runner.

pub mod defaults;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// How the toolchain process environment is derived
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvPolicy {
    /// Run with the invoking process environment, unchanged
    #[default]
    Inherit,
    /// Run with an empty environment
    Clear,
}

/// Immutable settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Toolchain binary (name or path)
    pub toolchain: PathBuf,
    /// Extra linker flags forwarded verbatim as `-ldflags`
    pub ldflags: String,
    /// Go installation root; may be empty
    pub goroot: PathBuf,
    /// Environment handed to the toolchain
    pub env: EnvPolicy,
    /// Deadline for the bootstrap build
    pub std_timeout: Duration,
    /// Deadline for each package build
    pub package_timeout: Duration,
    /// Pause after each package build
    pub pause: Duration,
    /// Pause after the bootstrap build
    pub settle: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            toolchain: PathBuf::from(defaults::DEFAULT_TOOLCHAIN),
            ldflags: String::new(),
            goroot: PathBuf::new(),
            env: EnvPolicy::default(),
            std_timeout: defaults::std_timeout(),
            package_timeout: defaults::package_timeout(),
            pause: Duration::from_millis(defaults::PACKAGE_PAUSE_MS),
            settle: Duration::from_millis(defaults::STD_SETTLE_MS),
        }
    }
}

impl RunConfig {
    /// Root of the source tree: `$GOROOT/src`
    pub fn source_root(&self) -> PathBuf {
        self.goroot.join(defaults::SOURCE_SUBDIR)
    }

    /// Resolve the toolchain against `PATH`
    ///
    /// Falls back to the configured value so that a missing toolchain shows
    /// up as a spawn failure of the bootstrap build.
    pub fn resolve_toolchain(&self) -> PathBuf {
        resolve_program(&self.toolchain)
    }
}

fn resolve_program(program: &Path) -> PathBuf {
    match which::which(program) {
        Ok(path) => {
            tracing::debug!("Using toolchain {}", path.display());
            path
        }
        Err(e) => {
            tracing::debug!("Could not resolve '{}': {e}", program.display());
            program.to_path_buf()
        }
    }
}
