//! Command-line interface module
//!
//! This module handles argument parsing and wiring.
//! It contains no build logic - that belongs in the [`crate::core`] module.

pub mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{defaults, EnvPolicy, RunConfig};
use crate::core::builder::{BuildOrchestrator, BuildSettings};
use crate::core::catalog::Catalog;
use crate::infra::toolchain::GoToolchain;

/// Linkshared - Go standard library shared-mode build checker
///
/// Builds libstd.so with `go install -buildmode shared`, then rebuilds every
/// cataloged package against it with `-linkshared`.
#[derive(Parser, Debug)]
#[command(name = "linkshared")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The flags to pass on to the linker
    #[arg(long, default_value_t = String::new(), allow_hyphen_values = true)]
    pub ldflags: String,

    /// Go installation root; packages are built from <GOROOT>/src
    #[arg(long, env = defaults::ENV_GOROOT)]
    pub goroot: Option<PathBuf>,

    /// Toolchain binary to invoke
    #[arg(long, default_value = defaults::DEFAULT_TOOLCHAIN)]
    pub go: PathBuf,

    /// TOML catalog replacing the built-in package list
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Run the toolchain with an empty environment
    #[arg(long)]
    pub clean_env: bool,

    /// Deadline for the libstd.so build, in seconds
    #[arg(long, default_value_t = defaults::STD_TIMEOUT_SECS)]
    pub std_timeout_secs: u64,

    /// Deadline for each package build, in seconds
    #[arg(long, default_value_t = defaults::PACKAGE_TIMEOUT_SECS)]
    pub package_timeout_secs: u64,

    /// Pause after each package build, in milliseconds
    #[arg(long, default_value_t = defaults::PACKAGE_PAUSE_MS)]
    pub pause_ms: u64,

    /// Pause after the libstd.so build, in milliseconds
    #[arg(long, default_value_t = defaults::STD_SETTLE_MS)]
    pub settle_ms: u64,

    /// Print the catalog and exit without building
    #[arg(long)]
    pub list: bool,

    /// Enable verbose output (-v for toolchain output, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Settings for this run
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            toolchain: self.go.clone(),
            ldflags: self.ldflags.clone(),
            goroot: self.goroot.clone().unwrap_or_default(),
            env: if self.clean_env {
                EnvPolicy::Clear
            } else {
                EnvPolicy::Inherit
            },
            std_timeout: Duration::from_secs(self.std_timeout_secs),
            package_timeout: Duration::from_secs(self.package_timeout_secs),
            pause: Duration::from_millis(self.pause_ms),
            settle: Duration::from_millis(self.settle_ms),
        }
    }

    /// Catalog selected by `--catalog`, or the built-in one
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::load(path)
                .with_context(|| format!("Failed to load catalog {}", path.display())),
            None => Ok(Catalog::standard()),
        }
    }

    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let catalog = self.load_catalog()?;

        if self.list {
            print!("{catalog}");
            return Ok(());
        }

        let config = self.run_config();
        tracing::debug!(
            "{} packages from {}",
            catalog.len(),
            config.source_root().display()
        );

        let orchestrator = BuildOrchestrator::new(
            GoToolchain::from_config(&config),
            BuildSettings::from(&config),
        );
        orchestrator.run(&catalog).await?;
        Ok(())
    }
}
