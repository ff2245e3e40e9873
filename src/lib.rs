//! Linkshared - Go standard library shared-mode build checker
//!
//! Builds the Go standard library as one shared library (libstd.so), then
//! rebuilds each package of a hand-ordered catalog against it in
//! `-linkshared` mode, one at a time, logging which ones build.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and log output
//! - [`core`] - Package catalog and build orchestration (no process I/O)
//! - [`infra`] - Infrastructure layer (toolchain processes)
//! - [`config`] - Run configuration and defaults
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
