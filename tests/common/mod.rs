//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.
//!
//! Builds run `/bin/sh` as the toolchain, so `sh install -ldflags ...`
//! executes the `install` file in each working directory as a script.

#![allow(dead_code)]

use assert_fs::prelude::*;
use assert_fs::TempDir;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Fake Go installation
///
/// Creates a temporary `GOROOT` whose `src` tree holds one script per
/// package. Every script appends its label to a shared invocation log.
pub struct TestGoroot {
    /// Temporary directory acting as `GOROOT`
    pub dir: TempDir,
}

impl TestGoroot {
    /// Create an empty fake installation
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the fake `GOROOT`
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Make the bootstrap build run `body`
    pub fn std_script(&self, body: &str) {
        self.write_script("src", "std", body);
    }

    /// Make the build of package `id` run `body`
    pub fn package_script(&self, id: &str, body: &str) {
        self.write_script(&format!("src/{id}"), id, body);
    }

    /// Labels of every build that ran, in order
    pub fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(String::from)
            .collect()
    }

    /// Write a single-tier catalog file and return its path
    pub fn write_catalog(&self, ids: &[&str]) -> PathBuf {
        let entries: Vec<String> = ids.iter().map(|id| format!("{id:?}")).collect();
        let catalog = self.dir.child("catalog.toml");
        catalog
            .write_str(&format!(
                "[[tier]]\nname = \"test\"\npackages = [{}]\n",
                entries.join(", ")
            ))
            .expect("Failed to write catalog");
        catalog.path().to_path_buf()
    }

    /// Read a file relative to `GOROOT`
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.path().join(name)).expect("Failed to read file")
    }

    fn log_path(&self) -> PathBuf {
        self.path().join("invocations.log")
    }

    fn write_script(&self, dir: &str, label: &str, body: &str) {
        let dir = self.dir.child(dir);
        dir.create_dir_all().expect("Failed to create directory");
        dir.child("install")
            .write_str(&format!(
                "echo '{label}' >> '{}'\n{body}\n",
                self.log_path().display()
            ))
            .expect("Failed to write script");
    }
}

impl Default for TestGoroot {
    fn default() -> Self {
        Self::new()
    }
}

/// Run linkshared against a fake installation with no pauses
pub fn run_linkshared(goroot: &TestGoroot, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_linkshared"))
        .arg("--go")
        .arg("/bin/sh")
        .arg("--goroot")
        .arg(goroot.path())
        .args(["--pause-ms", "0", "--settle-ms", "0"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute linkshared")
}

/// Lossy stderr of a finished run
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
