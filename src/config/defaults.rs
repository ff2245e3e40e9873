//! Default configuration values

use std::time::Duration;

/// Toolchain binary invoked for every build
pub const DEFAULT_TOOLCHAIN: &str = "go";

/// Environment variable naming the Go installation root
pub const ENV_GOROOT: &str = "GOROOT";

/// Directory under `GOROOT` holding one subdirectory per package
pub const SOURCE_SUBDIR: &str = "src";

/// Target passed to the bootstrap build to select every std package
pub const STD_TARGET: &str = "std";

/// Deadline for the aggregate libstd.so build (in seconds)
pub const STD_TIMEOUT_SECS: u64 = 60;

/// Deadline for a single package build (in seconds)
pub const PACKAGE_TIMEOUT_SECS: u64 = 5;

/// Pause after every package build (in milliseconds)
pub const PACKAGE_PAUSE_MS: u64 = 100;

/// Pause between the bootstrap build and the first package (in milliseconds)
pub const STD_SETTLE_MS: u64 = 2000;

/// Default bootstrap deadline
pub const fn std_timeout() -> Duration {
    Duration::from_secs(STD_TIMEOUT_SECS)
}

/// Default per-package deadline
pub const fn package_timeout() -> Duration {
    Duration::from_secs(PACKAGE_TIMEOUT_SECS)
}
