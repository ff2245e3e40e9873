//! Log output setup
//!
//! Progress is reported as plain log lines on stderr through `tracing`.

use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level for the given verbosity flags
///
/// `-q` shows warnings and errors only, the default shows progress, `-v`
/// adds toolchain output and `-vv` everything.
pub fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` directives are applied on top of the verbosity level.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let stderr = std::io::stderr();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(log_level(verbose, quiet).into()),
        )
        .with_target(false)
        .with_ansi(stderr.is_terminal())
        .with_writer(std::io::stderr)
        .init();
}

/// Report a fatal error
pub fn display_error(error: &anyhow::Error) {
    tracing::error!("{error:#}");
}
