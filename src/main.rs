//! Linkshared CLI - Go standard library shared-mode build checker
//!
//! Entry point for the linkshared command-line application.

use anyhow::Result;
use clap::Parser;

use linkshared::cli::output::{display_error, init_tracing};
use linkshared::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    init_tracing(cli.verbose, cli.quiet);

    // Run and turn any error into a non-zero exit status
    match cli.run().await {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
