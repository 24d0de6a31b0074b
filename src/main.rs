//! Binary entry point for the `payflow` command-line client.
//!
//! Argument handling and submission live in `payflow::cli`; this binary
//! only installs logging and delegates.

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("payflow=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    payflow::cli::run().await
}
