//! brief CLI binary entry point
//!
//! Installs logging and calls the library's `run_cli()` function.

use anyhow::Result;
use brief_cli::run_cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    run_cli()
}
