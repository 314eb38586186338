//! Pygauge - sandboxed snippet auditing CLI
//!
//! Parses a Python snippet, probes it in a killable sandbox process,
//! and prints a composite grade.

use anyhow::Result;
use clap::Parser;
use pygauge::cli;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging (stderr, so the worker's stdout protocol and
    // JSON output stay clean)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = cli::Cli::parse();
    cli::run(cli)
}
