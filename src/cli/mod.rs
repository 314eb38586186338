//! CLI command definitions and handlers

use crate::config::AuditConfig;
use crate::{pipeline, reporters, sandbox};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Parse and validate the deadline (1ms - 60s)
fn parse_deadline(s: &str) -> Result<u64, String> {
    let n: u64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("deadline must be at least 1ms".to_string())
    } else if n > 60_000 {
        Err("deadline cannot exceed 60000ms".to_string())
    } else {
        Ok(n)
    }
}

/// Pygauge - sandboxed snippet auditing
///
/// Parses a single Python snippet, probes it against a synthesized
/// input battery inside a killable sandbox process, and prints a
/// composite grade. 100% LOCAL - the snippet never leaves your machine.
#[derive(Parser, Debug)]
#[command(name = "pygauge")]
#[command(
    version,
    about = "Audit a Python snippet: structural metrics, sandboxed behavior, composite grade",
    after_help = "\
Examples:
  pygauge snippet.py                   Audit and print a terminal report
  pygauge snippet.py --format json     JSON output for scripting
  pygauge snippet.py --entry two_sum   Name the entry point explicitly
  pygauge snippet.py --deadline-ms 500 Tighter sandbox deadline"
)]
pub struct Cli {
    /// Path to the Python source file to audit
    #[arg(global = true)]
    pub path: Option<PathBuf>,

    /// Entry-point function name (default: first declared function)
    #[arg(long, global = true)]
    pub entry: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Sandbox deadline per test case, in milliseconds
    #[arg(long, global = true, default_value = "2000", value_parser = parse_deadline)]
    pub deadline_ms: u64,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit a snippet and print the report (default)
    Audit,

    /// Internal: evaluate one sandboxed request from stdin
    #[command(name = "sandbox-worker", hide = true)]
    SandboxWorker,
}

pub fn run(cli: Cli) -> Result<()> {
    if let Some(Commands::SandboxWorker) = cli.command {
        return sandbox::worker::run();
    }

    let Some(path) = cli.path else {
        bail!("no input file; usage: pygauge <file.py>");
    };
    let source = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let config = AuditConfig {
        deadline: Duration::from_millis(cli.deadline_ms),
        ..Default::default()
    };
    let report = pipeline::audit(&source, cli.entry.as_deref(), &config);

    match cli.format.as_str() {
        "json" => println!("{}", reporters::json::render(&report)?),
        _ => print!("{}", reporters::text::render(&report)),
    }
    Ok(())
}
