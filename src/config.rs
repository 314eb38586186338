//! Audit configuration.
//!
//! One immutable config per audit request. The sandbox limits here are
//! the capability budget handed to each worker process; nothing is
//! inherited from the engine's own environment.

use std::path::PathBuf;
use std::time::Duration;

/// Display strings (outputs and fault summaries) are clipped to this
/// many characters, truncation marker included.
pub const OUTPUT_CAP: usize = 100;

#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Wall-clock deadline for one sandboxed invocation. The worker is
    /// killed, not merely timed, when it expires.
    pub deadline: Duration,
    /// Address-space cap applied to the worker (unix).
    pub memory_limit_bytes: u64,
    /// CPU-seconds cap applied to the worker (unix). Backstop behind
    /// the wall-clock deadline.
    pub cpu_limit_secs: u64,
    /// Worker executable; defaults to the current executable re-invoked
    /// with the hidden sandbox-worker subcommand.
    pub worker_exe: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_millis(2000),
            memory_limit_bytes: 512 * 1024 * 1024,
            cpu_limit_secs: 5,
            worker_exe: None,
        }
    }
}
