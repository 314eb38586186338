//! Sandboxed execution of untrusted snippets.
//!
//! Each invocation runs in a freshly spawned worker process (this same
//! binary re-invoked with a hidden subcommand) with a cleared
//! environment and unix rlimits. The deadline is enforced for real: the
//! parent polls the child and kills it when the deadline expires, so a
//! snippet that never returns costs at most the deadline. Nothing is
//! pooled or shared between invocations: one process, one capture
//! buffer, one outcome.

pub mod worker;

use crate::config::{AuditConfig, OUTPUT_CAP};
use crate::error::AuditError;
use crate::models::{ExecStatus, ExecutionOutcome};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::io::{Read, Write};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Hidden subcommand that turns this binary into the worker.
pub const WORKER_SUBCOMMAND: &str = "sandbox-worker";

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// One invocation, serialized onto the worker's stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub source: String,
    pub entry_point: String,
    /// Positional arguments; `None` requests script-style execution.
    pub args: Option<Vec<JsonValue>>,
}

/// What the worker reports back on stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerResponse {
    pub ok: bool,
    pub output: String,
    pub runtime_ms: f64,
    pub error: Option<String>,
}

impl WorkerResponse {
    pub fn success(output: String, runtime_ms: f64) -> Self {
        Self {
            ok: true,
            output,
            runtime_ms,
            error: None,
        }
    }

    pub fn fault(summary: String, runtime_ms: f64) -> Self {
        Self {
            ok: false,
            output: String::new(),
            runtime_ms,
            error: Some(summary),
        }
    }
}

enum SupervisedExit {
    Completed(WorkerResponse),
    Deadline,
}

/// Clip a display string to `cap` characters total; clipped strings end
/// in a 3-character marker.
pub fn truncate_display(text: &str, cap: usize) -> String {
    if text.chars().count() <= cap {
        return text.to_string();
    }
    let kept: String = text.chars().take(cap.saturating_sub(3)).collect();
    format!("{kept}...")
}

pub struct SandboxExecutor {
    config: AuditConfig,
}

impl SandboxExecutor {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Execute `source` in a fresh worker under the configured deadline.
    ///
    /// Faults never propagate: every failure mode degrades to a `Fail`
    /// outcome, and only a fired deadline yields `Timeout`.
    pub fn run(
        &self,
        source: &str,
        entry_point: &str,
        args: Option<&[JsonValue]>,
    ) -> ExecutionOutcome {
        let started = Instant::now();
        match self.supervise(source, entry_point, args) {
            Ok(SupervisedExit::Completed(response)) => {
                let status = if response.ok {
                    ExecStatus::Success
                } else {
                    ExecStatus::Fail
                };
                ExecutionOutcome {
                    status,
                    output: truncate_display(&response.output, OUTPUT_CAP),
                    runtime_ms: response.runtime_ms,
                    error: response
                        .error
                        .map(|summary| truncate_display(&summary, OUTPUT_CAP)),
                }
            }
            Ok(SupervisedExit::Deadline) => ExecutionOutcome {
                status: ExecStatus::Timeout,
                output: String::new(),
                runtime_ms: started.elapsed().as_secs_f64() * 1000.0,
                error: Some(format!(
                    "Timed out after {}ms",
                    self.config.deadline.as_millis()
                )),
            },
            Err(err) => {
                warn!("sandbox supervision failed: {err}");
                ExecutionOutcome {
                    status: ExecStatus::Fail,
                    output: String::new(),
                    runtime_ms: started.elapsed().as_secs_f64() * 1000.0,
                    error: Some(truncate_display(&err.to_string(), OUTPUT_CAP)),
                }
            }
        }
    }

    fn supervise(
        &self,
        source: &str,
        entry_point: &str,
        args: Option<&[JsonValue]>,
    ) -> Result<SupervisedExit, AuditError> {
        let worker_exe = match &self.config.worker_exe {
            Some(path) => path.clone(),
            None => std::env::current_exe()?,
        };

        let mut command = Command::new(&worker_exe);
        command
            .arg(WORKER_SUBCOMMAND)
            .env_clear()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        self.apply_resource_limits(&mut command);

        debug!("spawning sandbox worker {:?}", worker_exe);
        let mut child = command.spawn().map_err(|err| {
            AuditError::Sandbox(format!("failed to spawn sandbox worker: {err}"))
        })?;

        let request = WorkerRequest {
            source: source.to_string(),
            entry_point: entry_point.to_string(),
            args: args.map(|a| a.to_vec()),
        };
        let payload = serde_json::to_string(&request)
            .map_err(|err| AuditError::Sandbox(format!("request encoding failed: {err}")))?;
        if let Some(mut stdin) = child.stdin.take() {
            // EPIPE here means the child already died; the wait loop
            // will surface that as a missing response.
            let _ = stdin.write_all(payload.as_bytes());
        }

        let started = Instant::now();
        loop {
            match child.try_wait()? {
                Some(_status) => {
                    let mut raw = String::new();
                    if let Some(mut stdout) = child.stdout.take() {
                        stdout.read_to_string(&mut raw)?;
                    }
                    let response = serde_json::from_str::<WorkerResponse>(raw.trim())
                        .map_err(|_| {
                            AuditError::Sandbox(
                                "sandbox worker terminated without a response".to_string(),
                            )
                        })?;
                    return Ok(SupervisedExit::Completed(response));
                }
                None => {
                    if started.elapsed() >= self.config.deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Ok(SupervisedExit::Deadline);
                    }
                    std::thread::sleep(POLL_INTERVAL);
                }
            }
        }
    }

    #[cfg(unix)]
    fn apply_resource_limits(&self, command: &mut Command) {
        use std::os::unix::process::CommandExt;
        let memory = self.config.memory_limit_bytes as libc::rlim_t;
        let cpu = self.config.cpu_limit_secs as libc::rlim_t;
        unsafe {
            command.pre_exec(move || {
                let address_space = libc::rlimit {
                    rlim_cur: memory,
                    rlim_max: memory,
                };
                libc::setrlimit(libc::RLIMIT_AS, &address_space);
                let cpu_seconds = libc::rlimit {
                    rlim_cur: cpu,
                    rlim_max: cpu,
                };
                libc::setrlimit(libc::RLIMIT_CPU, &cpu_seconds);
                Ok(())
            });
        }
    }

    #[cfg(not(unix))]
    fn apply_resource_limits(&self, _command: &mut Command) {}
}
