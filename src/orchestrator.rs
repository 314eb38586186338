//! Behavioral audit orchestration.
//!
//! Runs the synthesized battery through the sandbox strictly
//! sequentially (the isolation context and its capture buffer are per
//! invocation and must never be shared across concurrent runs), then
//! judges each outcome and folds the battery into an accuracy figure.
//! No retries: a fault or timeout is reported once.

use crate::models::{AuditEntry, ExecStatus, ExecutionOutcome, TestCase, TestVerdict};
use crate::sandbox::SandboxExecutor;
use regex::Regex;
use std::sync::OnceLock;
use tracing::info;

/// Used when no function declaration is found in the snippet.
pub const DEFAULT_ENTRY_POINT: &str = "solution";

static FIRST_DEF_RE: OnceLock<Regex> = OnceLock::new();

fn first_def_re() -> &'static Regex {
    FIRST_DEF_RE.get_or_init(|| Regex::new(r"def\s+(\w+)\s*\(").expect("entry-point regex"))
}

/// First declared function name, if any.
pub fn locate_entry_point(source: &str) -> Option<String> {
    first_def_re()
        .captures(source)
        .map(|caps| caps[1].to_string())
}

/// Judge one outcome against its case. Pure and deterministic.
pub fn judge(case: &TestCase, outcome: &ExecutionOutcome) -> TestVerdict {
    match outcome.status {
        ExecStatus::Success => match &case.expected {
            Some(expected) if outcome.output != *expected => TestVerdict::Fail,
            _ => TestVerdict::Pass,
        },
        _ => TestVerdict::Error,
    }
}

/// Run the battery and score it. Returns the ordered entries and the
/// rounded pass percentage (0 for an empty battery).
pub fn audit_behavior(
    executor: &SandboxExecutor,
    source: &str,
    entry_point: &str,
    cases: Vec<TestCase>,
) -> (Vec<AuditEntry>, u32) {
    let total = cases.len();
    let mut entries = Vec::with_capacity(total);
    let mut passed = 0usize;

    for case in cases {
        let mut outcome = executor.run(source, entry_point, case.args.as_deref());
        let verdict = judge(&case, &outcome);
        match verdict {
            TestVerdict::Pass => passed += 1,
            TestVerdict::Error => {
                // Surface the fault summary where the output would be.
                outcome.output = outcome
                    .error
                    .clone()
                    .unwrap_or_else(|| "Runtime fault".to_string());
            }
            TestVerdict::Fail => {}
        }
        info!(case = %case.name, %verdict, "sandboxed case complete");
        entries.push(AuditEntry {
            case,
            outcome,
            verdict,
        });
    }

    let accuracy = if total == 0 {
        0
    } else {
        ((passed as f64 / total as f64) * 100.0).round() as u32
    };
    (entries, accuracy)
}
