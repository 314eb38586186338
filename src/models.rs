//! Core data models for Pygauge
//!
//! These models form the stable result schema consumed by reporters
//! and external presentation layers. Everything here is request-scoped:
//! built once per audit, never mutated afterwards, never shared across
//! concurrent audits.

use serde::{Deserialize, Serialize};

/// Syntactic Big-O estimate for the whole snippet.
///
/// Derived from loop shape only (nested loop anywhere => quadratic),
/// not from data flow. Known to mis-estimate true asymptotics; treat
/// as a hint, not a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityClass {
    #[default]
    Constant,
    Linear,
    Quadratic,
}

impl std::fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplexityClass::Constant => write!(f, "O(1)"),
            ComplexityClass::Linear => write!(f, "O(n)"),
            ComplexityClass::Quadratic => write!(f, "O(n²)"),
        }
    }
}

/// Structural metrics from one depth-first pass over the syntax tree,
/// plus the line-level dead-code scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralMetrics {
    pub loop_count: u32,
    pub function_count: u32,
    pub max_nesting_depth: u32,
    /// McCabe-style approximation: 1 + branch/loop constructs.
    pub complexity_score: u32,
    /// Names of functions whose body spans more than 25 lines.
    pub long_functions: Vec<String>,
    /// 1-based line numbers of statements flagged as unreachable.
    /// Line-level heuristic; false positives when indentation coincides
    /// across distinct blocks.
    pub dead_code_hints: Vec<usize>,
    pub issues: Vec<String>,
    pub complexity_class: ComplexityClass,
    /// 100 - 5*nesting - 10*long_functions - 15*dead_code, clamped to [0,100].
    pub health: u32,
}

/// A grammar violation from the structural stage. Halts everything
/// downstream of the analyzer and forces minimum scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseFailure {
    /// 1-based line of the violation.
    pub line: usize,
    pub message: String,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error at line {}: {}", self.line, self.message)
    }
}

/// Advisory machine-vs-human authorship estimate.
///
/// Lexical pattern matching, nothing more. The `disclaimer` field is
/// part of the schema on purpose so no consumer can present this as
/// authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginAssessment {
    /// Capped at 95; a heuristic should never claim certainty.
    pub ai_probability: u32,
    pub human_probability: u32,
    pub reasons: Vec<String>,
    pub disclaimer: String,
}

/// Estimated difficulty band of the snippet, for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyRating {
    pub level: String,
    pub label: String,
}

/// One synthesized input scenario.
///
/// `args` is the ordered positional-argument sequence for the entry
/// point; `None` means script-style generic execution with no call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub args: Option<Vec<serde_json::Value>>,
    pub expected: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecStatus {
    Success,
    Fail,
    /// Deadline expired and the worker was forcibly terminated.
    /// Distinct from `Fail`: the snippet never produced an outcome.
    Timeout,
}

impl std::fmt::Display for ExecStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecStatus::Success => write!(f, "success"),
            ExecStatus::Fail => write!(f, "fail"),
            ExecStatus::Timeout => write!(f, "timeout"),
        }
    }
}

/// Result of one sandboxed invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub status: ExecStatus,
    /// Display string, bounded at 100 chars (97 + truncation marker).
    pub output: String,
    pub runtime_ms: f64,
    /// Single-line fault summary when status != Success.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestVerdict {
    Pass,
    Fail,
    Error,
}

impl std::fmt::Display for TestVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestVerdict::Pass => write!(f, "PASS"),
            TestVerdict::Fail => write!(f, "FAIL"),
            TestVerdict::Error => write!(f, "ERROR"),
        }
    }
}

/// One battery entry: the case, what happened, and how it was judged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub case: TestCase,
    pub outcome: ExecutionOutcome,
    pub verdict: TestVerdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Elite,
    Modest,
    Critical,
    Empty,
}

impl Verdict {
    pub fn description(&self) -> &'static str {
        match self {
            Verdict::Elite => "Highly optimized: architecture is evergreen.",
            Verdict::Modest => "Caution: functional but contains structural debt.",
            Verdict::Critical => "Unsafe: major logical or structural flaws.",
            Verdict::Empty => "No code detected.",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Elite => write!(f, "ELITE"),
            Verdict::Modest => write!(f, "MODEST"),
            Verdict::Critical => write!(f, "CRITICAL"),
            Verdict::Empty => write!(f, "EMPTY"),
        }
    }
}

/// Weighted composite of static metrics and behavioral accuracy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeGrade {
    pub correctness: u32,
    pub efficiency: u32,
    pub readability: u32,
    pub behavior_accuracy: u32,
    /// 0.40*correctness + 0.30*efficiency + 0.15*readability
    /// + 0.15*behavior, rounded; always in [0,100].
    pub total_score: u32,
    pub complexity_label: String,
    pub verdict: Verdict,
    /// Never empty: an affirmation replaces an empty list.
    pub suggestions: Vec<String>,
}

/// The full audit result: the stable external schema (one per request).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub parse_error: Option<ParseFailure>,
    pub metrics: StructuralMetrics,
    pub origin: OriginAssessment,
    pub difficulty: DifficultyRating,
    pub entry_point: String,
    pub behavior: Vec<AuditEntry>,
    pub behavior_accuracy: u32,
    pub grade: CompositeGrade,
    /// Pattern-based refactor hints; advisory, not part of the grade.
    pub hints: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_class_display() {
        assert_eq!(ComplexityClass::Constant.to_string(), "O(1)");
        assert_eq!(ComplexityClass::Linear.to_string(), "O(n)");
        assert_eq!(ComplexityClass::Quadratic.to_string(), "O(n²)");
    }

    #[test]
    fn verdict_serializes_lowercase() {
        let json = serde_json::to_string(&Verdict::Elite).expect("serialize verdict");
        assert_eq!(json, "\"elite\"");
    }

    #[test]
    fn parse_failure_display_includes_line() {
        let failure = ParseFailure {
            line: 3,
            message: "invalid syntax".to_string(),
        };
        assert!(failure.to_string().contains("line 3"));
    }
}
