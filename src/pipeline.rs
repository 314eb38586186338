//! The audit pipeline: one-way composition of every stage.
//!
//! Parse, then metrics/origin, then test synthesis, then sequential
//! sandboxed executions, then grading. Stages degrade rather than fail: the caller
//! always receives a complete report, possibly an Empty or all-minimum
//! one.

use crate::config::AuditConfig;
use crate::models::{AuditReport, OriginAssessment, StructuralMetrics};
use crate::sandbox::SandboxExecutor;
use crate::{analyzer, grading, hints, orchestrator, origin, synth};
use tracing::{debug, info};

/// Audit one snippet end to end.
///
/// `declared_entry` overrides the first-declaration scan when the
/// caller knows the entry point's name.
pub fn audit(source: &str, declared_entry: Option<&str>, config: &AuditConfig) -> AuditReport {
    if source.trim().is_empty() {
        debug!("empty input, short-circuiting to Empty report");
        return empty_report(source);
    }

    let (parse_error, metrics) = match analyzer::analyze(source) {
        Ok(metrics) => (None, metrics),
        Err(failure) => {
            info!("parse failure at line {}: {}", failure.line, failure.message);
            // Downstream stages are skipped; minimum health is forced.
            (
                Some(failure),
                StructuralMetrics {
                    health: 0,
                    ..Default::default()
                },
            )
        }
    };
    let parse_ok = parse_error.is_none();

    let origin_assessment = origin::assess(source, &metrics);
    let difficulty = origin::rate_difficulty(source, &metrics);

    let entry_point = declared_entry
        .map(String::from)
        .or_else(|| orchestrator::locate_entry_point(source))
        .unwrap_or_else(|| orchestrator::DEFAULT_ENTRY_POINT.to_string());

    let (behavior, behavior_accuracy) = if parse_ok {
        let cases = synth::synthesize(source, &entry_point);
        let executor = SandboxExecutor::new(config.clone());
        orchestrator::audit_behavior(&executor, source, &entry_point, cases)
    } else {
        (Vec::new(), 0)
    };

    let grade = grading::grade(source, parse_ok, &metrics, behavior_accuracy);
    let hints = hints::refactor_hints(source, parse_ok);

    AuditReport {
        parse_error,
        metrics,
        origin: origin_assessment,
        difficulty,
        entry_point,
        behavior,
        behavior_accuracy,
        grade,
        hints,
    }
}

fn empty_report(source: &str) -> AuditReport {
    let metrics = StructuralMetrics::default();
    AuditReport {
        parse_error: None,
        origin: OriginAssessment {
            ai_probability: 0,
            human_probability: 100,
            reasons: vec!["Natural coding flow detected".to_string()],
            disclaimer: origin::DISCLAIMER.to_string(),
        },
        difficulty: origin::rate_difficulty(source, &metrics),
        metrics,
        entry_point: orchestrator::DEFAULT_ENTRY_POINT.to_string(),
        behavior: Vec::new(),
        behavior_accuracy: 0,
        grade: grading::grade("", true, &StructuralMetrics::default(), 0),
        hints: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Verdict;

    // These paths never reach the sandbox, so the default config is safe.

    #[test]
    fn empty_source_yields_empty_verdict() {
        let report = audit("   \n  ", None, &AuditConfig::default());
        assert_eq!(report.grade.verdict, Verdict::Empty);
        assert_eq!(report.behavior_accuracy, 0);
        assert!(report.behavior.is_empty());
        assert!(report.parse_error.is_none());
    }

    #[test]
    fn parse_failure_short_circuits_execution() {
        let report = audit("def broken(:\n", None, &AuditConfig::default());
        let failure = report.parse_error.expect("parse error surfaced");
        assert_eq!(failure.line, 1);
        assert_eq!(report.metrics.health, 0);
        assert_eq!(report.grade.correctness, 20);
        assert!(report.behavior.is_empty());
        assert_eq!(report.behavior_accuracy, 0);
    }

    #[test]
    fn declared_entry_overrides_scan() {
        let report = audit("def broken(:\n", Some("custom"), &AuditConfig::default());
        assert_eq!(report.entry_point, "custom");
    }
}
