//! Terminal text reporter
//!
//! A reference consumer of the audit schema: verdict header, metric
//! summary, battery table, and suggestions with console styling.

use crate::models::{AuditReport, TestVerdict, Verdict};
use console::style;
use std::fmt::Write;

pub fn render(report: &AuditReport) -> String {
    let mut out = String::new();

    let verdict = report.grade.verdict;
    let styled_verdict = match verdict {
        Verdict::Elite => style(verdict.to_string()).green().bold(),
        Verdict::Modest => style(verdict.to_string()).yellow().bold(),
        Verdict::Critical => style(verdict.to_string()).red().bold(),
        Verdict::Empty => style(verdict.to_string()).dim(),
    };

    let _ = writeln!(out, "{}", style("pygauge audit").cyan().bold());
    let _ = writeln!(
        out,
        "Verdict: {} ({}/100) - {}",
        styled_verdict,
        report.grade.total_score,
        verdict.description()
    );

    if let Some(failure) = &report.parse_error {
        let _ = writeln!(out, "{} {}", style("Parse error:").red(), failure);
    }

    let _ = writeln!(
        out,
        "Scores: correctness {}  efficiency {} ({})  readability {}  behavior {}%",
        report.grade.correctness,
        report.grade.efficiency,
        report.grade.complexity_label,
        report.grade.readability,
        report.grade.behavior_accuracy,
    );
    let _ = writeln!(
        out,
        "Structure: {} function(s), {} loop(s), nesting {}, complexity {}, est. {}, health {}",
        report.metrics.function_count,
        report.metrics.loop_count,
        report.metrics.max_nesting_depth,
        report.metrics.complexity_score,
        report.metrics.complexity_class,
        report.metrics.health,
    );
    let _ = writeln!(
        out,
        "Origin (advisory): {}% machine / {}% human - {}",
        report.origin.ai_probability,
        report.origin.human_probability,
        report.origin.reasons.join("; "),
    );
    let _ = writeln!(
        out,
        "Difficulty: {} ({})",
        report.difficulty.level, report.difficulty.label
    );

    if !report.metrics.issues.is_empty() {
        let _ = writeln!(out, "Issues:");
        for issue in &report.metrics.issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }

    if !report.behavior.is_empty() {
        let _ = writeln!(
            out,
            "Behavior ({}% accuracy, entry point `{}`):",
            report.behavior_accuracy, report.entry_point
        );
        for entry in &report.behavior {
            let marker = match entry.verdict {
                TestVerdict::Pass => style("PASS").green(),
                TestVerdict::Fail => style("FAIL").red(),
                TestVerdict::Error => style("ERROR").yellow(),
            };
            let _ = writeln!(
                out,
                "  [{}] {} -> {} ({:.2}ms)",
                marker, entry.case.name, entry.outcome.output, entry.outcome.runtime_ms
            );
        }
    }

    let _ = writeln!(out, "Suggestions:");
    for suggestion in &report.grade.suggestions {
        let _ = writeln!(out, "  - {suggestion}");
    }
    if !report.hints.is_empty() {
        let _ = writeln!(out, "Refactor hints:");
        for hint in &report.hints {
            let _ = writeln!(out, "  - {hint}");
        }
    }

    out
}
