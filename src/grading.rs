//! Composite grading: static metrics + behavioral accuracy into one
//! weighted score, a categorical verdict, and a suggestion list.
//!
//! Weights and thresholds are fixed contract, boundary-inclusive as
//! written: 0.40 correctness, 0.30 efficiency, 0.15 readability,
//! 0.15 behavior; total >= 85 Elite, >= 55 Modest, else Critical.

use crate::analyzer;
use crate::models::{CompositeGrade, StructuralMetrics, Verdict};

const WEIGHT_CORRECTNESS: f64 = 0.40;
const WEIGHT_EFFICIENCY: f64 = 0.30;
const WEIGHT_READABILITY: f64 = 0.15;
const WEIGHT_BEHAVIOR: f64 = 0.15;

pub fn verdict_for(total: u32) -> Verdict {
    if total >= 85 {
        Verdict::Elite
    } else if total >= 55 {
        Verdict::Modest
    } else {
        Verdict::Critical
    }
}

fn empty_grade() -> CompositeGrade {
    CompositeGrade {
        correctness: 0,
        efficiency: 0,
        readability: 0,
        behavior_accuracy: 0,
        total_score: 0,
        complexity_label: "O(1)".to_string(),
        verdict: Verdict::Empty,
        suggestions: vec![Verdict::Empty.description().to_string()],
    }
}

/// Grade the snippet. `parse_ok` is the binary correctness gate; the
/// metrics may be zeroed defaults when parsing failed.
pub fn grade(
    source: &str,
    parse_ok: bool,
    metrics: &StructuralMetrics,
    behavior_accuracy: u32,
) -> CompositeGrade {
    if source.trim().is_empty() {
        return empty_grade();
    }

    let correctness: u32 = if parse_ok { 100 } else { 20 };

    // Associative lookup plus flat control flow reads as the elite
    // single-pass shape; deep nesting reads as the quadratic rewrite
    // candidate.
    let nesting = metrics.max_nesting_depth;
    let has_hashmap = source.contains('{') || source.contains("dict(");
    let (efficiency, complexity_label) = if has_hashmap && nesting <= 2 {
        (100u32, "O(N) [Elite]".to_string())
    } else if nesting > 2 {
        (65u32, "O(N²)".to_string())
    } else {
        (100u32, "O(N)".to_string())
    };

    let has_docstring = analyzer::has_docstring(source);
    let readability: u32 = if has_docstring { 100 } else { 80 };

    let total = WEIGHT_CORRECTNESS * correctness as f64
        + WEIGHT_EFFICIENCY * efficiency as f64
        + WEIGHT_READABILITY * readability as f64
        + WEIGHT_BEHAVIOR * behavior_accuracy as f64;
    let total_score = total.round().clamp(0.0, 100.0) as u32;

    let mut suggestions = Vec::new();
    if nesting > 2 {
        suggestions.push(
            "Structural debt: logic is nested too deeply. Use guard clauses to flatten the flow."
                .to_string(),
        );
    }
    if !has_docstring {
        suggestions.push(
            "Documentation gap: add a docstring to explain the 'why' of this function."
                .to_string(),
        );
    }
    if suggestions.is_empty() {
        suggestions.push("Architecture is optimal. Code is elite.".to_string());
    }

    CompositeGrade {
        correctness,
        efficiency,
        readability,
        behavior_accuracy,
        total_score,
        complexity_label,
        verdict: verdict_for(total_score),
        suggestions,
    }
}
