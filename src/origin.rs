//! Origin assessment: does the snippet read machine- or human-authored?
//!
//! A single additive weighted-signal heuristic over lexical and
//! structural cues. Advisory only: the schema carries a disclaimer and
//! the probability is capped below certainty. Kept behind this narrow
//! module so a more rigorous classifier can replace it without touching
//! the rest of the pipeline.

use crate::models::{DifficultyRating, OriginAssessment, StructuralMetrics};
use regex::Regex;
use std::sync::OnceLock;

pub const DISCLAIMER: &str =
    "Heuristic estimate only; not an authoritative determination of authorship.";

/// Identifier names that template-generated code leans on.
const GENERIC_IDENTIFIERS: [&str; 7] =
    ["result", "temp", "data", "val", "output", "items", "element"];

/// Probability ceiling: a pattern match never claims certainty.
const AI_PROBABILITY_CAP: u32 = 95;

static DOCSTRING_RE: OnceLock<Regex> = OnceLock::new();
static TIGHT_COMMA_RE: OnceLock<Regex> = OnceLock::new();

fn docstring_re() -> &'static Regex {
    DOCSTRING_RE.get_or_init(|| {
        Regex::new(r#"(?s)("""|''').*?("""|''')"#).expect("docstring regex")
    })
}

fn tight_comma_re() -> &'static Regex {
    TIGHT_COMMA_RE.get_or_init(|| Regex::new(r",\S").expect("comma regex"))
}

pub fn assess(source: &str, metrics: &StructuralMetrics) -> OriginAssessment {
    if source.trim().is_empty() {
        return OriginAssessment {
            ai_probability: 0,
            human_probability: 100,
            reasons: vec!["Natural coding flow detected".to_string()],
            disclaimer: DISCLAIMER.to_string(),
        };
    }

    let lower = source.to_lowercase();
    let lines: Vec<&str> = source.lines().collect();
    let comment_lines = lines
        .iter()
        .filter(|l| l.trim_start().starts_with('#'))
        .count();
    let code_lines = lines
        .iter()
        .filter(|l| !l.trim().is_empty() && !l.trim_start().starts_with('#'))
        .count();

    let mut score = 0u32;
    let mut reasons = Vec::new();

    if docstring_re().is_match(source) {
        score += 25;
        reasons.push("Professional docstring usage detected".to_string());
    }

    let generic_hits = GENERIC_IDENTIFIERS
        .iter()
        .filter(|name| lower.contains(*name))
        .count();
    if generic_hits >= 3 {
        score += 20;
        reasons.push("Template-based variable naming".to_string());
    }

    if code_lines > 0 && comment_lines as f64 / code_lines as f64 > 0.4 {
        score += 15;
        reasons.push("Excessive comment density".to_string());
    }

    if !source.contains("print(") {
        score += 15;
        reasons.push("Zero debugging traces detected".to_string());
    }

    if !tight_comma_re().is_match(source) {
        score += 10;
        reasons.push("Uniformly clean formatting".to_string());
    }

    if metrics.function_count > 0 {
        let per_function = lines.len() as f64 / metrics.function_count as f64;
        if per_function < 15.0 {
            score += 15;
            reasons.push("High modularity".to_string());
        }
    }

    let ai_probability = score.min(AI_PROBABILITY_CAP);
    if reasons.is_empty() {
        reasons.push("Natural coding flow detected".to_string());
    }

    OriginAssessment {
        ai_probability,
        human_probability: 100 - ai_probability,
        reasons,
        disclaimer: DISCLAIMER.to_string(),
    }
}

/// Difficulty band for presentation layers: a coarse effort score over
/// structural counts and a couple of lexical cues.
pub fn rate_difficulty(source: &str, metrics: &StructuralMetrics) -> DifficultyRating {
    let mut score = metrics.loop_count * 15
        + metrics.max_nesting_depth * 20
        + metrics.function_count * 10;
    if source.contains("class ") {
        score += 40;
    }
    if source.contains("import ") {
        score += 5;
    }

    let (level, label) = if score <= 40 {
        ("Beginner", "Easy")
    } else if score <= 85 {
        ("Intermediate", "Medium")
    } else {
        ("Advanced", "Hard")
    };
    DifficultyRating {
        level: level.to_string(),
        label: label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer;

    fn metrics_for(source: &str) -> StructuralMetrics {
        analyzer::analyze(source).expect("parse")
    }

    #[test]
    fn polished_snippet_scores_high() {
        let source = "\"\"\"Pair lookup.\"\"\"\ndef pairs(items):\n    result = {}\n    data = []\n    output = []\n    return result\n";
        let metrics = metrics_for(source);
        let assessment = assess(source, &metrics);
        assert!(assessment.ai_probability >= 60);
        assert_eq!(
            assessment.human_probability,
            100 - assessment.ai_probability
        );
        assert!(assessment
            .reasons
            .iter()
            .any(|r| r.contains("docstring") || r.contains("Docstring")));
    }

    #[test]
    fn debug_prints_read_human() {
        let source = "x=1\nprint(x,2)\n";
        let metrics = metrics_for(source);
        let assessment = assess(source, &metrics);
        assert!(assessment.ai_probability < 50);
        assert!(!assessment.reasons.is_empty());
    }

    #[test]
    fn probability_never_exceeds_cap() {
        let source = "\"\"\"doc\"\"\"\ndef f(items):\n    result = 1\n    temp = 2\n    data = 3\n    val = 4\n    return result\n";
        let metrics = metrics_for(source);
        let assessment = assess(source, &metrics);
        assert!(assessment.ai_probability <= AI_PROBABILITY_CAP);
    }

    #[test]
    fn disclaimer_always_present() {
        let assessment = assess("", &StructuralMetrics::default());
        assert_eq!(assessment.disclaimer, DISCLAIMER);
        assert_eq!(assessment.ai_probability, 0);
    }

    #[test]
    fn difficulty_bands() {
        let simple = rate_difficulty("x = 1\n", &StructuralMetrics::default());
        assert_eq!(simple.level, "Beginner");

        let busy = StructuralMetrics {
            loop_count: 3,
            max_nesting_depth: 3,
            function_count: 2,
            ..Default::default()
        };
        let hard = rate_difficulty("class Widget:\n    pass\n", &busy);
        assert_eq!(hard.level, "Advanced");
    }
}
