//! Pattern-based refactor hints.
//!
//! Lexical scans over the raw source, advisory only and kept apart from
//! the graded suggestion list. Deterministic: insertion order, de-duped,
//! capped at four for readability.

use regex::Regex;
use std::sync::OnceLock;

const MAX_HINTS: usize = 4;

static RANGE_LEN_RE: OnceLock<Regex> = OnceLock::new();

fn range_len_re() -> &'static Regex {
    RANGE_LEN_RE.get_or_init(|| Regex::new(r"range\s*\(\s*len\s*\(").expect("range-len regex"))
}

pub fn refactor_hints(source: &str, parse_ok: bool) -> Vec<String> {
    if source.trim().is_empty() {
        return Vec::new();
    }
    if !parse_ok {
        return vec!["Suggestions unavailable: fix the syntax errors first.".to_string()];
    }

    let mut hints: Vec<String> = Vec::new();
    let mut push = |hint: &str| {
        if hints.len() < MAX_HINTS && !hints.iter().any(|existing| existing == hint) {
            hints.push(hint.to_string());
        }
    };

    let has_loop = source.contains("for ") || source.contains("while ");

    if range_len_re().is_match(source) {
        push("Consider `enumerate()` instead of `range(len())` for cleaner iteration.");
    }
    if source.contains(" += 1") && has_loop {
        push("Detected a manual counter. The Pythonic way is `enumerate()` or `zip()`.");
    }
    if source.contains(".append(") && source.contains("for ") {
        push("Simple loops with `.append()` can become list comprehensions.");
    }
    if source.contains("global ") {
        push("Avoid `global` variables; pass values as function arguments instead.");
    }
    if source.contains("open(") && !source.contains("with ") {
        push("Use `with open(...)` so file handles are always released.");
    }
    if source.contains(" in ")
        && (source.contains('[') || source.contains('('))
        && !source.contains('{')
    {
        push("For frequent membership checks, a `set()` is O(1) versus O(n) for a list.");
    }
    if source.contains("def ") && !source.contains("\"\"\"") && !source.contains("'''") {
        push("Add docstrings to your functions to make them production-ready.");
    }

    if hints.is_empty() {
        hints.push(
            "Code looks professional. Consider adding type hints (e.g. `a: int`) for extra clarity."
                .to_string(),
        );
    }
    hints
}
