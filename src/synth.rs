//! Test-case synthesis from the entry point's declared arity.
//!
//! A narrow heuristic generator tuned for the common introductory
//! exercise shapes (pair lookup, collection scan), explicitly not a
//! fuzzer. Always produces a finite, eager battery of at least one case.

use crate::models::TestCase;
use regex::Regex;
use serde_json::json;
use std::sync::OnceLock;

static SIGNATURE_RE: OnceLock<Regex> = OnceLock::new();

fn signature_re() -> &'static Regex {
    SIGNATURE_RE.get_or_init(|| Regex::new(r"def\s+(\w+)\s*\(([^)]*)\)\s*:").expect("signature regex"))
}

/// Count declared parameters of `function_name`, if its signature can
/// be located in the source.
fn parameter_count(source: &str, function_name: &str) -> Option<usize> {
    signature_re()
        .captures_iter(source)
        .find(|caps| &caps[1] == function_name)
        .map(|caps| {
            caps[2]
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .count()
        })
}

/// Derive the battery for `function_name`.
///
/// Two-parameter functions get the pair-lookup pair (populated +
/// empty/zero-target); any other located arity gets a populated
/// collection and an empty collection, with no output expectation.
/// An unlocatable function falls back to one script-style case.
pub fn synthesize(source: &str, function_name: &str) -> Vec<TestCase> {
    let Some(count) = parameter_count(source, function_name) else {
        return vec![TestCase {
            name: "Generic Execution".to_string(),
            args: None,
            expected: None,
        }];
    };

    if count == 2 {
        vec![
            TestCase {
                name: "Standard Vector".to_string(),
                args: Some(vec![json!([2, 7, 11, 15]), json!(9)]),
                expected: Some("[0, 1]".to_string()),
            },
            TestCase {
                name: "Empty/Null Edge".to_string(),
                args: Some(vec![json!([]), json!(0)]),
                expected: Some("[]".to_string()),
            },
        ]
    } else {
        vec![
            TestCase {
                name: "Standard Vector".to_string(),
                args: Some(vec![json!([1, 2, 3])]),
                expected: None,
            },
            TestCase {
                name: "Empty/Null Edge".to_string(),
                args: Some(vec![json!([])]),
                expected: None,
            },
        ]
    }
}
