//! Report renderers over the stable audit schema.

pub mod json;
pub mod text;

#[cfg(test)]
pub(crate) mod tests {
    use crate::models::*;

    /// A plausible mid-grade report for renderer tests.
    pub fn test_report() -> AuditReport {
        AuditReport {
            parse_error: None,
            metrics: StructuralMetrics {
                loop_count: 1,
                function_count: 1,
                max_nesting_depth: 2,
                complexity_score: 3,
                long_functions: vec![],
                dead_code_hints: vec![],
                issues: vec![],
                complexity_class: ComplexityClass::Linear,
                health: 90,
            },
            origin: OriginAssessment {
                ai_probability: 40,
                human_probability: 60,
                reasons: vec!["Zero debugging traces detected".to_string()],
                disclaimer: crate::origin::DISCLAIMER.to_string(),
            },
            difficulty: DifficultyRating {
                level: "Beginner".to_string(),
                label: "Easy".to_string(),
            },
            entry_point: "two_sum".to_string(),
            behavior: vec![AuditEntry {
                case: TestCase {
                    name: "Standard Vector".to_string(),
                    args: Some(vec![serde_json::json!([2, 7, 11, 15]), serde_json::json!(9)]),
                    expected: Some("[0, 1]".to_string()),
                },
                outcome: ExecutionOutcome {
                    status: ExecStatus::Success,
                    output: "[0, 1]".to_string(),
                    runtime_ms: 0.42,
                    error: None,
                },
                verdict: TestVerdict::Pass,
            }],
            behavior_accuracy: 100,
            grade: CompositeGrade {
                correctness: 100,
                efficiency: 100,
                readability: 80,
                behavior_accuracy: 100,
                total_score: 97,
                complexity_label: "O(N) [Elite]".to_string(),
                verdict: Verdict::Elite,
                suggestions: vec![
                    "Documentation gap: add a docstring to explain the 'why' of this function."
                        .to_string(),
                ],
            },
            hints: vec!["Code looks professional.".to_string()],
        }
    }
}
