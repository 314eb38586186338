//! JSON reporter
//!
//! Serializes the full AuditReport; this is the stable machine contract
//! consumed by dashboards, document generators, and session stores.
//! Consumers with narrower encodings are expected to drop or escape
//! characters on their side; the schema itself is plain UTF-8 JSON.

use crate::models::AuditReport;
use anyhow::Result;

/// Render the report as pretty-printed JSON.
pub fn render(report: &AuditReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render the report as compact JSON (single line).
#[allow(dead_code)] // Public API helper
pub fn render_compact(report: &AuditReport) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn render_produces_valid_json() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["grade"]["verdict"], "elite");
        assert_eq!(parsed["grade"]["total_score"], 97);
        assert_eq!(parsed["behavior"][0]["verdict"], "pass");
    }

    #[test]
    fn compact_render_is_single_line() {
        let json_str = render_compact(&test_report()).expect("render compact JSON");
        assert!(!json_str.contains('\n'));
        let _: serde_json::Value = serde_json::from_str(&json_str).expect("parse compact JSON");
    }

    #[test]
    fn schema_round_trips() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let decoded: AuditReport = serde_json::from_str(&json_str).expect("decode report");
        assert_eq!(decoded, report);
    }
}
