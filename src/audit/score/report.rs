use std::fmt::Write as _;

use super::ValidationResult;

const BANNER: &str = "==================================================";
const RULE: &str = "------------------------------";

/// Renders a validation result as human-readable text for logs and
/// diagnostics.
pub fn render_validation_report(result: &ValidationResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "AUDIT VALIDATION REPORT");
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out);

    if result.is_valid() {
        let _ = writeln!(out, "+ Audit passed validation");
    } else {
        let _ = writeln!(out, "x Audit FAILED validation");
    }

    if !result.errors().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "ERRORS ({}):", result.errors().len());
        let _ = writeln!(out, "{RULE}");
        for issue in result.errors() {
            let _ = writeln!(out, "  x [{}] {}", issue.field, issue.message);
        }
    }

    if !result.warnings().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "WARNINGS ({}):", result.warnings().len());
        let _ = writeln!(out, "{RULE}");
        for issue in result.warnings() {
            let _ = writeln!(out, "  ! [{}] {}", issue.field, issue.message);
        }
    }

    if result.errors().is_empty() && result.warnings().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "No issues found.");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{BANNER}");

    out
}
