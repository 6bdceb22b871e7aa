use serde_json::Value;

use super::schema;
use super::{ScoreTolerances, ValidationResult};
use crate::audit::domain::{CandidateAudit, CategoryEntry, ConfidenceLevel};

/// Walks a candidate scorecard against the schema registry and reports every
/// deviation as data. This never fails: malformed shapes become findings.
/// The one short-circuit is a candidate missing any mandatory top-level
/// field, which returns immediately with only those errors.
pub(super) fn validate_candidate(
    candidate: &CandidateAudit,
    tolerances: &ScoreTolerances,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    if candidate.overall_score.is_none() {
        result.add_error("overallScore", "missing required field: overallScore");
    }
    if candidate.grade.is_none() {
        result.add_error("grade", "missing required field: grade");
    }
    if candidate.category_breakdown.is_none() {
        result.add_error(
            "categoryBreakdown",
            "missing required field: categoryBreakdown",
        );
    }
    if !result.is_valid() {
        return result;
    }

    let overall = check_overall_score(candidate, &mut result);
    check_grade(candidate, overall, &mut result);

    let category_total = check_categories(candidate, tolerances, &mut result);

    // Category scores should reconcile with the stated overall, within a
    // tolerance that absorbs rounding across seven categories.
    if let Some(overall) = overall {
        if (category_total - overall).abs() > tolerances.overall {
            result.add_warning(
                "overallScore",
                format!(
                    "category total ({category_total}) doesn't match overall score ({overall})"
                ),
            );
        }
    }

    for section in schema::OPTIONAL_SECTIONS {
        if !candidate.sections.contains_key(*section) {
            result.add_warning(*section, format!("missing optional section: {section}"));
        }
    }

    result
}

fn check_overall_score(candidate: &CandidateAudit, result: &mut ValidationResult) -> Option<f64> {
    // Presence was established by the short-circuit gate above.
    let value = candidate.overall_score.as_ref()?;
    match value.as_f64() {
        None => {
            result.add_error(
                "overallScore",
                format!("score must be a number, got {}", json_type(value)),
            );
            None
        }
        Some(score) => {
            if !(0.0..=f64::from(schema::FULL_SCALE)).contains(&score) {
                result.add_error("overallScore", format!("score must be 0-100, got {score}"));
            }
            Some(score)
        }
    }
}

fn check_grade(candidate: &CandidateAudit, overall: Option<f64>, result: &mut ValidationResult) {
    let label = candidate.grade_label();
    match label {
        Some(label) if schema::is_known_grade(label) => {}
        _ => {
            let shown = label
                .map(str::to_string)
                .unwrap_or_else(|| candidate.grade.as_ref().map(Value::to_string).unwrap_or_default());
            result.add_error(
                "grade",
                format!("invalid grade '{shown}', must be one of the letter grades A through F"),
            );
        }
    }

    // Grade and score are produced independently by the source, so a
    // mismatch is soft: either side could be the more correct one.
    if let (Some(score), Some(band)) = (overall, label.and_then(schema::band_for_grade)) {
        if !band.contains(score) {
            result.add_warning(
                "grade",
                format!(
                    "grade '{}' expects score {}-{}, but score is {score}",
                    band.label, band.min, band.max
                ),
            );
        }
    }
}

/// Checks every schema-declared category (so omissions are flagged) and
/// returns the running total of the category scores as stated.
fn check_categories(
    candidate: &CandidateAudit,
    tolerances: &ScoreTolerances,
    result: &mut ValidationResult,
) -> f64 {
    let Some(breakdown) = candidate.category_breakdown.as_ref() else {
        return 0.0;
    };

    let mut category_total = 0.0;

    for spec in schema::CATEGORIES {
        let path = format!("categoryBreakdown.{}", spec.key);
        let Some(entry) = breakdown.get(spec.key) else {
            result.add_error(path, format!("missing category: {}", spec.key));
            continue;
        };

        let score = check_category_score(entry, spec.max_points, &path, result);
        category_total += score;

        check_stated_max_points(entry, spec.max_points, &path, result);
        check_confidence_level(entry, &path, result);

        if !spec.sub_scores.is_empty() {
            check_sub_scores(entry, spec, score, &path, tolerances, result);
        }
    }

    category_total
}

fn check_category_score(
    entry: &CategoryEntry,
    max_points: u8,
    path: &str,
    result: &mut ValidationResult,
) -> f64 {
    let field = format!("{path}.score");
    match entry.score.as_ref() {
        // An absent score reads as zero, matching the scale's floor.
        None => 0.0,
        Some(value) => match value.as_f64() {
            None => {
                result.add_error(
                    field,
                    format!("score must be a number, got {}", json_type(value)),
                );
                0.0
            }
            Some(score) => {
                if score < 0.0 {
                    result.add_error(field, format!("score cannot be negative: {score}"));
                } else if score > f64::from(max_points) {
                    result.add_error(
                        field,
                        format!("score {score} exceeds max points {max_points}"),
                    );
                }
                // Out-of-range values still flow into the total so the
                // overall reconciliation reflects what was actually stated.
                score
            }
        },
    }
}

fn check_stated_max_points(
    entry: &CategoryEntry,
    max_points: u8,
    path: &str,
    result: &mut ValidationResult,
) {
    // The field is informational; a mismatch cannot corrupt the score.
    let stated = entry
        .max_points
        .as_ref()
        .and_then(Value::as_f64)
        .unwrap_or(0.0);
    if stated != f64::from(max_points) {
        result.add_warning(
            format!("{path}.maxPoints"),
            format!("maxPoints should be {max_points}, got {stated}"),
        );
    }
}

fn check_confidence_level(entry: &CategoryEntry, path: &str, result: &mut ValidationResult) {
    let label = entry.confidence_level.as_ref().and_then(Value::as_str);
    if label.and_then(ConfidenceLevel::from_label).is_none() {
        result.add_warning(
            format!("{path}.confidenceLevel"),
            format!(
                "invalid confidence '{}', should be high/medium/low",
                label.unwrap_or_default()
            ),
        );
    }
}

fn check_sub_scores(
    entry: &CategoryEntry,
    spec: &schema::CategorySpec,
    category_score: f64,
    path: &str,
    tolerances: &ScoreTolerances,
    result: &mut ValidationResult,
) {
    // Sub-scores are advisory detail; the category score stays authoritative.
    let Some(sub_scores) = entry.sub_scores.as_ref() else {
        return;
    };

    let mut sub_total = 0.0;

    for sub in spec.sub_scores {
        let field = format!("{path}.subScores.{}", sub.key);
        let Some(value) = sub_scores.get(sub.key) else {
            result.add_warning(field, format!("missing sub-score: {}", sub.key));
            continue;
        };
        match value.as_f64() {
            None => result.add_error(field, "sub-score must be a number"),
            Some(sub_value) => {
                if sub_value < 0.0 || sub_value > f64::from(sub.max_points) {
                    result.add_warning(
                        field,
                        format!("sub-score {sub_value} should be 0-{}", sub.max_points),
                    );
                } else {
                    sub_total += sub_value;
                }
            }
        }
    }

    if (sub_total - category_score).abs() > tolerances.sub_score {
        result.add_warning(
            path,
            format!(
                "sub-scores sum ({sub_total}) doesn't match category score ({category_score})"
            ),
        );
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
