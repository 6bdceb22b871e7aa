use serde_json::{Number, Value};

use super::schema;
use crate::audit::domain::CandidateAudit;

/// Deterministically repairs the numeric skeleton of a candidate scorecard:
/// clamps every schema category present in the input to its ceiling, rebuilds
/// the overall score as the sum of the clamped categories, and re-derives the
/// grade from that sum. Sub-scores, confidence levels, and narrative content
/// pass through untouched. Never calls the external model and cannot fail;
/// missing or non-numeric category scores read as zero.
pub fn correct_scores(candidate: &CandidateAudit) -> CandidateAudit {
    let mut corrected = candidate.clone();
    let mut total = 0.0;

    if let Some(breakdown) = corrected.category_breakdown.as_mut() {
        for spec in schema::CATEGORIES {
            // Absent categories contribute zero and are not synthesized.
            let Some(entry) = breakdown.get_mut(spec.key) else {
                continue;
            };
            let stated = entry.score.as_ref().and_then(Value::as_f64).unwrap_or(0.0);
            let clamped = stated.clamp(0.0, f64::from(spec.max_points));
            entry.score = Some(score_value(clamped));
            total += clamped;
        }
    }

    corrected.overall_score = Some(score_value(total));
    corrected.grade = Some(Value::String(schema::grade_for_score(total).to_string()));

    corrected
}

/// Whole values are emitted as JSON integers so corrected output reads like
/// the model's own (integer) scores.
fn score_value(score: f64) -> Value {
    if score.fract() == 0.0 && score >= 0.0 && score <= f64::from(schema::FULL_SCALE) {
        Value::Number(Number::from(score as i64))
    } else {
        Number::from_f64(score)
            .map(Value::Number)
            .unwrap_or_else(|| Value::Number(Number::from(0)))
    }
}
