use serde_json::{json, Map, Value};

use crate::audit::domain::CandidateAudit;
use crate::audit::score::schema;

/// A candidate with every category at its ceiling, sub-scores filled to
/// their ceilings, and every narrative section present: zero findings.
pub(super) fn perfect_audit() -> CandidateAudit {
    audit_from(perfect_value())
}

/// Raw JSON form of [`perfect_audit`], for tests that poke fields before
/// converting.
pub(super) fn perfect_value() -> Value {
    let mut breakdown = Map::new();
    for spec in schema::CATEGORIES {
        let mut entry = json!({
            "score": spec.max_points,
            "maxPoints": spec.max_points,
            "confidenceLevel": "high",
        });
        if !spec.sub_scores.is_empty() {
            let subs: Map<String, Value> = spec
                .sub_scores
                .iter()
                .map(|sub| (sub.key.to_string(), json!(sub.max_points)))
                .collect();
            entry["subScores"] = Value::Object(subs);
        }
        breakdown.insert(spec.key.to_string(), entry);
    }

    let mut root = json!({
        "overallScore": 100,
        "grade": "A",
        "categoryBreakdown": breakdown,
    });
    for section in schema::OPTIONAL_SECTIONS {
        root[*section] = json!("present");
    }

    root
}

pub(super) fn audit_from(value: Value) -> CandidateAudit {
    serde_json::from_value(value).expect("fixture deserializes into a candidate")
}
