use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::audit::domain::CandidateAudit;
use crate::audit::score::schema::REQUIRED_FIELDS;

/// Why a completion's text could not be turned into a candidate audit. All
/// variants are retried identically; they exist for diagnostics.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExtractError {
    #[error("empty completion text")]
    Empty,
    #[error("completion did not contain parseable JSON: {0}")]
    Json(String),
    #[error("completion JSON missing required fields: {0}")]
    MissingFields(String),
    #[error("completion JSON did not match the audit shape: {0}")]
    Shape(String),
}

fn fenced_json() -> &'static Regex {
    static FENCED: OnceLock<Regex> = OnceLock::new();
    FENCED.get_or_init(|| {
        Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced-json pattern is valid")
    })
}

/// Best-effort extraction of a candidate audit from raw completion text:
/// strict JSON parse first, then the interior of a ```json fenced block,
/// then a mandatory-key presence check before the typed conversion.
pub(crate) fn candidate_from_text(raw: &str) -> Result<CandidateAudit, ExtractError> {
    if raw.trim().is_empty() {
        return Err(ExtractError::Empty);
    }

    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(strict_err) => {
            let Some(captures) = fenced_json().captures(raw) else {
                return Err(ExtractError::Json(strict_err.to_string()));
            };
            serde_json::from_str(&captures[1])
                .map_err(|err| ExtractError::Json(err.to_string()))?
        }
    };

    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|key| value.get(key).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(ExtractError::MissingFields(missing.join(", ")));
    }

    serde_json::from_value(value).map_err(|err| ExtractError::Shape(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str =
        r#"{"overallScore": 70, "grade": "B-", "categoryBreakdown": {}}"#;

    #[test]
    fn strict_json_parses_directly() {
        let audit = candidate_from_text(MINIMAL).expect("strict parse");
        assert_eq!(audit.overall_score_value(), Some(70.0));
        assert_eq!(audit.grade_label(), Some("B-"));
    }

    #[test]
    fn fenced_block_is_salvaged_from_surrounding_prose() {
        let raw = format!("Here you go:\n```json\n{MINIMAL}\n```\nLet me know!");
        let audit = candidate_from_text(&raw).expect("fenced parse");
        assert_eq!(audit.overall_score_value(), Some(70.0));
    }

    #[test]
    fn missing_mandatory_keys_are_rejected() {
        let raw = r#"{"overallScore": 70, "grade": "B-"}"#;
        match candidate_from_text(raw) {
            Err(ExtractError::MissingFields(fields)) => {
                assert_eq!(fields, "categoryBreakdown");
            }
            other => panic!("expected missing-fields error, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_text_is_rejected() {
        assert!(matches!(
            candidate_from_text("the site looks great, solid B+"),
            Err(ExtractError::Json(_))
        ));
        assert!(matches!(candidate_from_text("   "), Err(ExtractError::Empty)));
    }

    #[test]
    fn non_object_breakdown_fails_typed_extraction() {
        let raw = r#"{"overallScore": 70, "grade": "B-", "categoryBreakdown": "none"}"#;
        assert!(matches!(
            candidate_from_text(raw),
            Err(ExtractError::Shape(_))
        ));
    }
}
