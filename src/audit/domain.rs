use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Business facts supplied by the caller. The pipeline treats every field as
/// opaque text; sanitization happens upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessFacts {
    pub business_name: String,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub business_age: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub social_handles: SocialHandles,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialHandles {
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub tiktok: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub youtube: Option<String>,
}

/// An audit object as the completion service produced it, before any schema
/// check has confirmed it. Scored leaves stay as raw JSON values so the
/// validator can report a wrong type as a finding instead of refusing to
/// construct the record at all. Narrative sections and unrecognized fields
/// land in `sections` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateAudit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_breakdown: Option<BTreeMap<String, CategoryEntry>>,
    #[serde(flatten)]
    pub sections: Map<String, Value>,
}

impl CandidateAudit {
    /// Numeric overall score, when the field holds a number.
    pub fn overall_score_value(&self) -> Option<f64> {
        self.overall_score.as_ref().and_then(Value::as_f64)
    }

    /// Grade label, when the field holds a string.
    pub fn grade_label(&self) -> Option<&str> {
        self.grade.as_ref().and_then(Value::as_str)
    }
}

/// One category's slice of the scorecard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_points: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_scores: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CategoryEntry {
    pub fn score_value(&self) -> Option<f64> {
        self.score.as_ref().and_then(Value::as_f64)
    }
}

/// How much evidence backed a category's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }

    pub fn as_label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}
