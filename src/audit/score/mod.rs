mod correct;
mod report;
pub mod schema;
mod validate;

#[cfg(test)]
mod tests;

pub use correct::correct_scores;
pub use report::render_validation_report;

use serde::{Deserialize, Serialize};

use crate::audit::domain::CandidateAudit;
use crate::config::ScoringConfig;

/// Severity of a single validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// One deviation from the scoring schema, located by a dotted field path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

/// Outcome of one validation pass. Errors make the candidate unusable as-is;
/// warnings are surfaced but never block downstream use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<ValidationIssue>,
    warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub(crate) fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        });
        self.is_valid = false;
    }

    pub(crate) fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        });
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[ValidationIssue] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ValidationIssue] {
        &self.warnings
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconciliation tolerances: how far sub-score and category totals may
/// drift from their parent figure before a warning is raised. Empirical
/// policy, carried as configuration rather than constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTolerances {
    pub sub_score: f64,
    pub overall: f64,
}

impl Default for ScoreTolerances {
    fn default() -> Self {
        Self {
            sub_score: 1.0,
            overall: 2.0,
        }
    }
}

impl From<&ScoringConfig> for ScoreTolerances {
    fn from(config: &ScoringConfig) -> Self {
        Self {
            sub_score: config.sub_score_tolerance,
            overall: config.overall_tolerance,
        }
    }
}

/// Stateless engine that checks a candidate scorecard against the schema
/// registry under the configured tolerances.
#[derive(Debug, Clone, Default)]
pub struct ScoreAuditor {
    tolerances: ScoreTolerances,
}

impl ScoreAuditor {
    pub fn new(tolerances: ScoreTolerances) -> Self {
        Self { tolerances }
    }

    pub fn validate(&self, candidate: &CandidateAudit) -> ValidationResult {
        validate::validate_candidate(candidate, &self.tolerances)
    }
}
