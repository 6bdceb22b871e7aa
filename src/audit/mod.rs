pub mod domain;
pub mod fixtures;
pub mod generation;
pub mod score;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::{AppConfig, AppEnvironment};
use crate::error::AppError;
use domain::{BusinessFacts, CandidateAudit};
use fixtures::FixtureGateway;
use generation::{AuditGenerator, GenerationError, GroqGateway, RetryPolicy, SystemPrompt};
use score::{correct_scores, ScoreAuditor, ScoreTolerances, ValidationResult};

/// What one pipeline run hands to downstream collaborators: the audit (post
/// correction when validation found errors), the validation findings for
/// diagnostics, and when the scorecard was produced.
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub audit: CandidateAudit,
    pub validation: ValidationResult,
    pub corrected: bool,
    pub generated_at: DateTime<Utc>,
}

/// Generate → validate → correct, end to end. Construction is explicit
/// dependency injection; there is no process-wide client singleton.
#[derive(Debug)]
pub struct AuditPipeline {
    generator: AuditGenerator,
    auditor: ScoreAuditor,
}

impl AuditPipeline {
    pub fn new(generator: AuditGenerator, auditor: ScoreAuditor) -> Self {
        Self { generator, auditor }
    }

    /// Builds the pipeline from configuration: the Groq gateway in normal
    /// environments, the deterministic fixture gateway in the test
    /// environment (no credentials, no network).
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let system_prompt = SystemPrompt::load(&config.generation.system_prompt_path)?;
        let gateway: Box<dyn generation::CompletionGateway> =
            match config.environment {
                AppEnvironment::Test => Box::new(FixtureGateway),
                _ => Box::new(GroqGateway::new(&config.generation)),
            };
        let generator = AuditGenerator::new(
            gateway,
            system_prompt,
            RetryPolicy::from(&config.generation),
        );
        let auditor = ScoreAuditor::new(ScoreTolerances::from(&config.scoring));
        Ok(Self::new(generator, auditor))
    }

    pub async fn run(&self, facts: &BusinessFacts) -> Result<AuditOutcome, GenerationError> {
        let candidate = self.generator.generate(facts).await?;

        let validation = self.auditor.validate(&candidate);
        let (audit, corrected) = if validation.is_valid() {
            (candidate, false)
        } else {
            warn!(
                business = %facts.business_name,
                errors = validation.errors().len(),
                warnings = validation.warnings().len(),
                "candidate audit failed validation, applying score correction"
            );
            (correct_scores(&candidate), true)
        };

        info!(
            business = %facts.business_name,
            corrected,
            warnings = validation.warnings().len(),
            "audit generated"
        );

        Ok(AuditOutcome {
            audit,
            validation,
            corrected,
            generated_at: Utc::now(),
        })
    }
}

/// Convenience entry point: load configuration, assemble the pipeline, run
/// one audit.
pub async fn run_audit(facts: &BusinessFacts) -> Result<AuditOutcome, AppError> {
    let config = AppConfig::load()?;
    let pipeline = AuditPipeline::from_config(&config)?;
    Ok(pipeline.run(facts).await?)
}
