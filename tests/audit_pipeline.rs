use async_trait::async_trait;
use serde_json::json;

use presence_audit::audit::domain::{BusinessFacts, SocialHandles};
use presence_audit::audit::fixtures::FixtureGateway;
use presence_audit::audit::generation::{
    AuditGenerator, CompletionGateway, GatewayError, RetryPolicy, SystemPrompt,
};
use presence_audit::audit::score::{schema, ScoreAuditor};
use presence_audit::audit::AuditPipeline;

/// Gateway that always answers with the same canned completion text.
#[derive(Debug)]
struct CannedGateway(String);

#[async_trait]
impl CompletionGateway for CannedGateway {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_message: &str,
    ) -> Result<String, GatewayError> {
        Ok(self.0.clone())
    }
}

fn facts() -> BusinessFacts {
    BusinessFacts {
        business_name: "Atlas Plumbing Co".to_string(),
        website_url: Some("https://atlasplumbing.example".to_string()),
        industry: Some("home services".to_string()),
        location: Some("Cedar Rapids, IA".to_string()),
        business_age: Some("12 years".to_string()),
        phone_number: Some("555-0172".to_string()),
        social_handles: SocialHandles::default(),
    }
}

fn pipeline_with(gateway: Box<dyn CompletionGateway>) -> AuditPipeline {
    let generator = AuditGenerator::new(
        gateway,
        SystemPrompt::from_text("You are an auditor."),
        RetryPolicy::default(),
    );
    AuditPipeline::new(generator, ScoreAuditor::default())
}

/// Completion with an out-of-range category and a fabricated overall/grade.
fn inconsistent_completion() -> String {
    json!({
        "overallScore": 110,
        "grade": "A",
        "categoryBreakdown": {
            "websiteTechnicalSEO": { "score": 30, "maxPoints": 25, "confidenceLevel": "high" },
            "brandClarity": { "score": 10, "maxPoints": 12, "confidenceLevel": "medium" },
            "localSEO": { "score": 12, "maxPoints": 18, "confidenceLevel": "medium" },
            "socialPresence": { "score": 9, "maxPoints": 16, "confidenceLevel": "low" },
            "trustAuthority": { "score": 11, "maxPoints": 15, "confidenceLevel": "medium" },
            "performanceUX": { "score": 6, "maxPoints": 8, "confidenceLevel": "high" },
            "growthReadiness": { "score": 4, "maxPoints": 6, "confidenceLevel": "high" }
        },
        "executiveSummary": "Solid fundamentals, inflated totals."
    })
    .to_string()
}

#[tokio::test]
async fn invalid_candidates_come_back_corrected() {
    let pipeline = pipeline_with(Box::new(CannedGateway(inconsistent_completion())));

    let outcome = pipeline.run(&facts()).await.expect("pipeline runs");

    assert!(outcome.corrected);
    assert!(!outcome.validation.is_valid(), "original findings are preserved");
    assert!(outcome
        .validation
        .errors()
        .iter()
        .any(|issue| issue.field == "categoryBreakdown.websiteTechnicalSEO.score"));

    // 25 (clamped) + 10 + 12 + 9 + 11 + 6 + 4
    assert_eq!(outcome.audit.overall_score_value(), Some(77.0));
    assert_eq!(outcome.audit.grade_label(), Some("B"));

    let breakdown = outcome
        .audit
        .category_breakdown
        .as_ref()
        .expect("breakdown kept");
    let total: f64 = schema::CATEGORIES
        .iter()
        .filter_map(|spec| breakdown.get(spec.key))
        .filter_map(|entry| entry.score_value())
        .sum();
    assert_eq!(outcome.audit.overall_score_value(), Some(total));

    // The corrected scorecard has no residual errors.
    let recheck = ScoreAuditor::default().validate(&outcome.audit);
    assert!(recheck.is_valid(), "{:?}", recheck.errors());
}

#[tokio::test]
async fn valid_candidates_pass_through_unmodified() {
    let completion = json!({
        "overallScore": 41,
        "grade": "F",
        "categoryBreakdown": {
            "websiteTechnicalSEO": { "score": 10, "maxPoints": 25, "confidenceLevel": "low" },
            "brandClarity": { "score": 5, "maxPoints": 12, "confidenceLevel": "medium" },
            "localSEO": { "score": 7, "maxPoints": 18, "confidenceLevel": "low" },
            "socialPresence": { "score": 6, "maxPoints": 16, "confidenceLevel": "low" },
            "trustAuthority": { "score": 7, "maxPoints": 15, "confidenceLevel": "medium" },
            "performanceUX": { "score": 4, "maxPoints": 8, "confidenceLevel": "high" },
            "growthReadiness": { "score": 2, "maxPoints": 6, "confidenceLevel": "high" }
        }
    })
    .to_string();
    let pipeline = pipeline_with(Box::new(CannedGateway(completion)));

    let outcome = pipeline.run(&facts()).await.expect("pipeline runs");

    assert!(!outcome.corrected);
    assert!(outcome.validation.is_valid());
    assert_eq!(outcome.audit.overall_score_value(), Some(41.0));
    assert_eq!(outcome.audit.grade_label(), Some("F"));
    // Missing narrative sections are surfaced but never block use.
    assert!(!outcome.validation.warnings().is_empty());
}

#[tokio::test]
async fn fixture_gateway_drives_the_pipeline_without_network() {
    let pipeline = pipeline_with(Box::new(FixtureGateway));

    let outcome = pipeline.run(&facts()).await.expect("pipeline runs");

    assert!(!outcome.corrected);
    assert!(outcome.validation.is_valid());
    assert!(outcome.validation.warnings().is_empty());

    let rerun = pipeline.run(&facts()).await.expect("pipeline runs again");
    assert_eq!(outcome.audit, rerun.audit, "fixtures are deterministic");
}
