mod extract;
mod groq;
mod prompt;

pub use extract::ExtractError;
pub use groq::GroqGateway;
pub use prompt::SystemPrompt;

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::audit::domain::{BusinessFacts, CandidateAudit};
use crate::config::GenerationConfig;

/// Seam to the external text-generation service. Implementations own the
/// transport; the generator owns timeout, retry, and extraction.
#[async_trait]
pub trait CompletionGateway: Debug + Send + Sync {
    async fn complete(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, GatewayError>;
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("completion transport failed: {0}")]
    Transport(String),
    #[error("completion service rejected the request: {0}")]
    Api(String),
}

/// Surfaced when every generation attempt is exhausted. The caller's remedy
/// is the same for all variants (treat the service as unavailable); the
/// variants keep the diagnostic message informative.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("generation attempt timed out after {0:?}")]
    Timeout(Duration),
    #[error("completion backend error: {0}")]
    Backend(#[from] GatewayError),
    #[error("malformed completion: {0}")]
    Malformed(#[from] ExtractError),
    #[error("generation was configured with zero attempts")]
    NoAttempts,
}

/// Per-request retry policy. The defaults mirror the service's historical
/// behavior (three attempts, 30s per attempt, backoff of 2^n seconds); they
/// are policy, not domain law.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempt_timeout: Duration,
    pub max_attempts: u32,
    pub backoff_base: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempt_timeout: Duration::from_secs(30),
            max_attempts: 3,
            backoff_base: 2,
        }
    }
}

impl From<&GenerationConfig> for RetryPolicy {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            attempt_timeout: config.attempt_timeout,
            max_attempts: config.max_attempts,
            backoff_base: config.backoff_base,
        }
    }
}

/// Produces a candidate audit from one logical generation request, riding
/// out transport failures, timeouts, and malformed completions with bounded
/// sequential retries. Holds no mutable state; safe to share across callers.
#[derive(Debug)]
pub struct AuditGenerator {
    gateway: Box<dyn CompletionGateway>,
    system_prompt: SystemPrompt,
    policy: RetryPolicy,
}

impl AuditGenerator {
    pub fn new(
        gateway: Box<dyn CompletionGateway>,
        system_prompt: SystemPrompt,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            gateway,
            system_prompt,
            policy,
        }
    }

    pub async fn generate(
        &self,
        facts: &BusinessFacts,
    ) -> Result<CandidateAudit, GenerationError> {
        let user_message = prompt::user_message(facts);
        let mut last_failure: Option<GenerationError> = None;

        for attempt in 0..self.policy.max_attempts {
            match self.attempt(&user_message).await {
                Ok(candidate) => {
                    debug!(attempt, "generation attempt succeeded");
                    return Ok(candidate);
                }
                Err(failure) => {
                    warn!(attempt, %failure, "generation attempt failed");
                    last_failure = Some(failure);
                }
            }

            // Back off between rounds, never after the last one.
            if attempt + 1 < self.policy.max_attempts {
                let delay =
                    Duration::from_secs(self.policy.backoff_base.saturating_pow(attempt + 1));
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_failure.unwrap_or(GenerationError::NoAttempts))
    }

    async fn attempt(&self, user_message: &str) -> Result<CandidateAudit, GenerationError> {
        let call = self.gateway.complete(self.system_prompt.as_str(), user_message);
        let raw = tokio::time::timeout(self.policy.attempt_timeout, call)
            .await
            .map_err(|_| GenerationError::Timeout(self.policy.attempt_timeout))??;

        Ok(extract::candidate_from_text(&raw)?)
    }
}
