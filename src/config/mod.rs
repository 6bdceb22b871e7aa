use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the audit pipeline.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub generation: GenerationConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let generation = GenerationConfig::load(environment)?;
        let scoring = ScoringConfig::load()?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            generation,
            scoring,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Settings for the external completion service and the retry policy around
/// it. Retry and timeout values are empirical policy, not domain law, so all
/// of them are overridable from the environment.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub attempt_timeout: Duration,
    pub max_attempts: u32,
    pub backoff_base: u64,
    pub system_prompt_path: PathBuf,
}

impl GenerationConfig {
    fn load(environment: AppEnvironment) -> Result<Self, ConfigError> {
        let api_key = match env::var("GROQ_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            // The fixture gateway never dials out, so the test environment
            // may run without credentials.
            _ if environment == AppEnvironment::Test => String::new(),
            _ => return Err(ConfigError::MissingApiKey),
        };

        Ok(Self {
            api_key,
            model: env::var("MODEL_NAME")
                .unwrap_or_else(|_| "llama-3.3-70b-versatile".to_string()),
            base_url: env::var("GROQ_BASE_URL")
                .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string()),
            temperature: parse_env("TEMPERATURE", 0.3)?,
            max_tokens: parse_env("MAX_TOKENS", 4096)?,
            attempt_timeout: Duration::from_secs(parse_env("TIMEOUT_SECONDS", 30)?),
            max_attempts: parse_env("RETRY_ATTEMPTS", 3)?,
            backoff_base: parse_env("RETRY_BACKOFF_BASE", 2)?,
            system_prompt_path: env::var("SYSTEM_PROMPT_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("config/system_prompt.txt")),
        })
    }
}

/// Reconciliation tolerances used by the score validator.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub sub_score_tolerance: f64,
    pub overall_tolerance: f64,
}

impl ScoringConfig {
    fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            sub_score_tolerance: parse_env("SUBSCORE_TOLERANCE", 1.0)?,
            overall_tolerance: parse_env("OVERALL_TOLERANCE", 2.0)?,
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { name, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    MissingApiKey,
    InvalidNumber { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingApiKey => {
                write!(f, "GROQ_API_KEY is required outside the test environment")
            }
            ConfigError::InvalidNumber { name, value } => {
                write!(f, "invalid numeric value '{value}' for {name}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing_defaults_to_development() {
        assert_eq!(AppEnvironment::from_str("prod"), AppEnvironment::Production);
        assert_eq!(AppEnvironment::from_str("CI"), AppEnvironment::Test);
        assert_eq!(AppEnvironment::from_str("staging"), AppEnvironment::Development);
    }
}
