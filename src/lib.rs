//! Resilient generation and score-integrity pipeline for digital presence
//! audits: a retrying LLM client that salvages JSON out of free-form
//! completions, plus a validator/corrector pair that keeps the scorecard
//! inside its schema invariants.

pub mod audit;
pub mod config;
pub mod error;
pub mod telemetry;
