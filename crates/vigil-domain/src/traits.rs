//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the moderation pipeline and
//! infrastructure. Implementations live in other crates.

use crate::{ResultRecord, Verdict};

/// Trait for the external generative language service
///
/// Implemented by the infrastructure layer (vigil-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a text completion for a single prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the model behind this provider
    fn model_name(&self) -> &str {
        "llm"
    }
}

/// Trait for classifying one batch of comments
///
/// Implemented by the application layer (vigil-classifier). The returned
/// verdicts must have the same length and order as `texts`.
pub trait BatchClassifier {
    /// Error type for classification operations
    type Error;

    /// Classify a batch of comment texts
    fn classify_batch(&mut self, texts: &[String]) -> Result<Vec<Verdict>, Self::Error>;
}

/// Trait for persisting the accumulated result table
///
/// Implemented by the infrastructure layer (vigil-store). Each call replaces
/// whatever the sink held before with the full set of `records`.
pub trait ResultSink {
    /// Error type for persistence operations
    type Error;

    /// Overwrite the sink with `records`
    fn save(&mut self, records: &[ResultRecord]) -> Result<(), Self::Error>;
}

/// Decides whether a failed classification attempt should be retried
///
/// Replaces an interactive "retry? (y/n)" prompt so that tests and
/// unattended runs can drive both branches.
pub trait RetryPolicy {
    /// Called after failed attempt number `attempt` (1-based) when attempts
    /// remain. Returning `false` stops retrying immediately.
    fn decide_retry(&mut self, attempt: u32, max_attempts: u32, error: &str) -> bool;
}

impl<P: RetryPolicy + ?Sized> RetryPolicy for Box<P> {
    fn decide_retry(&mut self, attempt: u32, max_attempts: u32, error: &str) -> bool {
        (**self).decide_retry(attempt, max_attempts, error)
    }
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    type Error = S::Error;

    fn save(&mut self, records: &[ResultRecord]) -> Result<(), Self::Error> {
        (**self).save(records)
    }
}
