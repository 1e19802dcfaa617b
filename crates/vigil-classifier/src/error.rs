//! Error types for the Batch Classifier

use thiserror::Error;

/// Errors that can occur while classifying a batch
///
/// Inside `process_batch` these are attempt failures: they are retried and
/// finally degrade to error verdicts rather than propagating.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Response is not the expected array of verdict objects
    #[error("Invalid verdict format: {0}")]
    InvalidFormat(String),

    /// Response is not valid JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Response has fewer verdicts than comments sent
    #[error("Expected {expected} verdicts, got {actual}")]
    CountMismatch {
        /// Number of comments sent
        expected: usize,
        /// Number of verdicts returned
        actual: usize,
    },

    /// Pre-filter could not be built
    #[error("Pre-filter error: {0}")]
    Prefilter(#[from] vigil_prefilter::PrefilterError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ClassifierError {
    fn from(e: serde_json::Error) -> Self {
        ClassifierError::JsonParse(e.to_string())
    }
}
