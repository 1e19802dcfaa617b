//! Error type for the `vigil` binary.
//!
//! Every failure is fatal to the command that hit it and ends the process
//! with status 1.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Anything that stops a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing CSV files
    #[error(transparent)]
    Store(#[from] vigil_store::StoreError),

    /// Building the classifier
    #[error(transparent)]
    Classifier(#[from] vigil_classifier::ClassifierError),

    /// Setting up the run
    #[error(transparent)]
    Run(#[from] vigil_runner::RunError),

    /// Building a report
    #[error("Report error: {0}")]
    Report(#[from] vigil_report::ReportError),

    /// Setting up the language service client
    #[error(transparent)]
    Llm(#[from] vigil_llm::LlmError),

    /// Building the pre-filter
    #[error(transparent)]
    Prefilter(#[from] vigil_prefilter::PrefilterError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
