//! Error types for a classification run

use thiserror::Error;

/// Errors that can occur while running batches
///
/// Only `Config` is fatal. The others are per-batch failures that the
/// coordinator logs before moving on to the next batch.
#[derive(Error, Debug)]
pub enum RunError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The batch classifier returned an error
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// The classifier returned the wrong number of verdicts
    #[error("Batch {batch}: expected {expected} verdicts, got {actual}")]
    LengthMismatch {
        /// 1-based batch number
        batch: usize,
        /// Comments in the batch
        expected: usize,
        /// Verdicts returned
        actual: usize,
    },

    /// Writing the checkpoint failed
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),
}
