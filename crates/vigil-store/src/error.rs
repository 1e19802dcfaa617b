//! Error types for CSV storage

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input file does not exist
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The requested text column is absent from the header
    #[error("Column '{column}' not found (available: {})", available.join(", "))]
    MissingColumn {
        /// Column that was requested
        column: String,
        /// Columns present in the header
        available: Vec<String>,
    },

    /// A row could not be turned into a record
    #[error("Invalid data at row {row}: {message}")]
    InvalidData {
        /// 0-based data row
        row: usize,
        /// What was wrong
        message: String,
    },
}
