//! Error types for reporting

use thiserror::Error;

/// Errors that can occur while building reports
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    /// The two tables share no comment ids
    #[error("No overlapping comment ids between the two result sets")]
    NoOverlap,

    /// A sample size of zero was requested
    #[error("Invalid sample size: {0}")]
    InvalidSamples(usize),
}
