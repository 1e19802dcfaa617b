//! Pre-filter error types

use thiserror::Error;

/// Errors that can occur while building a pre-filter
#[derive(Error, Debug)]
pub enum PrefilterError {
    /// A lexicon entry normalizes to nothing
    #[error("Invalid lexicon entry: {0:?}")]
    InvalidEntry(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
