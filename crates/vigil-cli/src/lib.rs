//! Vigil CLI library.
//!
//! Command-line front end for the comment moderation pipeline: argument
//! parsing, configuration loading, the interactive retry prompt and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod retry;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use retry::InteractiveRetry;
