//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vigil_domain::OffenseType;

/// Vigil - Flag offensive comments with a language model.
#[derive(Debug, Parser)]
#[command(name = "vigil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify the comments in a CSV file
    Analyze(AnalyzeArgs),

    /// Report on an existing results file
    Report(ReportArgs),

    /// Compare two results files over the same input
    Compare(CompareArgs),
}

/// Views shared by `analyze` and `report`.
#[derive(Debug, Clone, clap::Args)]
pub struct ViewArgs {
    /// Show the N most severe comments (0 disables)
    #[arg(long, default_value_t = 10)]
    pub top_severe: usize,

    /// List every comment of one offense type
    #[arg(long, value_parser = parse_offense_type)]
    pub filter_type: Option<OffenseType>,

    /// Render text charts
    #[arg(long)]
    pub charts: bool,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Input CSV file
    pub input: PathBuf,

    /// Upper bound on batches for this run
    #[arg(long)]
    pub max_batches: Option<usize>,

    /// Send every comment to the model, skipping the local profanity check
    #[arg(long)]
    pub no_prefilter: bool,

    /// Where to write the results
    #[arg(short, long, default_value = "analyzed_comments.csv")]
    pub output: PathBuf,

    /// Checkpoint file rewritten after each batch
    #[arg(long)]
    pub checkpoint: Option<PathBuf>,

    /// Column holding the comment text
    #[arg(long, default_value = vigil_store::DEFAULT_TEXT_COLUMN)]
    pub text_column: String,

    /// API key for the language service
    #[arg(long, env = vigil_llm::gemini::API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name
    #[arg(short, long)]
    pub model: Option<String>,

    /// Retry failed batches without asking
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub view: ViewArgs,
}

/// Arguments for the report command.
#[derive(Debug, Parser)]
pub struct ReportArgs {
    /// Results CSV file
    pub results: PathBuf,

    #[command(flatten)]
    pub view: ViewArgs,
}

/// Arguments for the compare command.
#[derive(Debug, Parser)]
pub struct CompareArgs {
    /// Results of the pre-filtered run
    pub results: PathBuf,

    /// Results of the unfiltered run
    pub original: PathBuf,

    /// Compare at most N rows
    #[arg(short, long)]
    pub samples: Option<usize>,
}

/// Parse one of the four offensive categories.
pub fn parse_offense_type(s: &str) -> Result<OffenseType, String> {
    match OffenseType::parse(s) {
        Some(t) if t.is_offensive_category() => Ok(t),
        _ => Err(format!(
            "expected one of: {}",
            OffenseType::OFFENSIVE
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}
