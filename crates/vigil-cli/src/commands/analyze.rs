//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::report::render_views;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::retry::InteractiveRetry;
use tracing::info;
use vigil_classifier::{AlwaysRetry, Classifier};
use vigil_domain::SystemClock;
use vigil_llm::{gemini::API_KEY_ENV, GeminiConfig, GeminiProvider};
use vigil_prefilter::{PrefilterConfig, ProfanityFilter};
use vigil_runner::{cap_to_ceiling, RunConfig, RunCoordinator};
use vigil_store::{load_comments, save_records, CsvCheckpoint};

/// Settings for one analyze run after command-line overrides.
#[derive(Debug, Clone)]
pub struct AnalyzePlan {
    /// Batching and checkpointing
    pub runner: RunConfig,
    /// Local profanity check
    pub prefilter: PrefilterConfig,
    /// Language service connection
    pub llm: GeminiConfig,
    /// Credential for the language service
    pub api_key: String,
}

impl AnalyzePlan {
    /// Apply `args` on top of `config` and check the result.
    pub fn resolve(args: &AnalyzeArgs, config: &Config) -> Result<Self> {
        let mut runner = config.runner.clone();
        if let Some(max_batches) = args.max_batches {
            runner.max_batches = max_batches;
        }
        if let Some(checkpoint) = &args.checkpoint {
            runner.checkpoint_path = checkpoint.clone();
        }
        runner.validate().map_err(CliError::Config)?;

        let prefilter = if args.no_prefilter {
            PrefilterConfig {
                enabled: false,
                ..config.prefilter.clone()
            }
        } else {
            config.prefilter.clone()
        };
        prefilter.validate().map_err(CliError::Config)?;

        let mut llm = config.llm.clone();
        if let Some(model) = &args.model {
            llm.model = model.clone();
        }
        llm.validate().map_err(CliError::Config)?;

        let api_key = args
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                CliError::Config(format!(
                    "Missing API key: pass --api-key or set {}",
                    API_KEY_ENV
                ))
            })?
            .to_string();

        Ok(Self {
            runner,
            prefilter,
            llm,
            api_key,
        })
    }
}

/// Execute the analyze command.
pub fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let plan = AnalyzePlan::resolve(&args, config)?;

    let comments = load_comments(&args.input, &args.text_column)?;
    let comments = cap_to_ceiling(comments, &plan.runner);

    let prefilter = ProfanityFilter::new(&plan.prefilter)?;
    if !prefilter.is_enabled() {
        info!("Pre-filter disabled; every comment goes to the model");
    }
    let provider = GeminiProvider::new(plan.api_key, plan.llm)?;
    let classifier = Classifier::new(provider, prefilter, config.classifier.clone(), SystemClock)?;
    let classifier = if args.yes {
        classifier.with_retry_policy(AlwaysRetry)
    } else {
        classifier.with_retry_policy(InteractiveRetry::new())
    };

    let checkpoint = CsvCheckpoint::new(plan.runner.checkpoint_path.clone());
    let mut coordinator = RunCoordinator::new(classifier, SystemClock, checkpoint, plan.runner)?;
    let report = coordinator.run(&comments);

    let stats = coordinator.classifier().stats();
    info!(
        "{} external calls, {} batches answered locally",
        stats.external_calls, stats.short_circuited
    );

    let records = report.table.into_records();
    save_records(&args.output, &records)?;
    println!(
        "{}",
        formatter.success(&format!(
            "Saved {} results to {}",
            records.len(),
            args.output.display()
        ))
    );
    if report.metrics.batches_failed > 0 {
        println!(
            "{}",
            formatter.warning(&format!(
                "{} batch(es) failed; see the log for details",
                report.metrics.batches_failed
            ))
        );
    }

    println!("{}", formatter.format_metrics(&report.metrics)?);
    println!();
    println!("{}", render_views(&records, &args.view, formatter)?);
    Ok(())
}
