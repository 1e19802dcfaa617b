//! Run Coordinator: batch slicing, checkpointing and pacing

use crate::{RunConfig, RunError, RunMetrics};
use std::fmt::Display;
use tracing::{error, info, warn};
use vigil_domain::traits::{BatchClassifier, ResultSink};
use vigil_domain::{Clock, Comment, ResultRecord, ResultTable};

/// Outcome of a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Results for every attempted batch, in input order
    pub table: ResultTable,
    /// What happened along the way
    pub metrics: RunMetrics,
}

/// Drop the comments beyond what one run can process
///
/// Keeps the first `max_batches * batch_size` comments.
pub fn cap_to_ceiling(mut comments: Vec<Comment>, config: &RunConfig) -> Vec<Comment> {
    let ceiling = config.ceiling();
    if comments.len() > ceiling {
        warn!(
            "Limiting to the first {} of {} comments ({} batches of {})",
            ceiling,
            comments.len(),
            config.max_batches,
            config.batch_size
        );
        comments.truncate(ceiling);
    }
    comments
}

/// Split comments into the batches a run will process
pub fn plan_batches<'a>(comments: &'a [Comment], config: &RunConfig) -> Vec<&'a [Comment]> {
    if config.batch_size == 0 {
        return Vec::new();
    }
    comments
        .chunks(config.batch_size)
        .take(config.max_batches)
        .collect()
}

/// Drives a [`BatchClassifier`] over a dataset
///
/// After every batch the accumulated table is handed to the [`ResultSink`],
/// so an interrupted run leaves its results behind. A failing batch is
/// logged and skipped; the run carries on with the next one.
///
/// # Examples
///
/// ```
/// use vigil_domain::traits::BatchClassifier;
/// use vigil_domain::{Comment, ManualClock, Verdict};
/// use vigil_runner::{RunConfig, RunCoordinator};
/// use vigil_store::MemorySink;
///
/// struct AllClean;
///
/// impl BatchClassifier for AllClean {
///     type Error = std::convert::Infallible;
///
///     fn classify_batch(&mut self, texts: &[String]) -> Result<Vec<Verdict>, Self::Error> {
///         Ok(vec![Verdict::prefilter_clean(); texts.len()])
///     }
/// }
///
/// let comments = Comment::from_texts(["a", "b", "c"]);
/// let mut coordinator =
///     RunCoordinator::new(AllClean, ManualClock::default(), MemorySink::new(), RunConfig::default())
///         .unwrap();
///
/// let report = coordinator.run(&comments);
/// assert_eq!(report.table.len(), 3);
/// assert_eq!(report.metrics.batches_completed, 1);
/// ```
pub struct RunCoordinator<B, C, S>
where
    B: BatchClassifier,
    C: Clock,
    S: ResultSink,
{
    classifier: B,
    clock: C,
    sink: S,
    config: RunConfig,
}

impl<B, C, S> RunCoordinator<B, C, S>
where
    B: BatchClassifier,
    B::Error: Display,
    C: Clock,
    S: ResultSink,
    S::Error: Display,
{
    /// Create a new coordinator
    pub fn new(classifier: B, clock: C, sink: S, config: RunConfig) -> Result<Self, RunError> {
        config.validate().map_err(RunError::Config)?;
        Ok(Self {
            classifier,
            clock,
            sink,
            config,
        })
    }

    /// The classifier in use
    pub fn classifier(&self) -> &B {
        &self.classifier
    }

    /// The checkpoint sink
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The configuration in use
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Process `comments` batch by batch
    pub fn run(&mut self, comments: &[Comment]) -> RunReport {
        let started = self.clock.now();
        let batches = plan_batches(comments, &self.config);
        let total = batches.len();

        let mut table = ResultTable::new();
        let mut metrics = RunMetrics {
            batches_planned: total,
            ..RunMetrics::default()
        };

        info!(
            "Processing {} batches of up to {} comments",
            total, self.config.batch_size
        );

        for (index, batch) in batches.iter().enumerate() {
            if let (Some(first), Some(last)) = (batch.first(), batch.last()) {
                info!(
                    "Processing batch {}/{} (comments {} to {})",
                    index + 1,
                    total,
                    first.id,
                    last.id
                );
            }

            match self.run_batch(index + 1, batch, &mut table, &mut metrics) {
                Ok(()) => metrics.batches_completed += 1,
                Err(e) => {
                    error!("Error processing batch {}: {}", index + 1, e);
                    metrics.batches_failed += 1;
                    // Best effort: keep what we have on disk
                    if let Err(e) = self.checkpoint(&table, &mut metrics) {
                        error!("Could not save partial results: {}", e);
                    }
                }
            }

            if index + 1 < total {
                info!(
                    "Waiting {}s before next batch",
                    self.config.inter_batch_delay_secs
                );
                self.clock.sleep(self.config.inter_batch_delay());
            }
        }

        metrics.elapsed = (self.clock.now() - started).to_std().unwrap_or_default();
        info!(
            "Analysis complete: {} comments in {} batches ({} failed)",
            table.len(),
            total,
            metrics.batches_failed
        );

        RunReport { table, metrics }
    }

    /// Classify one batch, append its records and checkpoint
    fn run_batch(
        &mut self,
        number: usize,
        batch: &[Comment],
        table: &mut ResultTable,
        metrics: &mut RunMetrics,
    ) -> Result<(), RunError> {
        let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
        let verdicts = self
            .classifier
            .classify_batch(&texts)
            .map_err(|e| RunError::Classifier(e.to_string()))?;

        if verdicts.len() != batch.len() {
            return Err(RunError::LengthMismatch {
                batch: number,
                expected: batch.len(),
                actual: verdicts.len(),
            });
        }

        metrics.record_verdicts(&verdicts);
        table.extend(
            batch
                .iter()
                .zip(verdicts)
                .map(|(comment, verdict)| ResultRecord::new(comment, verdict)),
        );

        self.checkpoint(table, metrics)
    }

    fn checkpoint(&mut self, table: &ResultTable, metrics: &mut RunMetrics) -> Result<(), RunError> {
        self.sink
            .save(table.records())
            .map_err(|e| RunError::Checkpoint(e.to_string()))?;
        metrics.record_checkpoint();
        Ok(())
    }
}
