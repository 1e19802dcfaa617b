//! Metrics collection for a classification run

use std::collections::BTreeMap;
use std::time::Duration;
use vigil_domain::{OffenseType, Verdict};

/// Metrics collected during one run
///
/// Tracks batch outcomes, verdicts per offense type and checkpoint writes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    /// Batches the run set out to process
    pub batches_planned: usize,

    /// Batches whose verdicts were added to the table
    pub batches_completed: usize,

    /// Batches that failed at the coordinator level
    pub batches_failed: usize,

    /// Comments with a verdict in the table
    pub comments_classified: usize,

    /// Verdicts per offense type
    pub by_offense_type: BTreeMap<OffenseType, usize>,

    /// Verdicts that are the error sentinel
    pub error_verdicts: usize,

    /// Successful checkpoint writes
    pub checkpoint_writes: usize,

    /// Wall time from first to last batch
    pub elapsed: Duration,
}

impl RunMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the verdicts of one batch
    pub fn record_verdicts(&mut self, verdicts: &[Verdict]) {
        self.comments_classified += verdicts.len();
        for verdict in verdicts {
            *self.by_offense_type.entry(verdict.offense_type).or_insert(0) += 1;
            if verdict.is_error() {
                self.error_verdicts += 1;
            }
        }
    }

    /// Record a checkpoint write
    pub fn record_checkpoint(&mut self) {
        self.checkpoint_writes += 1;
    }

    /// Verdicts flagged offensive
    pub fn offensive(&self) -> usize {
        OffenseType::OFFENSIVE
            .iter()
            .filter_map(|t| self.by_offense_type.get(t))
            .sum()
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Run Metrics Summary".to_string(),
            "===================".to_string(),
            format!(
                "Batches: {} planned, {} completed, {} failed",
                self.batches_planned, self.batches_completed, self.batches_failed
            ),
            format!("Comments classified: {}", self.comments_classified),
            format!("Offensive: {}", self.offensive()),
            format!("Errors: {}", self.error_verdicts),
            format!("Checkpoint writes: {}", self.checkpoint_writes),
            format!("Elapsed: {}s", self.elapsed.as_secs()),
        ];

        if !self.by_offense_type.is_empty() {
            lines.push(String::new());
            lines.push("Verdicts by type:".to_string());
            for (offense_type, count) in &self.by_offense_type {
                lines.push(format!("  {}: {}", offense_type, count));
            }
        }

        lines.join("\n")
    }
}
