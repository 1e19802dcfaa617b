//! Analysis summary and record views

use std::collections::BTreeMap;
use vigil_domain::{OffenseType, ResultRecord};

/// Descriptive statistics over a set of severity scores
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityStats {
    /// Number of scores
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Smallest score
    pub min: f64,
    /// Median (mean of the middle two for even counts)
    pub median: f64,
    /// Largest score
    pub max: f64,
}

impl SeverityStats {
    /// Compute statistics; `None` when there are no scores
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            count,
            mean: sorted.iter().sum::<f64>() / count as f64,
            min: sorted[0],
            median,
            max: sorted[count - 1],
        })
    }
}

/// Overview of one result table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Rows in the table
    pub total: usize,
    /// Rows flagged offensive
    pub offensive: usize,
    /// Rows carrying the error sentinel
    pub errors: usize,
    /// Offense types among offensive rows
    pub by_type: BTreeMap<OffenseType, usize>,
}

impl Summary {
    /// Summarize `records`
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let mut summary = Self {
            total: records.len(),
            ..Self::default()
        };
        for record in records {
            if record.offense_type == OffenseType::Error {
                summary.errors += 1;
            }
            if record.is_offensive {
                summary.offensive += 1;
                *summary.by_type.entry(record.offense_type).or_insert(0) += 1;
            }
        }
        summary
    }

    /// Rows not flagged offensive
    pub fn non_offensive(&self) -> usize {
        self.total - self.offensive
    }

    /// Share of offensive rows, 0 for an empty table
    pub fn offensive_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.offensive as f64 / self.total as f64
        }
    }
}

/// Severity statistics per offense type over offensive rows
pub fn severity_by_type(records: &[ResultRecord]) -> BTreeMap<OffenseType, SeverityStats> {
    let mut scores: BTreeMap<OffenseType, Vec<f64>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.is_offensive) {
        scores
            .entry(record.offense_type)
            .or_default()
            .push(record.severity);
    }
    scores
        .into_iter()
        .filter_map(|(t, values)| SeverityStats::from_values(&values).map(|s| (t, s)))
        .collect()
}

/// The `n` most severe records, optionally of one offense type
///
/// Sorted by descending severity; equal severities keep input order.
pub fn top_severe(
    records: &[ResultRecord],
    n: usize,
    offense_type: Option<OffenseType>,
) -> Vec<&ResultRecord> {
    let mut selected: Vec<&ResultRecord> = records
        .iter()
        .filter(|r| offense_type.is_none_or(|t| r.offense_type == t))
        .collect();
    // Stable sort keeps input order among ties
    selected.sort_by(|a, b| b.severity.total_cmp(&a.severity));
    selected.truncate(n);
    selected
}

/// All records of one offense type, in input order
pub fn filter_by_type(records: &[ResultRecord], offense_type: OffenseType) -> Vec<&ResultRecord> {
    records
        .iter()
        .filter(|r| r.offense_type == offense_type)
        .collect()
}
