//! Agreement between two result tables
//!
//! Typically a pre-filtered run against an unfiltered one over the same
//! input. The first table is treated as the prediction, the second as the
//! reference.

use crate::summary::SeverityStats;
use crate::ReportError;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use vigil_domain::{OffenseType, ResultRecord};

/// Counts of agreeing and disagreeing `is_offensive` flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    /// Offensive in both
    pub true_positives: usize,
    /// Offensive only in the first table
    pub false_positives: usize,
    /// Offensive only in the second table
    pub false_negatives: usize,
    /// Offensive in neither
    pub true_negatives: usize,
}

impl ConfusionMatrix {
    /// Count one compared pair
    pub fn record(&mut self, predicted: bool, reference: bool) {
        match (predicted, reference) {
            (true, true) => self.true_positives += 1,
            (true, false) => self.false_positives += 1,
            (false, true) => self.false_negatives += 1,
            (false, false) => self.true_negatives += 1,
        }
    }

    /// Pairs counted
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.false_negatives + self.true_negatives
    }

    /// (TP + TN) / total
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives + self.true_negatives, self.total())
    }

    /// TP / (TP + FP)
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_positives,
        )
    }

    /// TP / (TP + FN)
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives,
            self.true_positives + self.false_negatives,
        )
    }

    /// Harmonic mean of precision and recall
    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Per-side view of the compared rows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideStats {
    /// Rows in the whole table, before joining
    pub table_rows: usize,
    /// Compared rows flagged offensive
    pub offensive: usize,
    /// Compared rows not flagged offensive
    pub non_offensive: usize,
    /// Offense types among offensive compared rows
    pub by_type: BTreeMap<OffenseType, usize>,
    /// Severity of offensive compared rows
    pub severity: Option<SeverityStats>,
}

impl SideStats {
    fn from_rows<'a>(table_rows: usize, rows: impl Iterator<Item = &'a ResultRecord>) -> Self {
        let mut stats = Self {
            table_rows,
            ..Self::default()
        };
        let mut severities = Vec::new();
        for row in rows {
            if row.is_offensive {
                stats.offensive += 1;
                *stats.by_type.entry(row.offense_type).or_insert(0) += 1;
                severities.push(row.severity);
            } else {
                stats.non_offensive += 1;
            }
        }
        stats.severity = SeverityStats::from_values(&severities);
        stats
    }
}

/// Result of comparing two tables
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Rows actually compared
    pub samples: usize,
    /// Flag agreement
    pub matrix: ConfusionMatrix,
    /// The first table ("filtered")
    pub filtered: SideStats,
    /// The second table ("original")
    pub original: SideStats,
}

/// Compare `filtered` against `original`, joined on `comment_id`
///
/// Rows follow `filtered`'s order and are cut to `samples`, which defaults
/// to (and is capped at) the smaller table's length.
///
/// # Examples
///
/// ```
/// use vigil_domain::{Comment, OffenseType, ResultRecord, Verdict};
/// use vigil_report::compare;
///
/// let comment = Comment::new(0, "text");
/// let a = vec![ResultRecord::new(&comment, Verdict::new(true, OffenseType::Toxicity, "", 0.4))];
/// let b = vec![ResultRecord::new(&comment, Verdict::new(true, OffenseType::Profanity, "", 0.6))];
///
/// let comparison = compare(&a, &b, None).unwrap();
/// assert_eq!(comparison.matrix.true_positives, 1);
/// assert_eq!(comparison.matrix.accuracy(), 1.0);
/// ```
pub fn compare(
    filtered: &[ResultRecord],
    original: &[ResultRecord],
    samples: Option<usize>,
) -> Result<Comparison, ReportError> {
    if samples == Some(0) {
        return Err(ReportError::InvalidSamples(0));
    }
    let limit = filtered.len().min(original.len());
    let limit = samples.map_or(limit, |n| n.min(limit));

    let mut by_id: HashMap<usize, &ResultRecord> = HashMap::with_capacity(original.len());
    for record in original {
        by_id.entry(record.comment_id).or_insert(record);
    }

    let pairs: Vec<(&ResultRecord, &ResultRecord)> = filtered
        .iter()
        .filter_map(|f| by_id.get(&f.comment_id).map(|o| (f, *o)))
        .take(limit)
        .collect();

    if pairs.is_empty() {
        return Err(ReportError::NoOverlap);
    }
    debug!("Comparing {} rows (limit {})", pairs.len(), limit);

    let mut matrix = ConfusionMatrix::default();
    for (f, o) in &pairs {
        matrix.record(f.is_offensive, o.is_offensive);
    }

    Ok(Comparison {
        samples: pairs.len(),
        matrix,
        filtered: SideStats::from_rows(filtered.len(), pairs.iter().map(|(f, _)| *f)),
        original: SideStats::from_rows(original.len(), pairs.iter().map(|(_, o)| *o)),
    })
}
