//! Result records and the append-only result table

use crate::{Comment, OffenseType, Verdict};

/// One output row: a comment joined with its verdict
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    /// Original 0-based position of the comment
    pub comment_id: usize,

    /// Synthesized display username (`user_<comment_id>`)
    pub username: String,

    /// Original comment text
    pub original_comment: String,

    /// Whether the comment is offensive
    pub is_offensive: bool,

    /// Category of the offense
    pub offense_type: OffenseType,

    /// Free-text rationale
    pub explanation: String,

    /// Severity in [0.0, 1.0]
    pub severity: f64,
}

impl ResultRecord {
    /// Join a comment with its verdict
    pub fn new(comment: &Comment, verdict: Verdict) -> Self {
        Self {
            comment_id: comment.id,
            username: comment.username(),
            original_comment: comment.text.clone(),
            is_offensive: verdict.is_offensive,
            offense_type: verdict.offense_type,
            explanation: verdict.explanation,
            severity: verdict.severity,
        }
    }

    /// The verdict part of this record
    pub fn verdict(&self) -> Verdict {
        Verdict {
            is_offensive: self.is_offensive,
            offense_type: self.offense_type,
            explanation: self.explanation.clone(),
            severity: self.severity,
        }
    }
}

/// Ordered table of results accumulated over one run
///
/// The table only grows: records are appended batch by batch and never
/// removed. A new run starts from a new table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTable {
    records: Vec<ResultRecord>,
}

impl ResultTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record
    pub fn push(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    /// Append a batch of records, keeping their order
    pub fn extend<I: IntoIterator<Item = ResultRecord>>(&mut self, records: I) {
        self.records.extend(records);
    }

    /// All records, in order
    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    /// Consume the table, returning its records
    pub fn into_records(self) -> Vec<ResultRecord> {
        self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over records in order
    pub fn iter(&self) -> std::slice::Iter<'_, ResultRecord> {
        self.records.iter()
    }
}

impl From<Vec<ResultRecord>> for ResultTable {
    fn from(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
