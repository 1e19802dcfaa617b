//! Result sinks for checkpointing a run

use crate::table::save_records;
use crate::StoreError;
use std::path::{Path, PathBuf};
use tracing::info;
use vigil_domain::traits::ResultSink;
use vigil_domain::ResultRecord;

/// Default checkpoint location
pub const DEFAULT_CHECKPOINT_PATH: &str = "partial_results.csv";

/// Overwrites one CSV file with the full table on every save
#[derive(Debug, Clone)]
pub struct CsvCheckpoint {
    path: PathBuf,
    writes: usize,
}

impl CsvCheckpoint {
    /// Create a checkpoint writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: 0,
        }
    }

    /// Where checkpoints are written
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of successful saves
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Default for CsvCheckpoint {
    fn default() -> Self {
        Self::new(DEFAULT_CHECKPOINT_PATH)
    }
}

impl ResultSink for CsvCheckpoint {
    type Error = StoreError;

    fn save(&mut self, records: &[ResultRecord]) -> Result<(), Self::Error> {
        save_records(&self.path, records)?;
        self.writes += 1;
        info!("Saved {} results to {}", records.len(), self.path.display());
        Ok(())
    }
}

/// In-memory sink keeping every snapshot it was given
///
/// Can be set to fail, for exercising checkpoint error handling.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    snapshots: Vec<Vec<ResultRecord>>,
    fail: bool,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink whose saves always fail
    pub fn failing() -> Self {
        Self {
            snapshots: Vec::new(),
            fail: true,
        }
    }

    /// Every snapshot saved, oldest first
    pub fn snapshots(&self) -> &[Vec<ResultRecord>] {
        &self.snapshots
    }

    /// The most recent snapshot
    pub fn latest(&self) -> Option<&[ResultRecord]> {
        self.snapshots.last().map(Vec::as_slice)
    }
}

impl ResultSink for MemorySink {
    type Error = StoreError;

    fn save(&mut self, records: &[ResultRecord]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(StoreError::Io(std::io::Error::other("sink configured to fail")));
        }
        self.snapshots.push(records.to_vec());
        Ok(())
    }
}
