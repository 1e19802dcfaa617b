//! Result tables as CSV
//!
//! Column order is fixed: `comment_id, username, original_comment,
//! is_offensive, offense_type, explanation, severity`. Booleans are written
//! as `True`/`False` and read back from any of `true/false/True/False/1/0`.

use crate::StoreError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use vigil_domain::{OffenseType, ResultRecord};

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    comment_id: usize,
    username: String,
    original_comment: String,
    #[serde(serialize_with = "write_bool", deserialize_with = "read_bool")]
    is_offensive: bool,
    offense_type: String,
    explanation: String,
    severity: f64,
}

fn write_bool<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "True" } else { "False" })
}

fn read_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "true" | "True" | "TRUE" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean '{}'",
            other
        ))),
    }
}

impl From<&ResultRecord> for CsvRow {
    fn from(record: &ResultRecord) -> Self {
        Self {
            comment_id: record.comment_id,
            username: record.username.clone(),
            original_comment: record.original_comment.clone(),
            is_offensive: record.is_offensive,
            offense_type: record.offense_type.as_str().to_string(),
            explanation: record.explanation.clone(),
            severity: record.severity,
        }
    }
}

impl CsvRow {
    fn into_record(self, row: usize) -> Result<ResultRecord, StoreError> {
        let offense_type =
            OffenseType::parse(&self.offense_type).ok_or_else(|| StoreError::InvalidData {
                row,
                message: format!("unknown offense_type '{}'", self.offense_type),
            })?;
        Ok(ResultRecord {
            comment_id: self.comment_id,
            username: self.username,
            original_comment: self.original_comment,
            is_offensive: self.is_offensive,
            offense_type,
            explanation: self.explanation,
            severity: self.severity,
        })
    }
}

/// Write records as CSV to any writer
pub fn write_records<W: Write>(writer: W, records: &[ResultRecord]) -> Result<(), StoreError> {
    let mut writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        // Keep the header so an empty table still reads back
        writer.write_record([
            "comment_id",
            "username",
            "original_comment",
            "is_offensive",
            "offense_type",
            "explanation",
            "severity",
        ])?;
    }
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read records from any CSV reader
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ResultRecord>, StoreError> {
    let mut reader = csv::Reader::from_reader(reader);
    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(row, result)| result?.into_record(row))
        .collect()
}

/// Write records to `path`, replacing any existing file
pub fn save_records(path: impl AsRef<Path>, records: &[ResultRecord]) -> Result<(), StoreError> {
    write_records(File::create(path)?, records)
}

/// Read records from the CSV file at `path`
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<ResultRecord>, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    read_records(File::open(path)?)
}
