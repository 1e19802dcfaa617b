//! Loading comments from an input CSV

use crate::StoreError;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};
use vigil_domain::Comment;

/// Name the text column is known by once loaded
pub const COMMENT_TEXT_COLUMN: &str = "comment_text";

/// Default source column for the comment text
pub const DEFAULT_TEXT_COLUMN: &str = "tweet";

/// Load comments from the CSV at `path`
///
/// An existing `comment_text` column wins; otherwise `text_column` is used.
/// Row order assigns comment ids starting at 0.
pub fn load_comments(path: impl AsRef<Path>, text_column: &str) -> Result<Vec<Comment>, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StoreError::NotFound(path.to_path_buf()));
    }
    let comments = read_comments(File::open(path)?, text_column)?;
    info!("Loaded {} comments from {}", comments.len(), path.display());
    Ok(comments)
}

/// Load comments from any CSV reader
pub fn read_comments<R: Read>(reader: R, text_column: &str) -> Result<Vec<Comment>, StoreError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = headers
        .iter()
        .position(|h| h.trim() == COMMENT_TEXT_COLUMN)
        .or_else(|| headers.iter().position(|h| h.trim() == text_column))
        .ok_or_else(|| StoreError::MissingColumn {
            column: text_column.to_string(),
            available: headers.iter().map(str::to_string).collect(),
        })?;
    debug!("Reading comment text from column '{}'", &headers[column]);

    let mut comments = Vec::new();
    for (id, row) in reader.records().enumerate() {
        let row = row?;
        let text = row.get(column).unwrap_or_default();
        comments.push(Comment::new(id, text));
    }
    Ok(comments)
}
