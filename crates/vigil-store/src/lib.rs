//! Vigil Storage Layer
//!
//! CSV persistence for the moderation pipeline: loading input comments,
//! writing and reading result tables, and checkpointing a run in progress.
//!
//! # Examples
//!
//! ```no_run
//! use vigil_store::{load_comments, save_records, DEFAULT_TEXT_COLUMN};
//!
//! let comments = load_comments("comments.csv", DEFAULT_TEXT_COLUMN).unwrap();
//! println!("{} comments loaded", comments.len());
//! save_records("analyzed_comments.csv", &[]).unwrap();
//! ```

#![warn(missing_docs)]

mod checkpoint;
mod error;
mod input;
mod table;

pub use checkpoint::{CsvCheckpoint, MemorySink, DEFAULT_CHECKPOINT_PATH};
pub use error::StoreError;
pub use input::{load_comments, read_comments, COMMENT_TEXT_COLUMN, DEFAULT_TEXT_COLUMN};
pub use table::{load_records, read_records, save_records, write_records};
