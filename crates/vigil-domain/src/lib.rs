//! Vigil Domain Layer
//!
//! Core value types and trait interfaces for the comment moderation pipeline.
//! Infrastructure (the language service, CSV files, terminal prompts) lives in
//! other crates and plugs in through the traits defined here.
//!
//! ## Key Concepts
//!
//! - **Comment**: one input row, identified by its 0-based position
//! - **Verdict**: the structured classification outcome for one comment
//! - **ResultRecord**: a comment joined with its verdict, one output row
//! - **ResultTable**: the ordered, append-only table of records for a run
//! - **Clock**: time source used for quota windows and pacing delays
//!
//! ## Architecture
//!
//! - Pure data and decision logic only
//! - The only external dependency is `chrono` for calendar dates
//! - Trait definitions for every external interaction

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clock;
pub mod comment;
pub mod record;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use comment::Comment;
pub use record::{ResultRecord, ResultTable};
pub use verdict::{OffenseType, Verdict};
