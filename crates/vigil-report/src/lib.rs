//! Vigil Reporting
//!
//! Read-only views over result tables: the analysis summary, the most
//! severe comments, per-type filtering, comparison of two runs and text
//! charts.
//!
//! # Example
//!
//! ```
//! use vigil_domain::{Comment, OffenseType, ResultRecord, Verdict};
//! use vigil_report::{top_severe, Summary};
//!
//! let records = vec![
//!     ResultRecord::new(&Comment::new(0, "a"), Verdict::prefilter_clean()),
//!     ResultRecord::new(
//!         &Comment::new(1, "b"),
//!         Verdict::new(true, OffenseType::Harassment, "threat", 0.8),
//!     ),
//! ];
//!
//! let summary = Summary::from_records(&records);
//! assert_eq!(summary.offensive, 1);
//! assert_eq!(top_severe(&records, 1, None)[0].comment_id, 1);
//! ```

#![warn(missing_docs)]

pub mod charts;
mod compare;
mod error;
mod summary;

pub use charts::BarChart;
pub use compare::{compare, Comparison, ConfusionMatrix, SideStats};
pub use error::ReportError;
pub use summary::{filter_by_type, severity_by_type, top_severe, SeverityStats, Summary};
