//! Vigil Run Coordinator
//!
//! Drives a batch classifier over a whole dataset.
//!
//! # Overview
//!
//! The coordinator is responsible for:
//! - **Capping**: Keeping only as many comments as `max_batches` batches hold
//! - **Slicing**: Splitting the comments into fixed-size batches in input order
//! - **Checkpointing**: Rewriting the accumulated results after every batch
//! - **Pacing**: A fixed pause between batches, independent of the quota gate
//! - **Metrics**: Batch outcomes and verdict counts for the run
//!
//! A failing batch never aborts the run. It is logged, the results so far
//! are checkpointed, and the next batch starts after the usual pause.
//!
//! # Configuration
//!
//! The coordinator can be configured via TOML:
//!
//! ```toml
//! [runner]
//! batch_size = 20
//! max_batches = 50
//! inter_batch_delay_secs = 5
//! checkpoint_path = "partial_results.csv"
//! ```

#![warn(missing_docs)]

mod config;
mod coordinator;
mod error;
mod metrics;

pub use config::RunConfig;
pub use coordinator::{cap_to_ceiling, plan_batches, RunCoordinator, RunReport};
pub use error::RunError;
pub use metrics::RunMetrics;
