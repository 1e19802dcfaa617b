//! Vigil Batch Classifier
//!
//! Classifies batches of comments as offensive or not using an LLM, with a
//! profanity pre-filter in front and a request quota gate around every call.
//!
//! # Architecture
//!
//! ```text
//! Batch → Pre-filter → subset → Quota gate → LLM → Parser → reconcile → Verdicts
//!                 └────────── default verdicts for the rest ──────────┘
//! ```
//!
//! # Key Features
//!
//! - **Pre-filtering**: Only comments with profanity reach the LLM
//! - **Quota Tracking**: Daily and per-minute request ceilings
//! - **Retry**: Bounded attempts with an injectable [`RetryPolicy`](vigil_domain::traits::RetryPolicy)
//! - **Total Output**: One verdict per input comment, always in input order
//!
//! # Example Usage
//!
//! ```
//! use vigil_classifier::{Classifier, ClassifierConfig};
//! use vigil_domain::ManualClock;
//! use vigil_llm::MockProvider;
//! use vigil_prefilter::ProfanityFilter;
//!
//! let llm = MockProvider::new(
//!     r#"[{"is_offensive": true, "offense_type": "profanity", "explanation": "swearing", "severity": 0.4}]"#,
//! );
//! let mut classifier = Classifier::new(
//!     llm,
//!     ProfanityFilter::default(),
//!     ClassifierConfig::default(),
//!     ManualClock::default(),
//! )
//! .unwrap();
//!
//! let verdicts = classifier.process_batch(&["have a nice day", "oh shit"]);
//! assert_eq!(verdicts.len(), 2);
//! assert!(!verdicts[0].is_offensive);
//! assert!(verdicts[1].is_offensive);
//! ```

#![warn(missing_docs)]

mod classifier;
mod config;
mod error;
mod parser;
mod prompt;
mod quota;
mod retry;

#[cfg(test)]
mod tests;

pub use classifier::{reconcile, Classifier, ClassifierStats};
pub use config::ClassifierConfig;
pub use error::ClassifierError;
pub use parser::{extract_json, parse_llm_response};
pub use prompt::PromptBuilder;
pub use quota::QuotaTracker;
pub use retry::{AlwaysRetry, NeverRetry, ScriptedRetry};
