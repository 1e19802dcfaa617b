//! Vigil Pre-filter
//!
//! Local profanity check that decides which comments are worth sending to
//! the external classifier.
//!
//! The pre-filter provides:
//! - A bundled profanity lexicon, extendable through configuration
//! - Case-insensitive whole-word and multi-word phrase matching
//! - Normalization of common character substitutions (`@` for `a`, `$` for `s`, ...)
//! - Order- and duplicate-preserving selection over a batch
//!
//! # Examples
//!
//! ```
//! use vigil_prefilter::ProfanityFilter;
//!
//! let filter = ProfanityFilter::default_config();
//! let batch = vec![
//!     "have a nice day".to_string(),
//!     "what the h3ll is this sh!t".to_string(),
//! ];
//!
//! let selected = filter.select(&batch);
//! assert_eq!(selected, vec!["what the h3ll is this sh!t"]);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod filter;
mod lexicon;

pub use config::PrefilterConfig;
pub use error::PrefilterError;
pub use filter::ProfanityFilter;
pub use lexicon::{normalize, tokenize, Lexicon};
