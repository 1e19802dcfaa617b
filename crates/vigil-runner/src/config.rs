//! Configuration for a classification run
//!
//! Defines batch sizing, the run ceiling, pacing and the checkpoint path.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Run Coordinator
///
/// # Examples
///
/// ```
/// use vigil_runner::RunConfig;
///
/// // Default configuration: 50 batches of 20, 5s apart
/// let config = RunConfig::default();
/// assert_eq!(config.ceiling(), 1000);
///
/// // Aggressive pacing
/// let config = RunConfig::aggressive();
/// assert_eq!(config.inter_batch_delay_secs, 1);
///
/// // Lenient pacing
/// let config = RunConfig::lenient();
/// assert_eq!(config.inter_batch_delay_secs, 15);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Comments per batch (one external call each)
    /// Default: 20
    pub batch_size: usize,

    /// Upper bound on batches per run
    /// Default: 50, which with the default batch size fits the daily quota
    pub max_batches: usize,

    /// Pause between consecutive batches (in seconds)
    /// Default: 5
    pub inter_batch_delay_secs: u64,

    /// File rewritten with the accumulated results after every batch
    /// Default: `partial_results.csv`
    pub checkpoint_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_size: 20,
            max_batches: 50,
            inter_batch_delay_secs: 5,
            checkpoint_path: PathBuf::from("partial_results.csv"),
        }
    }
}

impl RunConfig {
    /// Short pacing for paid quotas where the per-minute limit is generous
    pub fn aggressive() -> Self {
        Self {
            inter_batch_delay_secs: 1,
            ..Self::default()
        }
    }

    /// Long pacing that keeps well under a 15 requests/minute quota even
    /// with retries
    pub fn lenient() -> Self {
        Self {
            inter_batch_delay_secs: 15,
            ..Self::default()
        }
    }

    /// Most comments a single run will consider
    pub fn ceiling(&self) -> usize {
        self.batch_size.saturating_mul(self.max_batches)
    }

    /// Number of batches for `total` comments
    pub fn num_batches(&self, total: usize) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        self.max_batches.min(total.div_ceil(self.batch_size))
    }

    /// Get inter-batch delay as Duration
    pub fn inter_batch_delay(&self) -> Duration {
        Duration::from_secs(self.inter_batch_delay_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.max_batches == 0 {
            return Err("max_batches must be greater than 0".to_string());
        }
        if self.checkpoint_path.as_os_str().is_empty() {
            return Err("checkpoint_path cannot be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
