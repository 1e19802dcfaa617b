//! Configuration for the Batch Classifier

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Batch Classifier and its quota gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Attempts per batch before falling back to error verdicts
    pub max_attempts: u32,

    /// Pause between a failed attempt and the next one (seconds)
    pub retry_delay_secs: u64,

    /// How often the quota gate re-checks while blocked (seconds)
    pub quota_poll_interval_secs: u64,

    /// Ceiling on external calls per calendar day
    pub daily_request_limit: u32,

    /// Ceiling on external calls per minute
    pub per_minute_request_limit: u32,
}

impl ClassifierConfig {
    /// One attempt per batch with no retry delay
    pub fn fail_fast() -> Self {
        Self {
            max_attempts: 1,
            retry_delay_secs: 0,
            ..Self::default()
        }
    }

    /// More attempts, spaced further apart, for flaky connections
    pub fn patient() -> Self {
        Self {
            max_attempts: 5,
            retry_delay_secs: 15,
            ..Self::default()
        }
    }

    /// Get the retry delay as a Duration
    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }

    /// Get the quota poll interval as a Duration
    pub fn quota_poll_interval(&self) -> Duration {
        Duration::from_secs(self.quota_poll_interval_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("max_attempts must be greater than 0".to_string());
        }
        if self.quota_poll_interval_secs == 0 {
            return Err("quota_poll_interval_secs must be greater than 0".to_string());
        }
        if self.daily_request_limit == 0 {
            return Err("daily_request_limit must be greater than 0".to_string());
        }
        if self.per_minute_request_limit == 0 {
            return Err("per_minute_request_limit must be greater than 0".to_string());
        }
        if self.per_minute_request_limit > self.daily_request_limit {
            return Err("per_minute_request_limit cannot exceed daily_request_limit".to_string());
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

impl Default for ClassifierConfig {
    /// Defaults sized for the free API tier
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay_secs: 5,
            quota_poll_interval_secs: 2,
            daily_request_limit: 50,
            per_minute_request_limit: 15,
        }
    }
}
