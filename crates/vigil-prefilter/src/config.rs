//! Pre-filter configuration

use serde::{Deserialize, Serialize};

/// Configuration for the profanity pre-filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefilterConfig {
    /// Run the pre-filter at all; when off every comment is sent out
    pub enabled: bool,

    /// Start from the bundled word list
    pub use_builtin_lexicon: bool,

    /// Additional words or phrases to treat as profanity
    pub extra_words: Vec<String>,

    /// Words or phrases to remove from the lexicon
    pub allowed_words: Vec<String>,
}

impl Default for PrefilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            use_builtin_lexicon: true,
            extra_words: Vec::new(),
            allowed_words: Vec::new(),
        }
    }
}

impl PrefilterConfig {
    /// A configuration with the pre-filter switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && !self.use_builtin_lexicon && self.extra_words.is_empty() {
            return Err(
                "pre-filter is enabled but has no lexicon (builtin disabled, no extra_words)"
                    .to_string(),
            );
        }
        if let Some(word) = self.extra_words.iter().find(|w| w.trim().is_empty()) {
            return Err(format!("extra_words contains an empty entry: {:?}", word));
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
