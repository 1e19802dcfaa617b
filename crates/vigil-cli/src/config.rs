//! Layered configuration for the `vigil` binary.
//!
//! One TOML file gathers the settings of every pipeline stage:
//!
//! ```toml
//! [llm]
//! model = "gemini-2.0-flash"
//!
//! [classifier]
//! max_attempts = 3
//!
//! [runner]
//! max_batches = 10
//!
//! [prefilter]
//! extra_words = ["scum"]
//!
//! [settings]
//! color = false
//! ```

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use vigil_classifier::ClassifierConfig;
use vigil_llm::GeminiConfig;
use vigil_prefilter::PrefilterConfig;
use vigil_runner::RunConfig;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Language service connection
    #[serde(default)]
    pub llm: GeminiConfig,

    /// Retries and quota limits
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Batching, pacing and checkpointing
    #[serde(default)]
    pub runner: RunConfig,

    /// Local profanity check
    #[serde(default)]
    pub prefilter: PrefilterConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Terminal output preferences, overridden by `--no-color` and `--format`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Colored status lines
    pub color: bool,

    /// Format used when `--format` is not given
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".vigil").join("config.toml"))
    }

    /// Load from `explicit` if given, else from the default path if it
    /// exists, else fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::path() {
                Ok(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load and validate configuration from a file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let contents = fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let sections = [
            ("llm", self.llm.validate()),
            ("classifier", self.classifier.validate()),
            ("runner", self.runner.validate()),
            ("prefilter", self.prefilter.validate()),
        ];
        for (name, result) in sections {
            result.map_err(|e| CliError::Config(format!("[{}] {}", name, e)))?;
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.runner.batch_size, 20);
        assert!(config.prefilter.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml(
            r#"
            [runner]
            max_batches = 3

            [settings]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.runner.max_batches, 3);
        assert_eq!(config.runner.batch_size, 20);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.classifier.max_attempts, 3);
    }

    #[test]
    fn test_invalid_section_is_named() {
        let err = Config::from_toml("[runner]\nbatch_size = 0\n").unwrap_err();
        assert!(matches!(err, CliError::Config(ref m) if m.starts_with("[runner]")));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::from_toml("[runner\n").unwrap_err();
        assert!(matches!(err, CliError::Toml(_)));
    }

    #[test]
    fn test_roundtrip() {
        let mut config = Config::default();
        config.llm.model = "gemini-1.5-pro".to_string();
        config.prefilter.extra_words = vec!["scum".to_string()];

        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.llm.model, "gemini-1.5-pro");
        assert_eq!(parsed.prefilter.extra_words, vec!["scum"]);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vigil.toml");
        fs::write(&path, "[classifier]\nmax_attempts = 5\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.classifier.max_attempts, 5);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load(Some(missing.as_path())),
            Err(CliError::Config(_))
        ));
    }
}
