//! Batch-level selection of comments worth classifying

use crate::{Lexicon, PrefilterConfig, PrefilterError};
use tracing::debug;

/// The pre-filter decides which comments need the external classifier
///
/// When disabled, every comment is treated as potentially offensive.
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    lexicon: Lexicon,
    enabled: bool,
}

impl ProfanityFilter {
    /// Create a pre-filter from configuration
    pub fn new(config: &PrefilterConfig) -> Result<Self, PrefilterError> {
        config.validate().map_err(PrefilterError::Config)?;
        Ok(Self {
            lexicon: Lexicon::from_config(config)?,
            enabled: config.enabled,
        })
    }

    /// Create an enabled pre-filter over the bundled lexicon
    pub fn default_config() -> Self {
        Self {
            lexicon: Lexicon::builtin(),
            enabled: true,
        }
    }

    /// Create a pre-filter that selects every comment
    pub fn disabled() -> Self {
        Self {
            lexicon: Lexicon::empty(),
            enabled: false,
        }
    }

    /// Create an enabled pre-filter over a custom lexicon
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            enabled: true,
        }
    }

    /// Whether filtering is active
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The lexicon in use
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Whether a single comment should be sent for classification
    pub fn matches(&self, text: &str) -> bool {
        !self.enabled || self.lexicon.is_match(text)
    }

    /// Per-comment selection flags, aligned with `texts`
    pub fn mask<S: AsRef<str>>(&self, texts: &[S]) -> Vec<bool> {
        let mask: Vec<bool> = texts.iter().map(|t| self.matches(t.as_ref())).collect();
        debug!(
            "Pre-filter selected {}/{} comments",
            mask.iter().filter(|&&m| m).count(),
            mask.len()
        );
        mask
    }

    /// The selected comments, keeping input order and duplicates
    pub fn select<'a, S: AsRef<str>>(&self, texts: &'a [S]) -> Vec<&'a str> {
        texts
            .iter()
            .filter_map(|t| {
                let text: &'a str = t.as_ref();
                self.matches(text).then_some(text)
            })
            .collect()
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn batch(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_select_preserves_order_and_duplicates() {
        let filter = ProfanityFilter::default_config();
        let texts = batch(&["oh shit", "lovely", "damn it", "oh shit", "fine"]);

        assert_eq!(filter.select(&texts), vec!["oh shit", "damn it", "oh shit"]);
        assert_eq!(filter.mask(&texts), vec![true, false, true, true, false]);
    }

    #[test]
    fn test_exclaimed_profanity_is_selected() {
        let filter = ProfanityFilter::default_config();
        let texts = batch(&["oh shit!", "great day!", "fuck!", "you bitch!!"]);
        assert_eq!(filter.mask(&texts), vec![true, false, true, true]);
    }

    #[test]
    fn test_select_empty_when_clean() {
        let filter = ProfanityFilter::default_config();
        let texts = batch(&["good morning", "see you later"]);
        assert!(filter.select(&texts).is_empty());
    }

    #[test]
    fn test_disabled_selects_everything() {
        let filter = ProfanityFilter::disabled();
        let texts = batch(&["good morning", "see you later"]);
        assert!(!filter.is_enabled());
        assert_eq!(filter.select(&texts).len(), 2);
    }

    #[test]
    fn test_new_from_disabled_config() {
        let filter = ProfanityFilter::new(&PrefilterConfig::disabled()).unwrap();
        assert!(filter.matches("hello"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PrefilterConfig {
            use_builtin_lexicon: false,
            ..PrefilterConfig::default()
        };
        assert!(matches!(
            ProfanityFilter::new(&config),
            Err(PrefilterError::Config(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_select_is_masked_subsequence(texts in proptest::collection::vec("[a-z!@$ ]{0,20}", 0..25)) {
            let filter = ProfanityFilter::default_config();
            let mask = filter.mask(&texts);
            let expected: Vec<&str> = texts
                .iter()
                .zip(&mask)
                .filter(|(_, m)| **m)
                .map(|(t, _)| t.as_str())
                .collect();
            prop_assert_eq!(mask.len(), texts.len());
            prop_assert_eq!(filter.select(&texts), expected);
        }
    }
}
