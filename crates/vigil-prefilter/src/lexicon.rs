//! Profanity lexicon and text normalization

use crate::{PrefilterConfig, PrefilterError};
use std::collections::HashSet;

const BUILTIN_WORDLIST: &str = include_str!("wordlist.txt");

/// Map common look-alike characters onto the letter they stand for
fn substitute(c: char) -> char {
    match c {
        '@' | '4' => 'a',
        '$' | '5' => 's',
        '0' => 'o',
        '1' | '!' => 'i',
        '3' => 'e',
        '7' => 't',
        other => other,
    }
}

/// Lowercase `text` and undo common character substitutions
///
/// # Examples
///
/// ```
/// use vigil_prefilter::normalize;
///
/// assert_eq!(normalize("SH!T"), "shit");
/// assert_eq!(normalize("@$$"), "ass");
/// ```
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(substitute)
        .collect()
}

/// Characters that may stand in for a letter inside a word
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '$' | '!')
}

/// Split text into normalized words
///
/// Words are runs of alphanumerics and look-alike symbols. A `!` at either
/// end of a word is punctuation, not a letter.
///
/// ```
/// use vigil_prefilter::tokenize;
///
/// assert_eq!(tokenize("Oh SH!T!!"), vec!["oh", "shit"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .map(|t| t.trim_matches('!'))
        .filter(|t| !t.is_empty())
        .map(normalize)
        .collect()
}

/// A set of profane words and phrases
///
/// Phrases are stored as their normalized words joined by single spaces, so
/// `"Son of a B!tch"` and `"son  of a bitch"` are the same entry.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    phrases: HashSet<String>,
    max_words: usize,
}

impl Lexicon {
    /// An empty lexicon
    pub fn empty() -> Self {
        Self::default()
    }

    /// The bundled word list
    pub fn builtin() -> Self {
        let mut lexicon = Self::empty();
        BUILTIN_WORDLIST
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .map(tokenize)
            .filter(|words| !words.is_empty())
            .for_each(|words| lexicon.add_words(words));
        lexicon
    }

    /// Build the lexicon described by `config`
    pub fn from_config(config: &PrefilterConfig) -> Result<Self, PrefilterError> {
        let mut lexicon = if config.use_builtin_lexicon {
            Self::builtin()
        } else {
            Self::empty()
        };
        for word in &config.extra_words {
            lexicon.insert(word)?;
        }
        for word in &config.allowed_words {
            lexicon.remove(word);
        }
        Ok(lexicon)
    }

    /// Add a word or phrase
    pub fn insert(&mut self, entry: &str) -> Result<(), PrefilterError> {
        let words = tokenize(entry);
        if words.is_empty() {
            return Err(PrefilterError::InvalidEntry(entry.to_string()));
        }
        self.add_words(words);
        Ok(())
    }

    fn add_words(&mut self, words: Vec<String>) {
        self.max_words = self.max_words.max(words.len());
        self.phrases.insert(words.join(" "));
    }

    /// Remove a word or phrase; returns whether it was present
    pub fn remove(&mut self, entry: &str) -> bool {
        let removed = self.phrases.remove(&tokenize(entry).join(" "));
        if removed {
            self.max_words = self
                .phrases
                .iter()
                .map(|p| p.split(' ').count())
                .max()
                .unwrap_or(0);
        }
        removed
    }

    /// Whether the exact word or phrase is in the lexicon
    pub fn contains(&self, entry: &str) -> bool {
        self.phrases.contains(&tokenize(entry).join(" "))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Whether the lexicon has no entries
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// First lexicon entry found in `text`, scanning left to right
    pub fn find_match(&self, text: &str) -> Option<String> {
        if self.phrases.is_empty() {
            return None;
        }
        let words = tokenize(text);
        for start in 0..words.len() {
            let longest = self.max_words.min(words.len() - start);
            for len in 1..=longest {
                let candidate = words[start..start + len].join(" ");
                if self.phrases.contains(&candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }

    /// Whether `text` contains any lexicon entry
    pub fn is_match(&self, text: &str) -> bool {
        self.find_match(text).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_populated() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.len() > 50);
        assert!(lexicon.contains("shit"));
        assert!(!lexicon.contains("# Bundled profanity lexicon, one word or phrase per line."));
    }

    #[test]
    fn test_whole_word_matching() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.is_match("well, damn."));
        // "class" and "assess" contain "ass" but are not matches
        assert!(!lexicon.is_match("the class will assess it"));
    }

    #[test]
    fn test_substitutions_are_undone() {
        let lexicon = Lexicon::builtin();
        assert_eq!(lexicon.find_match("you @$$h0le").as_deref(), Some("asshole"));
        assert!(lexicon.is_match("B1TCH please"));
    }

    #[test]
    fn test_trailing_exclamation_is_punctuation() {
        let lexicon = Lexicon::builtin();
        for text in ["oh shit!", "fuck!", "you bitch!!", "what the hell!", "!!damn"] {
            assert!(lexicon.is_match(text), "{text:?} should match");
        }
        assert_eq!(lexicon.find_match("sh!t!").as_deref(), Some("shit"));
        assert!(!lexicon.is_match("hello there!"));
    }

    #[test]
    fn test_tokenize_keeps_inner_lookalikes() {
        assert_eq!(tokenize("b!tch, @$$!"), vec!["bitch", "ass"]);
        assert_eq!(tokenize("!!! ?"), Vec::<String>::new());
    }

    #[test]
    fn test_multi_word_phrase() {
        let mut lexicon = Lexicon::empty();
        lexicon.insert("screw you").unwrap();

        assert!(lexicon.is_match("well SCREW   you then"));
        assert!(!lexicon.is_match("screw the lid on"));
        assert!(!lexicon.is_match("thank you"));
    }

    #[test]
    fn test_insert_empty_entry_fails() {
        let mut lexicon = Lexicon::empty();
        assert!(matches!(
            lexicon.insert(" ... "),
            Err(PrefilterError::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_remove_recomputes_phrase_length() {
        let mut lexicon = Lexicon::empty();
        lexicon.insert("go away loser").unwrap();
        lexicon.insert("jerk").unwrap();

        assert!(lexicon.remove("Go Away Loser"));
        assert!(!lexicon.remove("go away loser"));
        assert!(lexicon.is_match("what a jerk"));
        assert!(!lexicon.is_match("go away loser"));
    }

    #[test]
    fn test_from_config_extra_and_allowed() {
        let config = PrefilterConfig {
            extra_words: vec!["frack".to_string()],
            allowed_words: vec!["hell".to_string()],
            ..PrefilterConfig::default()
        };
        let lexicon = Lexicon::from_config(&config).unwrap();

        assert!(lexicon.is_match("oh frack"));
        assert!(!lexicon.is_match("hell yes"));
        assert!(lexicon.is_match("oh shit"));
    }

    #[test]
    fn test_from_config_without_builtin() {
        let config = PrefilterConfig {
            use_builtin_lexicon: false,
            extra_words: vec!["frack".to_string()],
            ..PrefilterConfig::default()
        };
        let lexicon = Lexicon::from_config(&config).unwrap();
        assert_eq!(lexicon.len(), 1);
        assert!(!lexicon.is_match("oh shit"));
    }
}
