//! Verdict module - the classification outcome for one comment

use std::fmt;

/// Explanation attached to comments the pre-filter never sent out
pub const PREFILTER_CLEAN_EXPLANATION: &str = "No profanity detected by pre-filter";

/// Category of offensive content
///
/// `None` marks clean content. `Error` is a sentinel used only when a
/// classification could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OffenseType {
    /// Attacks on a group based on protected attributes
    HateSpeech,

    /// Rude, disrespectful or unreasonable language
    Toxicity,

    /// Obscene or vulgar words
    Profanity,

    /// Targeted abuse of an individual
    Harassment,

    /// Not offensive
    None,

    /// Classification failed
    Error,
}

impl OffenseType {
    /// The offensive categories, in display order
    pub const OFFENSIVE: [OffenseType; 4] = [
        OffenseType::HateSpeech,
        OffenseType::Toxicity,
        OffenseType::Profanity,
        OffenseType::Harassment,
    ];

    /// Get the canonical label as written in prompts and result files
    pub fn as_str(&self) -> &'static str {
        match self {
            OffenseType::HateSpeech => "hate speech",
            OffenseType::Toxicity => "toxicity",
            OffenseType::Profanity => "profanity",
            OffenseType::Harassment => "harassment",
            OffenseType::None => "none",
            OffenseType::Error => "error",
        }
    }

    /// Parse a label, ignoring case and accepting `_` or `-` for the space
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_domain::OffenseType;
    ///
    /// assert_eq!(OffenseType::parse("Hate Speech"), Some(OffenseType::HateSpeech));
    /// assert_eq!(OffenseType::parse("hate_speech"), Some(OffenseType::HateSpeech));
    /// assert_eq!(OffenseType::parse("spam"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "hate speech" => Some(OffenseType::HateSpeech),
            "toxicity" => Some(OffenseType::Toxicity),
            "profanity" => Some(OffenseType::Profanity),
            "harassment" => Some(OffenseType::Harassment),
            "none" => Some(OffenseType::None),
            "error" => Some(OffenseType::Error),
            _ => None,
        }
    }

    /// Whether this is one of the four offensive categories
    pub fn is_offensive_category(&self) -> bool {
        Self::OFFENSIVE.contains(self)
    }
}

impl fmt::Display for OffenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OffenseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid offense type: {}", s))
    }
}

/// Structured classification outcome for one comment
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Whether the comment is offensive
    pub is_offensive: bool,

    /// Category of the offense
    pub offense_type: OffenseType,

    /// Free-text rationale
    pub explanation: String,

    /// Severity in [0.0, 1.0]
    pub severity: f64,
}

impl Verdict {
    /// Create a verdict, enforcing the domain invariants
    ///
    /// Severity is clamped into [0.0, 1.0] (NaN becomes 0.0), and a `None`
    /// or `Error` offense type is never offensive.
    pub fn new(
        is_offensive: bool,
        offense_type: OffenseType,
        explanation: impl Into<String>,
        severity: f64,
    ) -> Self {
        let severity = if severity.is_nan() {
            0.0
        } else {
            severity.clamp(0.0, 1.0)
        };
        let is_offensive = is_offensive && offense_type.is_offensive_category();

        Self {
            is_offensive,
            offense_type,
            explanation: explanation.into(),
            severity,
        }
    }

    /// Default verdict for a comment that was not sent for classification
    pub fn clean(explanation: impl Into<String>) -> Self {
        Self {
            is_offensive: false,
            offense_type: OffenseType::None,
            explanation: explanation.into(),
            severity: 0.0,
        }
    }

    /// Default verdict for a comment the pre-filter let through
    pub fn prefilter_clean() -> Self {
        Self::clean(PREFILTER_CLEAN_EXPLANATION)
    }

    /// Sentinel verdict for a comment whose classification failed
    pub fn error(attempts: u32, last_error: &str) -> Self {
        Self {
            is_offensive: false,
            offense_type: OffenseType::Error,
            explanation: format!(
                "Error in analysis after {} attempts: {}",
                attempts, last_error
            ),
            severity: 0.0,
        }
    }

    /// Whether this verdict is the error sentinel
    pub fn is_error(&self) -> bool {
        self.offense_type == OffenseType::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_offense_type_round_trip_labels() {
        for ty in [
            OffenseType::HateSpeech,
            OffenseType::Toxicity,
            OffenseType::Profanity,
            OffenseType::Harassment,
            OffenseType::None,
            OffenseType::Error,
        ] {
            assert_eq!(OffenseType::parse(ty.as_str()), Some(ty));
        }
    }

    #[test]
    fn test_offense_type_from_str() {
        let ty: OffenseType = "HARASSMENT".parse().unwrap();
        assert_eq!(ty, OffenseType::Harassment);
        assert!("insult".parse::<OffenseType>().is_err());
    }

    #[test]
    fn test_none_type_is_never_offensive() {
        let verdict = Verdict::new(true, OffenseType::None, "model disagreed with itself", 0.4);
        assert!(!verdict.is_offensive);
        assert_eq!(verdict.offense_type, OffenseType::None);
    }

    #[test]
    fn test_severity_clamped() {
        assert_eq!(Verdict::new(true, OffenseType::Toxicity, "", 1.7).severity, 1.0);
        assert_eq!(Verdict::new(true, OffenseType::Toxicity, "", -0.2).severity, 0.0);
        assert_eq!(Verdict::new(true, OffenseType::Toxicity, "", f64::NAN).severity, 0.0);
    }

    #[test]
    fn test_prefilter_clean_defaults() {
        let verdict = Verdict::prefilter_clean();
        assert!(!verdict.is_offensive);
        assert_eq!(verdict.offense_type, OffenseType::None);
        assert_eq!(verdict.severity, 0.0);
        assert_eq!(verdict.explanation, PREFILTER_CLEAN_EXPLANATION);
    }

    #[test]
    fn test_error_sentinel() {
        let verdict = Verdict::error(3, "timeout");
        assert!(verdict.is_error());
        assert!(!verdict.is_offensive);
        assert_eq!(verdict.severity, 0.0);
        assert_eq!(verdict.explanation, "Error in analysis after 3 attempts: timeout");
    }

    proptest! {
        #[test]
        fn prop_verdict_severity_in_unit_range(severity in -10.0f64..10.0, offensive: bool) {
            let verdict = Verdict::new(offensive, OffenseType::Profanity, "", severity);
            prop_assert!((0.0..=1.0).contains(&verdict.severity));
        }
    }
}
