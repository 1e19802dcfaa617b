//! Comment module - one row of input text

use std::fmt;

/// A single comment to classify
///
/// Identity is the comment's 0-based position in the loaded input. The
/// display username is synthesized from that position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Original 0-based position in the input sequence
    pub id: usize,

    /// Raw comment text
    pub text: String,
}

impl Comment {
    /// Create a comment at the given input position
    ///
    /// # Examples
    ///
    /// ```
    /// use vigil_domain::Comment;
    ///
    /// let comment = Comment::new(7, "hello there");
    /// assert_eq!(comment.username(), "user_7");
    /// ```
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Display username derived from the position
    pub fn username(&self) -> String {
        format!("user_{}", self.id)
    }

    /// Build comments from texts, numbering them from zero
    pub fn from_texts<I, S>(texts: I) -> Vec<Comment>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(id, text)| Comment::new(id, text))
            .collect()
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.text)
    }
}
