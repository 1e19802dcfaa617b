//! Non-interactive retry policies

use std::collections::VecDeque;
use vigil_domain::traits::RetryPolicy;

/// Always retry while attempts remain
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysRetry;

impl RetryPolicy for AlwaysRetry {
    fn decide_retry(&mut self, _attempt: u32, _max_attempts: u32, _error: &str) -> bool {
        true
    }
}

/// Never retry; the first failure degrades the batch to error verdicts
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverRetry;

impl RetryPolicy for NeverRetry {
    fn decide_retry(&mut self, _attempt: u32, _max_attempts: u32, _error: &str) -> bool {
        false
    }
}

/// Replays a fixed sequence of answers, then falls back to `default`
///
/// Every question asked is recorded as `(attempt, error)`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRetry {
    answers: VecDeque<bool>,
    default: bool,
    asked: Vec<(u32, String)>,
}

impl ScriptedRetry {
    /// Create a policy answering with `answers` in order
    pub fn new(answers: impl IntoIterator<Item = bool>, default: bool) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            default,
            asked: Vec::new(),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> &[(u32, String)] {
        &self.asked
    }
}

impl RetryPolicy for ScriptedRetry {
    fn decide_retry(&mut self, attempt: u32, _max_attempts: u32, error: &str) -> bool {
        self.asked.push((attempt, error.to_string()));
        self.answers.pop_front().unwrap_or(self.default)
    }
}
