//! Vigil LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `vigil-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Scripted mock for testing
//! - `GeminiProvider`: Google Generative Language API integration
//!
//! # Examples
//!
//! ```
//! use vigil_llm::MockProvider;
//! use vigil_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("[]");
//! provider.push_response(r#"[{"is_offensive": true}]"#);
//! assert_eq!(provider.generate("1. 'first'").unwrap(), r#"[{"is_offensive": true}]"#);
//! assert_eq!(provider.generate("1. 'second'").unwrap(), "[]");
//! ```

#![warn(missing_docs)]

pub mod gemini;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use vigil_domain::traits::LlmProvider as LlmProviderTrait;

pub use gemini::{GeminiConfig, GeminiProvider};

/// Failures of a single generation call
///
/// The classifier treats every variant the same way (a failed attempt), so
/// the split only matters for logs and for choosing how long to back off.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The request did not complete or came back with an error status
    #[error("Request to language service failed: {0}")]
    Communication(String),

    /// The service answered without usable candidate text
    #[error("Unusable service response: {0}")]
    InvalidResponse(String),

    /// HTTP 429 from the service
    #[error("Service quota exhausted (HTTP 429)")]
    RateLimitExceeded,

    /// HTTP 404 for the configured model
    #[error("Unknown model: {0}")]
    ModelNotAvailable(String),

    /// Provider configuration error (missing key, bad endpoint)
    #[error("Provider misconfigured: {0}")]
    Config(String),

    /// Failure reported by the service itself, or scripted in tests
    #[error("Service error: {0}")]
    Service(String),
}

/// Mock LLM provider for deterministic testing
///
/// Scripted outcomes are consumed one per call, in order. Once the script is
/// exhausted every call returns the default response. No network calls are
/// made.
///
/// # Examples
///
/// ```
/// use vigil_llm::MockProvider;
/// use vigil_domain::traits::LlmProvider;
///
/// let provider = MockProvider::new("fallback");
/// provider.push_error("service unavailable");
/// provider.push_response("first");
///
/// assert!(provider.generate("p1").is_err());
/// assert_eq!(provider.generate("p2").unwrap(), "first");
/// assert_eq!(provider.generate("p3").unwrap(), "fallback");
/// assert_eq!(provider.call_count(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug, Default)]
struct MockState {
    script: VecDeque<Result<String, String>>,
    prompts: Vec<String>,
}

impl MockProvider {
    /// Mock that answers `response` once its script runs out
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Queue a successful response for the next unanswered call
    pub fn push_response(&self, response: impl Into<String>) {
        self.lock().script.push_back(Ok(response.into()));
    }

    /// Queue a failure for the next unanswered call
    pub fn push_error(&self, message: impl Into<String>) {
        self.lock().script.push_back(Err(message.into()));
    }

    /// Calls received so far
    pub fn call_count(&self) -> usize {
        self.lock().prompts.len()
    }

    /// Every prompt received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.lock().prompts.clone()
    }

    /// Forget recorded prompts (the script is left untouched)
    pub fn clear_prompts(&self) {
        self.lock().prompts.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut state = self.lock();
        state.prompts.push(prompt.to_string());

        match state.script.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(LlmError::Service(message)),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
