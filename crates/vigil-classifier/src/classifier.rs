//! Core Batch Classifier implementation

use crate::config::ClassifierConfig;
use crate::error::ClassifierError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::quota::QuotaTracker;
use crate::retry::AlwaysRetry;
use std::fmt::Display;
use tracing::{debug, error, info, warn};
use vigil_domain::traits::{BatchClassifier, LlmProvider, RetryPolicy};
use vigil_domain::{Clock, SystemClock, Verdict};
use vigil_prefilter::ProfanityFilter;

/// Counters accumulated across `process_batch` calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifierStats {
    /// Batches processed
    pub batches: usize,
    /// Batches answered entirely by the pre-filter
    pub short_circuited: usize,
    /// External calls made, successful or not
    pub external_calls: usize,
    /// Attempts that failed to produce verdicts
    pub failed_attempts: usize,
    /// Batches that degraded to error verdicts
    pub error_batches: usize,
    /// Times the retry policy said no
    pub declined_retries: usize,
}

/// Classifies batches of comments through an LLM, one call per batch
///
/// Every call is gated by a [`QuotaTracker`]; failed attempts are retried
/// under the injected [`RetryPolicy`]. Output always lines up one-to-one
/// with the input.
pub struct Classifier<L, C = SystemClock>
where
    L: LlmProvider,
    C: Clock,
{
    llm: L,
    prefilter: ProfanityFilter,
    config: ClassifierConfig,
    clock: C,
    quota: QuotaTracker,
    retry_policy: Box<dyn RetryPolicy>,
    stats: ClassifierStats,
}

impl<L, C> Classifier<L, C>
where
    L: LlmProvider,
    L::Error: Display,
    C: Clock,
{
    /// Create a new Classifier
    ///
    /// Retries default to [`AlwaysRetry`].
    pub fn new(
        llm: L,
        prefilter: ProfanityFilter,
        config: ClassifierConfig,
        clock: C,
    ) -> Result<Self, ClassifierError> {
        config.validate().map_err(ClassifierError::Config)?;
        let quota = QuotaTracker::new(
            config.daily_request_limit,
            config.per_minute_request_limit,
            clock.now(),
        );
        Ok(Self {
            llm,
            prefilter,
            config,
            clock,
            quota,
            retry_policy: Box::new(AlwaysRetry),
            stats: ClassifierStats::default(),
        })
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, policy: impl RetryPolicy + 'static) -> Self {
        self.retry_policy = Box::new(policy);
        self
    }

    /// Quota state
    pub fn quota(&self) -> &QuotaTracker {
        &self.quota
    }

    /// Counters so far
    pub fn stats(&self) -> &ClassifierStats {
        &self.stats
    }

    /// The configuration in use
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Name of the underlying model
    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Classify one batch
    ///
    /// Never fails: exhausted or declined retries yield error verdicts for
    /// every comment in the batch.
    pub fn process_batch<S: AsRef<str>>(&mut self, texts: &[S]) -> Vec<Verdict> {
        if texts.is_empty() {
            return Vec::new();
        }
        self.stats.batches += 1;

        let mask = self.prefilter.mask(texts);
        let subset: Vec<&str> = texts
            .iter()
            .zip(&mask)
            .filter(|(_, selected)| **selected)
            .map(|(t, _)| t.as_ref())
            .collect();

        if subset.is_empty() {
            info!(
                "Pre-filter found nothing to classify in batch of {}",
                texts.len()
            );
            self.stats.short_circuited += 1;
            return vec![Verdict::prefilter_clean(); texts.len()];
        }

        info!(
            "Classifying {} of {} comments with {}",
            subset.len(),
            texts.len(),
            self.llm.model_name()
        );

        let max_attempts = self.config.max_attempts;
        let mut attempts = 0;
        let last_error = loop {
            match self
                .attempt(&subset)
                .and_then(|parsed| reconcile(&mask, parsed))
            {
                Ok(verdicts) => {
                    debug!("Batch classified after {} failed attempts", attempts);
                    return verdicts;
                }
                Err(e) => {
                    attempts += 1;
                    self.stats.failed_attempts += 1;
                    let message = e.to_string();
                    warn!(
                        "Classification attempt {}/{} failed: {}",
                        attempts, max_attempts, message
                    );

                    if attempts >= max_attempts {
                        break message;
                    }
                    if !self
                        .retry_policy
                        .decide_retry(attempts, max_attempts, &message)
                    {
                        info!("Retry declined after attempt {}", attempts);
                        self.stats.declined_retries += 1;
                        break message;
                    }
                    self.clock.sleep(self.config.retry_delay());
                }
            }
        };

        error!(
            "Failed to classify batch after {} attempts. Last error: {}",
            attempts, last_error
        );
        self.stats.error_batches += 1;
        vec![Verdict::error(attempts, &last_error); texts.len()]
    }

    /// One quota-gated call and parse for the selected comments
    fn attempt(&mut self, subset: &[&str]) -> Result<Vec<Verdict>, ClassifierError> {
        self.quota
            .wait_until_permitted(&self.clock, self.config.quota_poll_interval());

        let prompt = PromptBuilder::new(subset).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = self.llm.generate(&prompt);
        self.quota.record_request(self.clock.now());
        self.stats.external_calls += 1;

        let response = response.map_err(|e| ClassifierError::Llm(e.to_string()))?;
        debug!("LLM response length: {} chars", response.len());

        parse_llm_response(&response, subset.len())
    }
}

/// Interleave parsed verdicts with pre-filter defaults
///
/// `parsed` must hold one verdict per `true` in `mask`, in order.
pub fn reconcile(mask: &[bool], parsed: Vec<Verdict>) -> Result<Vec<Verdict>, ClassifierError> {
    let expected = mask.iter().filter(|&&m| m).count();
    if parsed.len() < expected {
        return Err(ClassifierError::CountMismatch {
            expected,
            actual: parsed.len(),
        });
    }

    let mut parsed = parsed.into_iter();
    Ok(mask
        .iter()
        .map(|&selected| {
            if selected {
                parsed.next().unwrap_or_else(Verdict::prefilter_clean)
            } else {
                Verdict::prefilter_clean()
            }
        })
        .collect())
}

impl<L, C> BatchClassifier for Classifier<L, C>
where
    L: LlmProvider,
    L::Error: Display,
    C: Clock,
{
    type Error = ClassifierError;

    fn classify_batch(&mut self, texts: &[String]) -> Result<Vec<Verdict>, Self::Error> {
        Ok(self.process_batch(texts))
    }
}
