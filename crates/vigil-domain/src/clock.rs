//! Time source for quota windows and pacing delays
//!
//! Every wait in the pipeline (quota polling, retry back-off, inter-batch
//! pacing) goes through a [`Clock`], so tests can substitute
//! [`ManualClock`] and run without real sleeps.

use chrono::{Duration as ChronoDuration, Local, NaiveDate, NaiveDateTime};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Source of the current local time and of blocking delays
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;

    /// Block the calling thread for `duration`
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by the local timezone and `std::thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock for tests
///
/// `sleep` returns immediately and advances the clock by the requested
/// duration. Clones share the same time and sleep log.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use vigil_domain::{Clock, ManualClock};
///
/// let clock = ManualClock::default();
/// let start = clock.now();
/// clock.sleep(Duration::from_secs(5));
/// assert_eq!((clock.now() - start).num_seconds(), 5);
/// assert_eq!(clock.total_slept(), Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

#[derive(Debug)]
struct ManualState {
    now: NaiveDateTime,
    sleeps: Vec<Duration>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                now: start,
                sleeps: Vec::new(),
            })),
        }
    }

    /// Move the clock forward without recording a sleep
    pub fn advance(&self, duration: Duration) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.now += to_chrono(duration);
    }

    /// Jump to an absolute time
    pub fn set(&self, now: NaiveDateTime) {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).now = now;
    }

    /// Every sleep requested so far, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .sleeps
            .clone()
    }

    /// Sum of all requested sleeps
    pub fn total_slept(&self) -> Duration {
        self.sleeps().iter().sum()
    }
}

impl Default for ManualClock {
    /// A clock starting at 2024-01-01 09:00:00
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap_or_default();
        Self::new(start)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).now
    }

    fn sleep(&self, duration: Duration) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.now += to_chrono(duration);
        state.sleeps.push(duration);
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }

    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration)
    }
}

fn to_chrono(duration: Duration) -> ChronoDuration {
    ChronoDuration::from_std(duration).unwrap_or_else(|_| ChronoDuration::zero())
}
