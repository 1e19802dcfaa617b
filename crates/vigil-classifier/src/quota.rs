//! Request quota tracking
//!
//! Two rolling limits gate every external call: a daily count that resets
//! when the calendar date changes, and a per-minute count that resets once
//! 60 seconds have passed since the last recorded request.

use chrono::{Duration as ChronoDuration, NaiveDateTime};
use std::time::Duration;
use tracing::{debug, info};
use vigil_domain::Clock;

/// Gap after which the per-minute window is considered fresh
const MINUTE_WINDOW_SECS: i64 = 60;

/// Daily and per-minute request counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaTracker {
    daily_limit: u32,
    per_minute_limit: u32,
    daily_count: u32,
    minute_count: u32,
    day_start: NaiveDateTime,
    last_request: NaiveDateTime,
}

impl QuotaTracker {
    /// Create a tracker with empty counters anchored at `now`
    pub fn new(daily_limit: u32, per_minute_limit: u32, now: NaiveDateTime) -> Self {
        Self {
            daily_limit,
            per_minute_limit,
            daily_count: 0,
            minute_count: 0,
            day_start: now,
            last_request: now,
        }
    }

    /// Roll the windows forward to `now`, then report whether one more
    /// request fits under both limits
    pub fn can_make_request(&mut self, now: NaiveDateTime) -> bool {
        if now.date() != self.day_start.date() {
            debug!("New day, resetting daily request count");
            self.daily_count = 0;
            self.day_start = now;
        }

        if now - self.last_request >= ChronoDuration::seconds(MINUTE_WINDOW_SECS) {
            self.minute_count = 0;
        }

        self.daily_count < self.daily_limit && self.minute_count < self.per_minute_limit
    }

    /// Count one external call made at `now`
    pub fn record_request(&mut self, now: NaiveDateTime) {
        self.daily_count += 1;
        self.minute_count += 1;
        self.last_request = now;
    }

    /// Block on `clock` until a request is permitted, polling every `poll`
    ///
    /// Returns the number of polls spent waiting. A daily limit with no date
    /// change ahead keeps this waiting until midnight.
    pub fn wait_until_permitted<C: Clock + ?Sized>(&mut self, clock: &C, poll: Duration) -> u32 {
        let mut polls = 0;
        while !self.can_make_request(clock.now()) {
            if polls == 0 {
                info!(
                    "Request quota reached (daily {}/{}, minute {}/{}), waiting",
                    self.daily_count, self.daily_limit, self.minute_count, self.per_minute_limit
                );
            }
            clock.sleep(poll);
            polls += 1;
        }
        if polls > 0 {
            debug!("Quota available after {} polls", polls);
        }
        polls
    }

    /// Requests counted today
    pub fn daily_count(&self) -> u32 {
        self.daily_count
    }

    /// Requests counted in the current minute window
    pub fn minute_count(&self) -> u32 {
        self.minute_count
    }

    /// Daily ceiling
    pub fn daily_limit(&self) -> u32 {
        self.daily_limit
    }

    /// Per-minute ceiling
    pub fn per_minute_limit(&self) -> u32 {
        self.per_minute_limit
    }

    /// Requests left today
    pub fn remaining_today(&self) -> u32 {
        self.daily_limit.saturating_sub(self.daily_count)
    }

    /// Start of the current daily window
    pub fn day_start(&self) -> NaiveDateTime {
        self.day_start
    }

    /// Time of the most recent request
    pub fn last_request(&self) -> NaiveDateTime {
        self.last_request
    }
}
