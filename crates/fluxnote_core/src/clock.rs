//! Timestamp source for note lifecycle fields.
//!
//! # Invariants
//! - Timestamps are ISO-8601 UTC with millisecond precision and a `Z`
//!   suffix, so lexical order equals chronological order.
//! - `SystemClock` never hands out the same or an earlier value twice within
//!   one process.
//! - A reading never precedes any value passed to [`Clock::observe`], so
//!   timestamps already on disk stay behind new ones after a restart.

use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Shared clock handle used by repository and intents.
pub type SharedClock = Arc<dyn Clock>;

pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds.
    fn now_millis(&self) -> i64;

    /// Current time formatted for storage.
    fn now_iso(&self) -> String {
        format_iso_millis(self.now_millis())
    }

    /// Moves the clock so the next reading is strictly after `millis`.
    fn observe(&self, millis: i64);
}

/// Wall clock that is strictly increasing per instance.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_millis: AtomicI64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedClock {
        Arc::new(Self::new())
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        let wall = Utc::now().timestamp_millis();
        let mut previous = self.last_millis.load(Ordering::Relaxed);
        loop {
            let next = wall.max(previous + 1);
            match self.last_millis.compare_exchange_weak(
                previous,
                next,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return next,
                Err(current) => previous = current,
            }
        }
    }

    fn observe(&self, millis: i64) {
        self.last_millis.fetch_max(millis, Ordering::Relaxed);
    }
}

/// Deterministic clock that advances by a fixed step per reading.
#[derive(Debug)]
pub struct SteppingClock {
    next_millis: AtomicI64,
    step_millis: i64,
}

impl SteppingClock {
    pub fn new(start_millis: i64, step_millis: i64) -> Self {
        Self {
            next_millis: AtomicI64::new(start_millis),
            step_millis,
        }
    }

    pub fn shared(start_millis: i64, step_millis: i64) -> SharedClock {
        Arc::new(Self::new(start_millis, step_millis))
    }
}

impl Clock for SteppingClock {
    fn now_millis(&self) -> i64 {
        self.next_millis
            .fetch_add(self.step_millis, Ordering::Relaxed)
    }

    fn observe(&self, millis: i64) {
        self.next_millis
            .fetch_max(millis.saturating_add(1), Ordering::Relaxed);
    }
}

/// Formats epoch milliseconds as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
///
/// Values outside chrono's range clamp to its first or last instant.
pub fn format_iso_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or(if millis < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored RFC 3339 timestamp back to epoch milliseconds.
pub fn parse_iso_millis(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|parsed| parsed.timestamp_millis())
}

/// Current wall time formatted like [`format_iso_millis`].
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::{format_iso_millis, parse_iso_millis, Clock, SteppingClock, SystemClock};

    #[test]
    fn format_matches_javascript_iso_shape() {
        assert_eq!(format_iso_millis(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(
            format_iso_millis(1_700_000_000_123),
            "2023-11-14T22:13:20.123Z"
        );
    }

    #[test]
    fn out_of_range_millis_clamp_instead_of_resetting_to_epoch() {
        let late = format_iso_millis(i64::MAX);
        let early = format_iso_millis(i64::MIN);
        assert_ne!(late, "1970-01-01T00:00:00.000Z");
        assert_ne!(early, "1970-01-01T00:00:00.000Z");
        assert_ne!(late, early);
    }

    #[test]
    fn parse_reads_back_formatted_value() {
        assert_eq!(
            parse_iso_millis("2023-11-14T22:13:20.123Z"),
            Some(1_700_000_000_123)
        );
        assert_eq!(parse_iso_millis("not a time"), None);
    }

    #[test]
    fn system_clock_jumps_past_observed_future_value() {
        let clock = SystemClock::new();
        let future = 4_070_908_800_000; // 2099-01-01
        clock.observe(future);
        assert!(clock.now_millis() > future);
        assert!(clock.now_iso() > format_iso_millis(future));
    }

    #[test]
    fn stepping_clock_never_reads_at_or_before_observed_value() {
        let clock = SteppingClock::new(1_000, 250);
        clock.observe(5_000);
        assert_eq!(clock.now_millis(), 5_001);
        clock.observe(10);
        assert_eq!(clock.now_millis(), 5_251);
    }

    #[test]
    fn system_clock_is_strictly_increasing() {
        let clock = SystemClock::new();
        let mut previous = clock.now_iso();
        for _ in 0..100 {
            let current = clock.now_iso();
            assert!(current > previous, "{current} should be after {previous}");
            previous = current;
        }
    }

    #[test]
    fn stepping_clock_advances_by_step() {
        let clock = SteppingClock::new(1_000, 250);
        assert_eq!(clock.now_millis(), 1_000);
        assert_eq!(clock.now_millis(), 1_250);
    }
}
