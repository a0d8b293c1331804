//! Time source for entry timestamps
//!
//! The service never calls `Utc::now()` directly; it asks its [`Clock`].
//! Production code uses [`SystemClock`], tests drive a [`ManualClock`].

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Source of wall-clock timestamps
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock that never runs backwards
///
/// If the system time steps back (NTP correction, manual change), the last
/// issued timestamp is repeated until real time catches up.
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `reading` and return it, or the last issued time if that is later
    fn issue(&self, reading: DateTime<Utc>) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let now = (*last).map_or(reading, |prev| prev.max(reading));
        *last = Some(now);
        now
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        self.issue(Utc::now())
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward (or back, for a negative duration)
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_system_clock_is_non_decreasing() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_system_clock_holds_through_backward_step() {
        let clock = SystemClock::new();
        let later = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let earlier = later - Duration::seconds(30);

        assert_eq!(clock.issue(later), later);
        assert_eq!(clock.issue(earlier), later);
        assert_eq!(clock.issue(later + Duration::seconds(1)), later + Duration::seconds(1));
    }

    #[test]
    fn test_manual_clock_moves_only_on_request() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::minutes(15));
        assert_eq!(clock.now(), start + Duration::minutes(15));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
