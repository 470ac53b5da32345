//! Current-time sources for time functions
//!
//! The registry holds a clock instead of calling the system directly, so a
//! context can be pinned to a fixed instant.

use chrono::{Local, NaiveDateTime};

/// Source of "now"
pub trait Clock: Send + Sync {
    /// Returns the current local time
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time in the local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: NaiveDateTime,
}

impl FixedClock {
    /// Creates a clock that always reports `instant`
    pub fn new(instant: NaiveDateTime) -> Self {
        Self { instant }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixed_clock_is_stable() {
        let instant = NaiveDate::from_ymd_opt(2022, 8, 22)
            .unwrap()
            .and_hms_opt(15, 8, 0)
            .unwrap();
        let clock = FixedClock::new(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }
}
