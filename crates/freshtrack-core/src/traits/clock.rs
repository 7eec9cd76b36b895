//! Time source used by the record policy and the expiration sweep.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Supplies the current instant and the current local calendar date.
///
/// Threshold arithmetic works on `today()`; duplicate lookback windows work
/// on `now()`.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// The current calendar date in server local time.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A manually driven clock for tests and replays.
///
/// Clones share the same underlying instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    inner: Arc<RwLock<(DateTime<Utc>, NaiveDate)>>,
}

impl FixedClock {
    /// Create a clock frozen at `now`, with `today` being the UTC date of `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(RwLock::new((now, now.date_naive()))),
        }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = (now, now.date_naive());
        }
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: chrono::Duration) {
        let next = self.now() + delta;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.inner
            .read()
            .map(|guard| guard.0)
            .unwrap_or_else(|poisoned| poisoned.into_inner().0)
    }

    fn today(&self) -> NaiveDate {
        self.inner
            .read()
            .map(|guard| guard.1)
            .unwrap_or_else(|poisoned| poisoned.into_inner().1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_fixed_clock_advance_changes_date() {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());

        let shared = clock.clone();
        clock.advance(Duration::days(1));
        assert_eq!(shared.now(), start + Duration::days(1));
        assert_eq!(shared.today(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    }
}
