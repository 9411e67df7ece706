//! Wall clock access and the day-rollover rule.
//!
//! The engine never reads the system time directly; it asks a [`Clock`],
//! so tests can pin "now" to any instant. [`TimeResolver`] turns an
//! instant into a minute of the school day plus the calendar date whose
//! schedule should be shown.
//!
//! # Cutoff rule
//! Once the local time reaches the cutoff (14:45 by default) the school day
//! is effectively over, and the lookup date moves to tomorrow. Weekends
//! are not special-cased here; the day classifier handles them.

use std::cell::Cell;

use chrono::{DateTime, Days, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;

use crate::models::{hm, Minute};

/// Default school timezone.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::America::New_York;

/// Default cutoff: 14:45.
pub const DEFAULT_CUTOFF_MINUTE: Minute = hm(14, 45);

/// Source of the current instant.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that reports a settable instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: Cell<DateTime<Utc>>,
}

impl FixedClock {
    /// Creates a clock stopped at `instant`.
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Cell::new(instant),
        }
    }

    /// Moves the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.instant.set(instant);
    }

    /// Moves the clock forward.
    pub fn advance(&self, by: chrono::Duration) {
        self.instant.set(self.instant.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant.get()
    }
}

/// A clock reading resolved against the school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTime {
    /// Today's date in the school timezone.
    pub local_date: NaiveDate,
    /// Date whose schedule applies: today, or tomorrow past the cutoff.
    pub lookup_date: NaiveDate,
    /// Minutes since local midnight, `0..1440`.
    pub minute_of_day: Minute,
    /// Whether the cutoff moved the lookup date to tomorrow.
    pub rolled_over: bool,
}

/// Resolves instants in one fixed school timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeResolver {
    timezone: Tz,
    cutoff_minute: Minute,
}

impl TimeResolver {
    /// Creates a resolver for a timezone and cutoff minute.
    pub fn new(timezone: Tz, cutoff_minute: Minute) -> Self {
        Self {
            timezone,
            cutoff_minute,
        }
    }

    /// The school timezone.
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// The rollover cutoff minute.
    pub fn cutoff_minute(&self) -> Minute {
        self.cutoff_minute
    }

    /// Resolves `now` to a lookup date and minute of day.
    pub fn resolve(&self, now: DateTime<Utc>) -> ResolvedTime {
        let local = now.with_timezone(&self.timezone);
        let local_date = local.date_naive();
        // hour() < 24 and minute() < 60, so this stays below 1440.
        let minute_of_day = hm(local.hour() as u16, local.minute() as u16);

        let rolled_over = minute_of_day >= self.cutoff_minute;
        let lookup_date = if rolled_over {
            local_date
                .checked_add_days(Days::new(1))
                .unwrap_or(local_date)
        } else {
            local_date
        };

        ResolvedTime {
            local_date,
            lookup_date,
            minute_of_day,
            rolled_over,
        }
    }
}

impl Default for TimeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEZONE, DEFAULT_CUTOFF_MINUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        DEFAULT_TIMEZONE
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_minute_of_day_in_school_zone() {
        let r = TimeResolver::default().resolve(local(2026, 10, 19, 9, 15));
        assert_eq!(r.minute_of_day, 555);
        assert_eq!(r.local_date, date(2026, 10, 19));
        assert_eq!(r.lookup_date, date(2026, 10, 19));
        assert!(!r.rolled_over);
    }

    #[test]
    fn test_cutoff_boundary() {
        let resolver = TimeResolver::default();

        let before = resolver.resolve(local(2026, 10, 19, 14, 44));
        assert_eq!(before.lookup_date, date(2026, 10, 19));
        assert!(!before.rolled_over);

        let at = resolver.resolve(local(2026, 10, 19, 14, 45));
        assert_eq!(at.lookup_date, date(2026, 10, 20));
        assert_eq!(at.minute_of_day, 885);
        assert!(at.rolled_over);
    }

    #[test]
    fn test_rollover_crosses_month_and_weekend() {
        let r = TimeResolver::default().resolve(local(2026, 10, 31, 16, 0));
        assert_eq!(r.lookup_date, date(2026, 11, 1)); // Saturday -> Sunday; classifier decides
    }

    #[test]
    fn test_utc_evening_is_still_local_afternoon() {
        // 18:30 UTC on a DST day is 14:30 in New York.
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 18, 30, 0).unwrap();
        let r = TimeResolver::default().resolve(now);
        assert_eq!(r.minute_of_day, hm(14, 30));
        assert_eq!(r.lookup_date, date(2026, 10, 19));
    }

    #[test]
    fn test_custom_zone_and_cutoff() {
        let resolver = TimeResolver::new(chrono_tz::America::Los_Angeles, hm(15, 0));
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 21, 59, 0).unwrap(); // 14:59 PDT
        let r = resolver.resolve(now);
        assert_eq!(r.minute_of_day, hm(14, 59));
        assert!(!r.rolled_over);
        assert_eq!(resolver.cutoff_minute(), 900);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(local(2026, 10, 19, 7, 0));
        clock.advance(chrono::Duration::minutes(40));
        assert_eq!(TimeResolver::default().resolve(clock.now()).minute_of_day, 460);

        clock.set(local(2026, 10, 20, 12, 0));
        assert_eq!((&clock).now(), local(2026, 10, 20, 12, 0));
    }
}
