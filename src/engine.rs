//! The resolution pipeline.
//!
//! ```text
//! clock ──► TimeResolver ──► lookup date, minute
//!                                │
//! feed ──► CalendarCache ──► DayClassifier ──► StatusResolver ──► Resolution
//! ```
//!
//! [`resolve_day`] is the pure core: snapshot + resolved time in,
//! [`Resolution`] out. [`BellEngine`] owns the injectable clock, the feed
//! and the snapshot cache around it.
//!
//! # Polling
//! A driver calls [`BellEngine::resolve_now`] on a timer. Resolution takes
//! `&mut self`, so two resolutions on one engine can never overlap.

use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};
use serde::Serialize;

use crate::catalog::ScheduleCatalog;
use crate::classifier::DayClassifier;
use crate::clock::{Clock, ResolvedTime, TimeResolver};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::feed::{CalendarCache, CalendarFeed};
use crate::models::{
    CalendarSnapshot, Classification, DayCategory, Minute, ScheduleStatus, SecondaryLine,
};
use crate::resolver::{headline, StatusResolver};

/// One full answer: which day, which minute, what is happening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Date whose schedule is shown.
    pub lookup_date: NaiveDate,
    /// Local minute of day the status was resolved for.
    pub minute_of_day: Minute,
    /// Whether the cutoff moved the lookup date to tomorrow.
    pub rolled_over: bool,
    /// Day classification.
    pub classification: Classification,
    /// Current status.
    pub status: ScheduleStatus,
}

/// Resolves one moment against one calendar snapshot.
///
/// An empty snapshot (feed unavailable) always yields the unavailable
/// status. After the cutoff, tomorrow's schedule is resolved as of
/// midnight, so it reads "School starts".
pub fn resolve_day(
    snapshot: &CalendarSnapshot,
    time: ResolvedTime,
    resolver: &StatusResolver,
) -> Resolution {
    let lookup_date = time.lookup_date;
    let classification = if snapshot.is_empty() {
        Classification::terminal(DayCategory::Unavailable)
    } else {
        DayClassifier::classify_date(snapshot, lookup_date)
    };
    let minute = if time.rolled_over { 0 } else { time.minute_of_day };

    let status = match &classification.category {
        DayCategory::Instructional => resolver.resolve(
            ScheduleCatalog::variant(classification.variant),
            classification.rotation,
            minute,
        ),
        DayCategory::Weekend => {
            with_next_school_day(ScheduleStatus::weekend(), snapshot, lookup_date)
        }
        DayCategory::Closed => {
            with_next_school_day(ScheduleStatus::closed(), snapshot, lookup_date)
        }
        DayCategory::Exam(day) => ScheduleStatus::exam(day),
        DayCategory::Unavailable => ScheduleStatus::unavailable(),
    };

    debug!(
        "resolved {lookup_date} minute {minute}: {} / {}",
        status.headline, status.primary_label
    );

    Resolution {
        lookup_date,
        minute_of_day: minute,
        rolled_over: time.rolled_over,
        classification,
        status,
    }
}

fn with_next_school_day(
    status: ScheduleStatus,
    snapshot: &CalendarSnapshot,
    after: NaiveDate,
) -> ScheduleStatus {
    match DayClassifier::next_school_day(snapshot, after) {
        Some((date, next)) => status.with_line(SecondaryLine::other(format!(
            "Next school day: {} ({})",
            date.format("%a, %b %-d"),
            headline(next.variant, next.rotation)
        ))),
        None => status,
    }
}

/// Clock, feed and cache wrapped around [`resolve_day`].
#[derive(Debug)]
pub struct BellEngine<F, C> {
    feed: F,
    clock: C,
    time: TimeResolver,
    resolver: StatusResolver,
    cache: CalendarCache,
    keep_last_on_failure: bool,
}

impl<F: CalendarFeed, C: Clock> BellEngine<F, C> {
    /// Creates an engine from a validated config.
    pub fn new(feed: F, clock: C, config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            feed,
            clock,
            time: config.time_resolver()?,
            resolver: StatusResolver::standard(),
            cache: CalendarCache::new(config.cache_ttl()),
            keep_last_on_failure: config.keep_last_on_failure,
        })
    }

    /// Creates an engine with the default timezone, cutoff and cache window.
    pub fn with_defaults(feed: F, clock: C) -> Self {
        let config = EngineConfig::default();
        Self {
            feed,
            clock,
            time: TimeResolver::default(),
            resolver: StatusResolver::standard(),
            cache: CalendarCache::new(config.cache_ttl()),
            keep_last_on_failure: config.keep_last_on_failure,
        }
    }

    /// The engine's clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The time resolver in use.
    pub fn time_resolver(&self) -> &TimeResolver {
        &self.time
    }

    /// Resolves the status at the clock's current instant.
    pub fn resolve_now(&mut self) -> Resolution {
        let now = self.clock.now();
        self.resolve_at(now)
    }

    /// Resolves the status at `now`, fetching the calendar if the cache is stale.
    pub fn resolve_at(&mut self, now: DateTime<Utc>) -> Resolution {
        if !self.cache.is_fresh(now) {
            self.refresh(now);
        }
        let time = self.time.resolve(now);
        let empty = CalendarSnapshot::empty();
        let snapshot = self.cache.snapshot().unwrap_or(&empty);
        resolve_day(snapshot, time, &self.resolver)
    }

    /// Fetches the calendar now, regardless of cache age.
    ///
    /// A failed fetch leaves an empty snapshot, so the status reads
    /// unavailable until the next fetch. With `keepLastOnFailure` set, the
    /// previous snapshot stays in use instead.
    pub fn refresh(&mut self, now: DateTime<Utc>) {
        match self.feed.fetch() {
            Ok(rows) => {
                let snapshot = CalendarSnapshot::from_rows(&rows);
                info!(
                    "calendar refreshed: {} rows, {} dates",
                    rows.len(),
                    snapshot.len()
                );
                self.cache.store(snapshot, now);
            }
            Err(err) => {
                warn!("calendar fetch failed: {err}");
                if self.keep_last_on_failure {
                    self.cache.mark_failed(now);
                } else {
                    self.cache.store(CalendarSnapshot::empty(), now);
                }
            }
        }
    }

    /// Drops the cached fetch time so the next resolution refetches.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::FeedError;
    use crate::feed::StaticFeed;
    use crate::models::{RawCalendarRow, VariantName, SCHOOL_STARTS, UNAVAILABLE};
    use chrono::TimeZone;
    use std::cell::Cell;

    fn local(d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        chrono_tz::America::New_York
            .with_ymd_and_hms(2026, 10, d, h, mi, 0)
            .single()
            .unwrap()
            .with_timezone(&Utc)
    }

    fn rows() -> Vec<RawCalendarRow> {
        vec![
            RawCalendarRow::new("2026-10-16", "B", "", ""),
            RawCalendarRow::new("2026-10-19", "A", "", ""),
            RawCalendarRow::new("2026-10-20", "B", "ERD", ""),
            RawCalendarRow::new("2026-10-21", "", "closed", ""),
            RawCalendarRow::new("2026-10-22", "", "Finals", "P1, P5"),
            RawCalendarRow::new("2026-10-23", "", "psd", ""),
        ]
    }

    /// Counts fetches and can be switched to fail.
    #[derive(Debug, Default)]
    struct CountingFeed {
        rows: Vec<RawCalendarRow>,
        calls: Cell<usize>,
        failing: Cell<bool>,
    }

    impl CalendarFeed for CountingFeed {
        fn fetch(&self) -> Result<Vec<RawCalendarRow>, FeedError> {
            self.calls.set(self.calls.get() + 1);
            if self.failing.get() {
                return Err(FeedError::Unavailable("timeout".into()));
            }
            Ok(self.rows.clone())
        }
    }

    #[test]
    fn test_regular_day_resolution() {
        let clock = FixedClock::new(local(19, 9, 15));
        let mut engine = BellEngine::with_defaults(StaticFeed::new(rows()), &clock);
        let r = engine.resolve_now();

        assert_eq!(r.lookup_date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(r.classification.category, DayCategory::Instructional);
        assert_eq!(r.status.headline, "White Day");
        assert_eq!(r.status.primary_label, "Passing Period");
    }

    #[test]
    fn test_rollover_shows_tomorrow_from_the_start() {
        let clock = FixedClock::new(local(19, 15, 0));
        let mut engine = BellEngine::with_defaults(StaticFeed::new(rows()), &clock);
        let r = engine.resolve_now();

        assert!(r.rolled_over);
        assert_eq!(r.lookup_date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
        assert_eq!(r.minute_of_day, 0);
        assert_eq!(r.classification.variant, VariantName::EarlyRelease);
        assert_eq!(r.status.headline, "Blue Day");
        assert_eq!(r.status.primary_label, SCHOOL_STARTS);
        assert_eq!(r.status.next_label.as_deref(), Some("Period 1/5"));
    }

    #[test]
    fn test_terminal_days() {
        let clock = FixedClock::new(local(21, 10, 0));
        let mut engine = BellEngine::with_defaults(StaticFeed::new(rows()), &clock);

        let closed = engine.resolve_now();
        assert_eq!(closed.status.headline, "School Closed");
        assert_eq!(
            closed.status.secondary_lines[0].text,
            "Next school day: Fri, Oct 23 (Professional Study Day)"
        );

        clock.set(local(22, 10, 0));
        let exam = engine.resolve_now();
        assert_eq!(exam.status.headline, "Finals");
        assert_eq!(exam.status.primary_label, "Exams: periods 1, 5");

        clock.set(local(17, 10, 0));
        let weekend = engine.resolve_now();
        assert_eq!(weekend.status.headline, "Weekend");
        assert_eq!(
            weekend.status.secondary_lines[0].text,
            "Next school day: Mon, Oct 19 (White Day)"
        );
    }

    #[test]
    fn test_missing_date_unavailable() {
        let clock = FixedClock::new(local(26, 10, 0));
        let mut engine = BellEngine::with_defaults(StaticFeed::new(rows()), &clock);
        let r = engine.resolve_now();
        assert_eq!(r.classification.category, DayCategory::Unavailable);
        assert_eq!(r.status.primary_label, UNAVAILABLE);
    }

    #[test]
    fn test_cache_reuse_and_refresh() {
        let feed = CountingFeed {
            rows: rows(),
            ..Default::default()
        };
        let clock = FixedClock::new(local(19, 8, 0));
        let mut engine = BellEngine::with_defaults(&feed, &clock);

        engine.resolve_now();
        clock.advance(chrono::Duration::minutes(1));
        engine.resolve_now();
        assert_eq!(feed.calls.get(), 1);

        clock.advance(chrono::Duration::minutes(5));
        engine.resolve_now();
        assert_eq!(feed.calls.get(), 2);

        engine.invalidate();
        engine.resolve_now();
        assert_eq!(feed.calls.get(), 3);
    }

    #[test]
    fn test_feed_failure_after_success_is_unavailable() {
        let feed = CountingFeed {
            rows: rows(),
            ..Default::default()
        };
        let clock = FixedClock::new(local(19, 8, 0));
        let mut engine = BellEngine::with_defaults(&feed, &clock);
        assert_eq!(engine.resolve_now().status.primary_label, "Period 1/5");

        feed.failing.set(true);
        clock.advance(chrono::Duration::minutes(80));
        let r = engine.resolve_now();
        assert_eq!(feed.calls.get(), 2);
        assert_eq!(r.classification.category, DayCategory::Unavailable);
        assert_eq!(r.status.primary_label, UNAVAILABLE);

        // The feed recovers once the failed attempt ages out.
        feed.failing.set(false);
        clock.advance(chrono::Duration::minutes(5));
        assert_eq!(engine.resolve_now().status.primary_label, "Period 2/6");
        assert_eq!(feed.calls.get(), 3);
    }

    #[test]
    fn test_feed_failure_keeps_last_snapshot_when_configured() {
        let feed = CountingFeed {
            rows: rows(),
            ..Default::default()
        };
        let config = EngineConfig {
            keep_last_on_failure: true,
            ..EngineConfig::default()
        };
        let clock = FixedClock::new(local(19, 8, 0));
        let mut engine = BellEngine::new(&feed, &clock, &config).unwrap();
        assert_eq!(engine.resolve_now().status.primary_label, "Period 1/5");

        feed.failing.set(true);
        clock.advance(chrono::Duration::minutes(80));
        let r = engine.resolve_now();
        assert_eq!(feed.calls.get(), 2);
        assert_eq!(r.status.primary_label, "Period 2/6");
    }

    #[test]
    fn test_feed_failure_without_snapshot_is_unavailable() {
        let feed = CountingFeed::default();
        feed.failing.set(true);
        let clock = FixedClock::new(local(19, 8, 0));
        let mut engine = BellEngine::with_defaults(&feed, &clock);
        assert!(engine.resolve_now().status.is_unavailable());
    }

    #[test]
    fn test_new_rejects_bad_config() {
        let config = EngineConfig {
            timezone: "Nowhere/Town".into(),
            ..EngineConfig::default()
        };
        let clock = FixedClock::new(local(19, 8, 0));
        assert!(BellEngine::new(StaticFeed::default(), &clock, &config).is_err());
    }
}
