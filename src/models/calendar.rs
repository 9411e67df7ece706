//! Calendar and time window models.
//!
//! Defines the minute-of-day time window used by every bell schedule,
//! and the calendar feed snapshot the day classifier reads from.
//!
//! # Time Model
//! All times of day are whole minutes since local midnight in the
//! school timezone, `0..=1440`. Calendar dates carry no time component.
//!
//! # Snapshot
//! A feed delivers rows in any order, possibly with duplicates or bad
//! dates. [`CalendarSnapshot`] keeps at most one entry per date, sorted
//! ascending, and silently drops rows whose date does not parse.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

/// Minutes since local midnight.
pub type Minute = u16;

/// Number of minutes in a day; the exclusive upper bound of a minute-of-day.
pub const MINUTES_PER_DAY: Minute = 1440;

/// Converts a wall-clock `hour:minute` into minutes since midnight.
#[inline]
pub const fn hm(hour: u16, minute: u16) -> Minute {
    hour * 60 + minute
}

/// Renders a minute-of-day as a 12-hour clock string (`10:51 AM`).
pub fn format_minute(minute: Minute) -> String {
    let minute = minute % MINUTES_PER_DAY;
    let (hour, min) = (minute / 60, minute % 60);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12}:{min:02} {suffix}")
}

/// A time interval [start, end) in minutes of the day.
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    /// Interval start (minute, inclusive).
    pub start_minute: Minute,
    /// Interval end (minute, exclusive).
    pub end_minute: Minute,
}

impl TimeWindow {
    /// Creates a new time window.
    pub const fn new(start_minute: Minute, end_minute: Minute) -> Self {
        Self {
            start_minute,
            end_minute,
        }
    }

    /// Creates a window from two `(hour, minute)` wall-clock readings.
    pub const fn clock(start: (u16, u16), end: (u16, u16)) -> Self {
        Self::new(hm(start.0, start.1), hm(end.0, end.1))
    }

    /// Duration of this window (minutes).
    #[inline]
    pub fn duration_minutes(&self) -> Minute {
        self.end_minute.saturating_sub(self.start_minute)
    }

    /// Whether a minute falls within this window.
    #[inline]
    pub fn contains(&self, minute: Minute) -> bool {
        minute >= self.start_minute && minute < self.end_minute
    }

    /// Whether two windows overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }

    /// Whether `other` lies entirely inside this window.
    pub fn encloses(&self, other: &Self) -> bool {
        other.start_minute >= self.start_minute && other.end_minute <= self.end_minute
    }

    /// Whether the window is non-empty and fits inside one day.
    pub fn is_well_formed(&self) -> bool {
        self.start_minute < self.end_minute && self.end_minute <= MINUTES_PER_DAY
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            format_minute(self.start_minute),
            format_minute(self.end_minute)
        )
    }
}

/// The A/B rotation label of a school day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotationCode {
    /// "A" day.
    #[serde(rename = "A")]
    A,
    /// "B" day.
    #[serde(rename = "B")]
    B,
    /// No rotation label (empty or unrecognized code).
    #[default]
    #[serde(rename = "")]
    Unlabeled,
}

impl RotationCode {
    /// Reads a feed `day_code` verbatim. Anything other than exactly `A` or
    /// `B` is unlabeled.
    pub fn parse(code: &str) -> Self {
        match code {
            "A" => RotationCode::A,
            "B" => RotationCode::B,
            _ => RotationCode::Unlabeled,
        }
    }

    /// The code as it appears in the feed.
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationCode::A => "A",
            RotationCode::B => "B",
            RotationCode::Unlabeled => "",
        }
    }
}

/// One row of the calendar feed, exactly as delivered.
///
/// Missing fields deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCalendarRow {
    /// ISO `YYYY-MM-DD` local date.
    pub date: String,
    /// `"A"`, `"B"`, or empty.
    pub day_code: String,
    /// Free-text day status token.
    pub school_status: String,
    /// Free text; only read for exam periods.
    pub notes: String,
}

impl RawCalendarRow {
    /// Creates a row from its four fields.
    pub fn new(
        date: impl Into<String>,
        day_code: impl Into<String>,
        school_status: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            day_code: day_code.into(),
            school_status: school_status.into(),
            notes: notes.into(),
        }
    }
}

/// A parsed calendar entry for one school date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    /// Local calendar date.
    pub date: NaiveDate,
    /// A/B rotation label.
    pub rotation_code: RotationCode,
    /// Raw day-status token (classified later).
    pub day_status: String,
    /// Free-text notes.
    pub notes: String,
}

impl CalendarEntry {
    /// Creates an entry.
    pub fn new(
        date: NaiveDate,
        rotation_code: RotationCode,
        day_status: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date,
            rotation_code,
            day_status: day_status.into(),
            notes: notes.into(),
        }
    }

    /// Parses a raw feed row. Returns `None` if the date is empty or malformed.
    pub fn from_row(row: &RawCalendarRow) -> Option<Self> {
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d").ok()?;
        Some(Self::new(
            date,
            RotationCode::parse(&row.day_code),
            row.school_status.clone(),
            row.notes.clone(),
        ))
    }
}

/// Immutable view of one calendar fetch: at most one entry per date, ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarSnapshot {
    entries: BTreeMap<NaiveDate, CalendarEntry>,
}

impl CalendarSnapshot {
    /// Creates an empty snapshot (feed unavailable).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from raw feed rows.
    ///
    /// Rows with an unparseable date are dropped. When a date repeats,
    /// the later row wins.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a RawCalendarRow>) -> Self {
        let mut dropped = 0usize;
        let entries = rows
            .into_iter()
            .filter_map(|row| {
                let entry = CalendarEntry::from_row(row);
                if entry.is_none() {
                    dropped += 1;
                }
                entry
            })
            .map(|entry| (entry.date, entry))
            .collect::<BTreeMap<_, _>>();

        if dropped > 0 {
            warn!("calendar feed: discarded {dropped} row(s) with an invalid date");
        }
        Self { entries }
    }

    /// Builds a snapshot from already parsed entries (later duplicates win).
    pub fn from_entries(entries: impl IntoIterator<Item = CalendarEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.date, e)).collect(),
        }
    }

    /// The entry for a date, if the feed has one.
    pub fn entry(&self, date: NaiveDate) -> Option<&CalendarEntry> {
        self.entries.get(&date)
    }

    /// Entries strictly after `date`, ascending.
    pub fn entries_after(&self, date: NaiveDate) -> impl Iterator<Item = &CalendarEntry> {
        self.entries
            .range((std::ops::Bound::Excluded(date), std::ops::Bound::Unbounded))
            .map(|(_, entry)| entry)
    }

    /// All entries, ascending by date.
    pub fn iter(&self) -> impl Iterator<Item = &CalendarEntry> {
        self.entries.values()
    }

    /// Number of distinct dates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
