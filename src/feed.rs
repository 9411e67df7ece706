//! Calendar feed collaborators and the snapshot cache.
//!
//! The calendar source is external; the engine only needs "give me all
//! rows". Each successful fetch becomes a fresh immutable
//! [`CalendarSnapshot`]. The [`CalendarCache`] decides when a snapshot is
//! old enough to fetch again.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::FeedError;
use crate::models::{CalendarSnapshot, RawCalendarRow};

/// Source of calendar rows.
pub trait CalendarFeed {
    /// Fetches every row the source currently has.
    fn fetch(&self) -> Result<Vec<RawCalendarRow>, FeedError>;
}

impl<F: CalendarFeed + ?Sized> CalendarFeed for &F {
    fn fetch(&self) -> Result<Vec<RawCalendarRow>, FeedError> {
        (**self).fetch()
    }
}

/// Parses a JSON array of calendar rows.
pub fn parse_rows(json: &str) -> Result<Vec<RawCalendarRow>, FeedError> {
    Ok(serde_json::from_str(json)?)
}

/// A fixed, in-memory set of rows.
#[derive(Debug, Clone, Default)]
pub struct StaticFeed {
    rows: Vec<RawCalendarRow>,
}

impl StaticFeed {
    /// Creates a feed that always returns `rows`.
    pub fn new(rows: Vec<RawCalendarRow>) -> Self {
        Self { rows }
    }
}

impl CalendarFeed for StaticFeed {
    fn fetch(&self) -> Result<Vec<RawCalendarRow>, FeedError> {
        Ok(self.rows.clone())
    }
}

/// Reads rows from a JSON file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileFeed {
    path: PathBuf,
}

impl JsonFileFeed {
    /// Creates a feed backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CalendarFeed for JsonFileFeed {
    fn fetch(&self) -> Result<Vec<RawCalendarRow>, FeedError> {
        let json = std::fs::read_to_string(&self.path)?;
        parse_rows(&json)
    }
}

/// The last calendar snapshot and when it was fetched.
#[derive(Debug, Clone)]
pub struct CalendarCache {
    snapshot: Option<CalendarSnapshot>,
    fetched_at: Option<DateTime<Utc>>,
    ttl: chrono::Duration,
}

impl CalendarCache {
    /// Creates an empty cache with a reuse window.
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            snapshot: None,
            fetched_at: None,
            ttl,
        }
    }

    /// Whether the last fetch attempt is recent enough to skip fetching.
    ///
    /// A clock that moved backwards also counts as stale.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        match self.fetched_at {
            Some(at) => now >= at && now - at < self.ttl,
            None => false,
        }
    }

    /// Stores a new snapshot fetched at `now`.
    pub fn store(&mut self, snapshot: CalendarSnapshot, now: DateTime<Utc>) {
        self.snapshot = Some(snapshot);
        self.fetched_at = Some(now);
    }

    /// Records a failed fetch at `now`, keeping any previous snapshot.
    pub fn mark_failed(&mut self, now: DateTime<Utc>) {
        self.fetched_at = Some(now);
    }

    /// The cached snapshot, if any fetch has succeeded.
    pub fn snapshot(&self) -> Option<&CalendarSnapshot> {
        self.snapshot.as_ref()
    }

    /// When the last fetch was attempted.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Forgets the fetch time so the next lookup refetches.
    pub fn invalidate(&mut self) {
        self.fetched_at = None;
    }
}
