//! School bell schedule engine.
//!
//! Answers "what is happening at school right now": given a wall clock and
//! the district calendar feed, it picks the day's bell schedule and
//! resolves the current period, passing period or lunch group, plus what
//! comes next.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `TimeWindow`, `Block`, `ScheduleVariant`,
//!   `CalendarEntry`, `Classification`, `ScheduleStatus`
//! - **`catalog`**: The published bell schedules (regular, early release,
//!   professional study)
//! - **`validation`**: Catalog integrity checks (ordering, gaps, lunch partition)
//! - **`clock`**: Injectable clock and the 14:45 rollover rule
//! - **`classifier`**: Calendar row → day category, variant and rotation
//! - **`resolver`**: Ordered rule list mapping a minute to a `ScheduleStatus`
//! - **`feed`**: Calendar feed collaborators and the snapshot cache
//! - **`engine`**: The full pipeline, `BellEngine`
//! - **`presentation`**: Headline, label and color for display
//! - **`config`**: `EngineConfig` loaded from JSON
//!
//! # Example
//!
//! ```
//! use bell_schedule::clock::FixedClock;
//! use bell_schedule::engine::BellEngine;
//! use bell_schedule::feed::StaticFeed;
//! use bell_schedule::models::RawCalendarRow;
//! use chrono::{TimeZone, Utc};
//!
//! let feed = StaticFeed::new(vec![RawCalendarRow::new("2026-10-19", "A", "", "")]);
//! // 13:15 UTC is 09:15 in New York.
//! let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 10, 19, 13, 15, 0).unwrap());
//! let mut engine = BellEngine::with_defaults(feed, clock);
//!
//! let resolution = engine.resolve_now();
//! assert_eq!(resolution.status.headline, "White Day");
//! assert_eq!(resolution.status.primary_label, "Passing Period");
//! ```

pub mod catalog;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod feed;
pub mod models;
pub mod presentation;
pub mod resolver;
pub mod validation;
