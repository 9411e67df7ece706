//! Bell schedule domain models.
//!
//! Provides the data types shared by the catalog, the classifier and the
//! status resolver. All plain data; no I/O and no clock access.
//!
//! # Domain Mappings
//!
//! | bell-schedule | School term |
//! |---------------|-------------|
//! | Block | Class period |
//! | ScheduleVariant | Bell schedule (regular, early release, PSD) |
//! | LunchGroups | Staggered lunch A/B |
//! | CalendarEntry | One row of the district calendar |
//! | ScheduleStatus | "What is happening now" banner |

mod calendar;
mod day;
mod schedule;
mod status;

pub use calendar::{
    format_minute, hm, CalendarEntry, CalendarSnapshot, Minute, RawCalendarRow, RotationCode,
    TimeWindow, MINUTES_PER_DAY,
};
pub use day::{Classification, DayCategory, ExamDay, ExamKind};
pub use schedule::{Block, LunchGroups, LunchPhase, LunchSubWindow, ScheduleVariant, VariantName};
pub use status::{
    ScheduleStatus, SecondaryLine, NO_SCHOOL, PASSING_PERIOD, SCHOOL_ENDED, SCHOOL_STARTS,
    UNAVAILABLE,
};
