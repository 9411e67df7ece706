//! Calendar day classification.
//!
//! Maps one calendar row to a `(variant, rotation, category)` triple.
//!
//! # Precedence
//! 1. Saturday and Sunday are weekends, whatever the feed says.
//! 2. A date with no feed row is unavailable.
//! 3. The row's day status is normalized (trimmed, lowercased) and looked
//!    up in a fixed table; unknown statuses mean a regular day.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    CalendarEntry, CalendarSnapshot, Classification, DayCategory, ExamDay, ExamKind, VariantName,
};

/// A `P3` token or a bare `3`.
static PERIOD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bp?(\d{1,2})\b").expect("valid period regex"));

const FIRST_PERIOD: u8 = 1;
const LAST_PERIOD: u8 = 8;

/// What a normalized day-status token means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusToken {
    Variant(VariantName),
    Closed,
    Exam(ExamKind),
}

fn lookup_status(status: &str) -> StatusToken {
    match status.trim().to_lowercase().as_str() {
        "erd" | "early release" => StatusToken::Variant(VariantName::EarlyRelease),
        "planning" | "psd" | "professional study" => {
            StatusToken::Variant(VariantName::ProfessionalStudy)
        }
        "closes" | "closed" => StatusToken::Closed,
        "exam" | "exams" => StatusToken::Exam(ExamKind::Exam),
        "midterm" => StatusToken::Exam(ExamKind::Midterm),
        "final" | "finals" => StatusToken::Exam(ExamKind::Final),
        _ => StatusToken::Variant(VariantName::Regular),
    }
}

/// Extracts exam periods (1-8) from free-text notes, ascending and unique.
///
/// Accepts `P<n>` tokens and bare integers; anything outside 1-8 is ignored.
pub fn parse_exam_periods(notes: &str) -> Vec<u8> {
    PERIOD_TOKEN
        .captures_iter(notes)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u8>().ok())
        .filter(|p| (FIRST_PERIOD..=LAST_PERIOD).contains(p))
        .collect::<BTreeSet<u8>>()
        .into_iter()
        .collect()
}

/// Whether a date falls on Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Classifies calendar days.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayClassifier;

impl DayClassifier {
    /// Classifies `lookup_date` given its feed row, if any.
    pub fn classify(entry: Option<&CalendarEntry>, lookup_date: NaiveDate) -> Classification {
        if is_weekend(lookup_date) {
            return Classification::terminal(DayCategory::Weekend);
        }
        let Some(entry) = entry else {
            debug!("no calendar entry for {lookup_date}");
            return Classification::terminal(DayCategory::Unavailable);
        };

        match lookup_status(&entry.day_status) {
            StatusToken::Closed => Classification::terminal(DayCategory::Closed),
            StatusToken::Exam(kind) => Classification::terminal(DayCategory::Exam(ExamDay {
                kind,
                periods: parse_exam_periods(&entry.notes),
            })),
            StatusToken::Variant(variant) => {
                Classification::instructional(variant, entry.rotation_code)
            }
        }
    }

    /// Classifies `lookup_date` against a snapshot.
    pub fn classify_date(snapshot: &CalendarSnapshot, lookup_date: NaiveDate) -> Classification {
        Self::classify(snapshot.entry(lookup_date), lookup_date)
    }

    /// The first instructional day strictly after `after`.
    pub fn next_school_day(
        snapshot: &CalendarSnapshot,
        after: NaiveDate,
    ) -> Option<(NaiveDate, Classification)> {
        snapshot.entries_after(after).find_map(|entry| {
            let c = Self::classify(Some(entry), entry.date);
            c.category.is_instructional().then_some((entry.date, c))
        })
    }
}
