//! Day classification model.
//!
//! The day classifier reduces a free-text calendar row to a closed set of
//! categories once, so nothing downstream re-parses status strings.

use serde::{Deserialize, Serialize};

use super::calendar::RotationCode;
use super::schedule::VariantName;

/// Which exam label a day carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExamKind {
    /// `exam` / `exams`.
    Exam,
    /// `midterm`.
    Midterm,
    /// `final` / `finals`.
    Final,
}

impl ExamKind {
    /// Headline for the day.
    pub fn headline(&self) -> &'static str {
        match self {
            ExamKind::Exam => "Exam Day",
            ExamKind::Midterm => "Midterms",
            ExamKind::Final => "Finals",
        }
    }
}

/// An exam day: its kind and the class periods being examined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamDay {
    /// Exam label.
    pub kind: ExamKind,
    /// Periods 1-8, ascending and unique. May be empty.
    pub periods: Vec<u8>,
}

/// Coarse classification of a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "category")]
pub enum DayCategory {
    /// Saturday or Sunday.
    Weekend,
    /// School closed.
    Closed,
    /// Exam schedule; blocks are not resolved.
    Exam(ExamDay),
    /// Ordinary instructional day; the status resolver runs.
    Instructional,
    /// No calendar information for the date.
    Unavailable,
}

impl DayCategory {
    /// Whether the status resolver should run for this day.
    pub fn is_instructional(&self) -> bool {
        matches!(self, DayCategory::Instructional)
    }
}

/// The classifier's output: which schedule, which rotation, which category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Schedule shape (meaningful for instructional days).
    pub variant: VariantName,
    /// A/B rotation label.
    pub rotation: RotationCode,
    /// Day category.
    pub category: DayCategory,
}

impl Classification {
    /// A classification that short-circuits resolution.
    pub fn terminal(category: DayCategory) -> Self {
        Self {
            variant: VariantName::Regular,
            rotation: RotationCode::Unlabeled,
            category,
        }
    }

    /// An instructional day.
    pub fn instructional(variant: VariantName, rotation: RotationCode) -> Self {
        Self {
            variant,
            rotation,
            category: DayCategory::Instructional,
        }
    }
}
