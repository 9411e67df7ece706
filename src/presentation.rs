//! Display mapping for resolved statuses.
//!
//! A thin layer that flattens a [`Resolution`] into the strings a widget
//! shows: the day headline, the current activity, one detail line and a
//! background color.

use serde::Serialize;

use crate::engine::Resolution;
use crate::models::{format_minute, DayCategory, RotationCode, ScheduleStatus, PASSING_PERIOD};

/// White Day background.
pub const WHITE_DAY_COLOR: &str = "#f8fafc";
/// Blue Day background.
pub const BLUE_DAY_COLOR: &str = "#1d4ed8";
/// Passing period background.
pub const PASSING_COLOR: &str = "#f59e0b";
/// Lunch background.
pub const LUNCH_COLOR: &str = "#16a34a";
/// School closed background.
pub const CLOSED_COLOR: &str = "#dc2626";
/// Exam day background.
pub const EXAM_COLOR: &str = "#7c3aed";
/// Weekend and unavailable background.
pub const NEUTRAL_COLOR: &str = "#6b7280";
/// Instructional day without a rotation code.
pub const UNLABELED_DAY_COLOR: &str = "#0f766e";

/// Display-ready status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Day headline (`White Day`, `Weekend`, ...).
    pub headline: String,
    /// Current activity.
    pub label: String,
    /// "Next: ..." if something follows, otherwise the current time range.
    pub detail: Option<String>,
    /// Hex background color.
    pub color: &'static str,
}

/// Maps resolutions to presentations.
#[derive(Debug, Clone, Copy, Default)]
pub struct PresentationMapper;

impl PresentationMapper {
    /// Flattens a resolution for display.
    pub fn present(resolution: &Resolution) -> Presentation {
        let status = &resolution.status;
        Presentation {
            headline: status.headline.clone(),
            label: status.primary_label.clone(),
            detail: detail(status),
            color: color(resolution),
        }
    }
}

fn detail(status: &ScheduleStatus) -> Option<String> {
    match (&status.next_label, status.next_start_minute) {
        (Some(label), Some(start)) => Some(format!("Next: {label} at {}", format_minute(start))),
        _ => status.time_range.map(|w| w.to_string()),
    }
}

fn color(resolution: &Resolution) -> &'static str {
    let status = &resolution.status;
    match resolution.classification.category {
        DayCategory::Weekend | DayCategory::Unavailable => NEUTRAL_COLOR,
        DayCategory::Closed => CLOSED_COLOR,
        DayCategory::Exam(_) => EXAM_COLOR,
        DayCategory::Instructional if status.primary_label == PASSING_PERIOD => PASSING_COLOR,
        DayCategory::Instructional if is_lunch(status) => LUNCH_COLOR,
        DayCategory::Instructional => match resolution.classification.rotation {
            RotationCode::A => WHITE_DAY_COLOR,
            RotationCode::B => BLUE_DAY_COLOR,
            RotationCode::Unlabeled => UNLABELED_DAY_COLOR,
        },
    }
}

/// A lunch block, or a lunch group currently out of class.
fn is_lunch(status: &ScheduleStatus) -> bool {
    status.primary_label.contains("Lunch") || status.secondary_lines.iter().any(|l| l.is_current)
}
