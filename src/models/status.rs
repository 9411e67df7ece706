//! Engine output model.
//!
//! A [`ScheduleStatus`] describes what is happening at the school right
//! now. It is rebuilt on every resolution and never mutated afterwards.
//! Serialized as a flat camelCase JSON object.

use serde::{Deserialize, Serialize};

use super::calendar::{Minute, TimeWindow};
use super::day::ExamDay;

/// Primary label before the first block.
pub const SCHOOL_STARTS: &str = "School starts";
/// Primary label after the last block.
pub const SCHOOL_ENDED: &str = "School ended";
/// Primary label during a passing period.
pub const PASSING_PERIOD: &str = "Passing Period";
/// Headline and label when no schedule can be determined.
pub const UNAVAILABLE: &str = "Schedule unavailable";
/// Primary label on weekend and closed days.
pub const NO_SCHOOL: &str = "No school";

/// A detail line under the primary label (e.g. a lunch group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecondaryLine {
    /// Display text.
    pub text: String,
    /// Whether this line describes what is happening now.
    pub is_current: bool,
}

impl SecondaryLine {
    /// A line describing the current activity.
    pub fn current(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_current: true,
        }
    }

    /// A line describing something other than the current activity.
    pub fn other(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_current: false,
        }
    }
}

/// What is happening now, and what comes next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStatus {
    /// Day label (`White Day`, `Blue Day`, `Early Release`, `Weekend`, ...).
    pub headline: String,
    /// Current activity (`Period 2/6`, `Passing Period`, ...).
    pub primary_label: String,
    /// Window of the current activity, if bounded.
    pub time_range: Option<TimeWindow>,
    /// Detail lines.
    pub secondary_lines: Vec<SecondaryLine>,
    /// Next activity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_label: Option<String>,
    /// Minute the next activity starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_start_minute: Option<Minute>,
}

impl ScheduleStatus {
    /// Creates a status with a primary label only.
    pub fn new(primary_label: impl Into<String>) -> Self {
        Self {
            primary_label: primary_label.into(),
            ..Self::default()
        }
    }

    /// Sets the headline.
    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    /// Sets the current time range.
    pub fn with_range(mut self, window: TimeWindow) -> Self {
        self.time_range = Some(window);
        self
    }

    /// Appends a detail line.
    pub fn with_line(mut self, line: SecondaryLine) -> Self {
        self.secondary_lines.push(line);
        self
    }

    /// Sets the next activity and its start.
    pub fn with_next(mut self, label: impl Into<String>, start_minute: Minute) -> Self {
        self.next_label = Some(label.into());
        self.next_start_minute = Some(start_minute);
        self
    }

    /// Terminal status: no calendar information.
    pub fn unavailable() -> Self {
        Self::new(UNAVAILABLE).with_headline(UNAVAILABLE)
    }

    /// Terminal status: weekend.
    pub fn weekend() -> Self {
        Self::new(NO_SCHOOL).with_headline("Weekend")
    }

    /// Terminal status: school closed.
    pub fn closed() -> Self {
        Self::new(NO_SCHOOL).with_headline("School Closed")
    }

    /// Terminal status: exam day.
    pub fn exam(day: &ExamDay) -> Self {
        let label = if day.periods.is_empty() {
            "Exams".to_string()
        } else {
            let periods: Vec<String> = day.periods.iter().map(u8::to_string).collect();
            format!("Exams: periods {}", periods.join(", "))
        };
        Self::new(label).with_headline(day.kind.headline())
    }

    /// Whether this is the terminal unavailable status.
    pub fn is_unavailable(&self) -> bool {
        self.primary_label == UNAVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExamKind;

    #[test]
    fn test_status_builder() {
        let s = ScheduleStatus::new(PASSING_PERIOD)
            .with_headline("White Day")
            .with_range(TimeWindow::new(552, 559))
            .with_next("Period 2/6", 559);

        assert_eq!(s.primary_label, "Passing Period");
        assert_eq!(s.time_range, Some(TimeWindow::new(552, 559)));
        assert_eq!(s.next_label.as_deref(), Some("Period 2/6"));
        assert_eq!(s.next_start_minute, Some(559));
        assert!(s.secondary_lines.is_empty());
    }

    #[test]
    fn test_exam_labels() {
        let finals = ExamDay {
            kind: ExamKind::Final,
            periods: vec![1, 3, 5],
        };
        let s = ScheduleStatus::exam(&finals);
        assert_eq!(s.headline, "Finals");
        assert_eq!(s.primary_label, "Exams: periods 1, 3, 5");

        let bare = ExamDay {
            kind: ExamKind::Exam,
            periods: vec![],
        };
        assert_eq!(ScheduleStatus::exam(&bare).primary_label, "Exams");
    }

    #[test]
    fn test_status_json_shape() {
        let s = ScheduleStatus::new("Period 3/7")
            .with_headline("Blue Day")
            .with_range(TimeWindow::new(651, 682))
            .with_line(SecondaryLine::current("Lunch A"))
            .with_next("Period 3/7 continues", 689);
        let json = serde_json::to_value(&s).unwrap();

        assert_eq!(json["headline"], "Blue Day");
        assert_eq!(json["primaryLabel"], "Period 3/7");
        assert_eq!(json["timeRange"]["startMinute"], 651);
        assert_eq!(json["timeRange"]["endMinute"], 682);
        assert_eq!(json["secondaryLines"][0]["isCurrent"], true);
        assert_eq!(json["nextStartMinute"], 689);

        let ended = serde_json::to_value(ScheduleStatus::new(SCHOOL_ENDED)).unwrap();
        assert!(ended.get("nextLabel").is_none());
        assert!(ended["timeRange"].is_null());
    }
}
