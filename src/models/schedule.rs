//! Bell schedule (variant) model.
//!
//! A schedule variant is the ordered list of instructional blocks for one
//! kind of school day, plus the passing periods between them. The regular
//! variant additionally nests two staggered lunch groups inside its shared
//! Period 3/7 block.
//!
//! # Lunch partition
//!
//! Inside the shared block the two groups alternate:
//!
//! ```text
//!  B in class  ───────────────────────────┐ B lunch ─┐
//!  A lunch ──┐ A returning ┐ A in class ──────────────┘
//! ```
//!
//! Group A eats first while group B is in class; group B eats last while
//! group A is in class. Every minute of the shared block belongs to exactly
//! one [`LunchPhase`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::calendar::{Minute, TimeWindow};

/// Name of a schedule variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VariantName {
    /// Full instructional day with staggered lunch.
    #[default]
    Regular,
    /// Shortened day, buses depart 12:50.
    EarlyRelease,
    /// Shortened day for staff professional study, buses depart 11:50.
    ProfessionalStudy,
}

impl VariantName {
    /// All variants, in catalog order.
    pub const ALL: [VariantName; 3] = [
        VariantName::Regular,
        VariantName::EarlyRelease,
        VariantName::ProfessionalStudy,
    ];

    /// Catalog key (`regular`, `earlyRelease`, `professionalStudy`).
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantName::Regular => "regular",
            VariantName::EarlyRelease => "earlyRelease",
            VariantName::ProfessionalStudy => "professionalStudy",
        }
    }

    /// Headline used when the day carries no A/B rotation code.
    pub fn headline(&self) -> &'static str {
        match self {
            VariantName::Regular => "Regular Day",
            VariantName::EarlyRelease => "Early Release",
            VariantName::ProfessionalStudy => "Professional Study Day",
        }
    }
}

impl fmt::Display for VariantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariantName::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| format!("unknown schedule variant `{s}`"))
    }
}

/// One lunch group's split of the shared block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchSubWindow {
    /// When the group is at lunch.
    pub window: TimeWindow,
    /// Buildings whose classes take this lunch.
    pub buildings: &'static [&'static str],
    /// The group's in-class portion of the shared block.
    pub adjacent_class_window: TimeWindow,
}

impl LunchSubWindow {
    /// Buildings joined for display (`21, 20, 5, 9`).
    pub fn buildings_label(&self) -> String {
        self.buildings.join(", ")
    }
}

/// The two staggered lunch groups of the shared block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchGroups {
    /// Eats first, then returns to class.
    pub lunch_a: LunchSubWindow,
    /// In class first, then eats.
    pub lunch_b: LunchSubWindow,
}

/// Which part of the staggered lunch is in effect at a given minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LunchPhase {
    /// Group A at lunch, group B in class.
    LunchA,
    /// Group B at lunch, group A in class.
    LunchB,
    /// Both groups in class; A has eaten, B has not.
    BetweenLunches,
    /// Group A finished lunch and is moving back to class; B in class.
    ReturningFromLunchA,
}

impl LunchPhase {
    /// Evaluation order. Phases are disjoint, so order only matters
    /// if the catalog is broken.
    pub const ORDER: [LunchPhase; 4] = [
        LunchPhase::LunchA,
        LunchPhase::LunchB,
        LunchPhase::BetweenLunches,
        LunchPhase::ReturningFromLunchA,
    ];
}

impl LunchGroups {
    /// Whether `phase` is in effect at `minute`.
    pub fn matches(&self, phase: LunchPhase, minute: Minute) -> bool {
        let (a, b) = (&self.lunch_a, &self.lunch_b);
        match phase {
            LunchPhase::LunchA => a.window.contains(minute),
            LunchPhase::LunchB => b.window.contains(minute),
            LunchPhase::BetweenLunches => {
                a.adjacent_class_window.contains(minute) && minute < b.window.start_minute
            }
            LunchPhase::ReturningFromLunchA => {
                b.adjacent_class_window.contains(minute)
                    && minute >= a.window.end_minute
                    && minute < a.adjacent_class_window.start_minute
            }
        }
    }

    /// Every phase matching `minute`. A sound catalog yields at most one.
    pub fn phases_at(&self, minute: Minute) -> Vec<LunchPhase> {
        LunchPhase::ORDER
            .into_iter()
            .filter(|&p| self.matches(p, minute))
            .collect()
    }

    /// The first phase matching `minute`, in [`LunchPhase::ORDER`].
    pub fn phase_at(&self, minute: Minute) -> Option<LunchPhase> {
        LunchPhase::ORDER
            .into_iter()
            .find(|&p| self.matches(p, minute))
    }
}

/// A named instructional period with a fixed time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Stable key (`p15`, `p37_lunch`, ...).
    pub key: &'static str,
    /// Display label (`Period 1/5`).
    pub label: &'static str,
    /// When the block runs.
    pub window: TimeWindow,
    /// Staggered lunch groups; set on the shared lunch block only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lunch_groups: Option<LunchGroups>,
}

impl Block {
    /// Creates a plain block.
    pub const fn new(key: &'static str, label: &'static str, window: TimeWindow) -> Self {
        Self {
            key,
            label,
            window,
            lunch_groups: None,
        }
    }

    /// Creates the shared block carrying lunch groups.
    pub const fn with_lunch(
        key: &'static str,
        label: &'static str,
        window: TimeWindow,
        lunch_groups: LunchGroups,
    ) -> Self {
        Self {
            key,
            label,
            window,
            lunch_groups: Some(lunch_groups),
        }
    }

    /// Whether this is the shared lunch block.
    #[inline]
    pub fn is_shared_lunch(&self) -> bool {
        self.lunch_groups.is_some()
    }
}

/// One day shape: ordered blocks and the passing periods between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleVariant {
    /// Variant name.
    pub name: VariantName,
    /// Blocks, ascending by start.
    pub blocks: &'static [Block],
    /// Passing periods, ascending by start.
    pub passing_periods: &'static [TimeWindow],
    /// Label shown as "next" during the last block (`Dismissal`, `Buses depart`).
    pub dismissal_label: &'static str,
}

impl ScheduleVariant {
    /// First block of the day.
    pub fn first_block(&self) -> Option<&Block> {
        self.blocks.first()
    }

    /// Last block of the day.
    pub fn last_block(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// From the first block's start to the last block's end.
    pub fn span(&self) -> Option<TimeWindow> {
        Some(TimeWindow::new(
            self.first_block()?.window.start_minute,
            self.last_block()?.window.end_minute,
        ))
    }

    /// Index and block of the shared lunch block, if the variant has one.
    pub fn lunch_block(&self) -> Option<(usize, &Block)> {
        self.blocks.iter().enumerate().find(|(_, b)| b.is_shared_lunch())
    }

    /// The block following index `idx`.
    pub fn block_after(&self, idx: usize) -> Option<&Block> {
        self.blocks.get(idx + 1)
    }

    /// First block starting strictly after `minute`, skipping the shared lunch block.
    pub fn next_regular_block(&self, minute: Minute) -> Option<&Block> {
        self.blocks
            .iter()
            .filter(|b| !b.is_shared_lunch())
            .find(|b| b.window.start_minute > minute)
    }
}
