//! Published bell schedules.
//!
//! The three schedule variants are fixed, externally published times and
//! live for the whole process as `static` data. Each variant lists its
//! blocks and passing periods in ascending order; the regular variant's
//! shared Period 3/7 block carries the staggered lunch groups.
//!
//! | Variant | First bell | Dismissal |
//! |---------|-----------|-----------|
//! | regular | 7:40 AM | 2:40 PM |
//! | earlyRelease | 7:40 AM | 12:50 PM (buses) |
//! | professionalStudy | 7:40 AM | 11:50 AM (buses) |

use crate::models::{Block, LunchGroups, LunchSubWindow, ScheduleVariant, TimeWindow, VariantName};

/// Key of the regular variant's shared lunch block.
pub const SHARED_LUNCH_KEY: &str = "p37_lunch";

const REGULAR_LUNCH: LunchGroups = LunchGroups {
    lunch_a: LunchSubWindow {
        window: TimeWindow::clock((10, 51), (11, 22)),
        buildings: &["21", "20", "5", "9"],
        adjacent_class_window: TimeWindow::clock((11, 29), (13, 1)),
    },
    lunch_b: LunchSubWindow {
        window: TimeWindow::clock((12, 30), (13, 1)),
        buildings: &["17", "8", "PE"],
        adjacent_class_window: TimeWindow::clock((10, 58), (12, 30)),
    },
};

static REGULAR_BLOCKS: [Block; 4] = [
    Block::new("p15", "Period 1/5", TimeWindow::clock((7, 40), (9, 12))),
    Block::new("p26", "Period 2/6", TimeWindow::clock((9, 19), (10, 51))),
    Block::with_lunch(
        SHARED_LUNCH_KEY,
        "Period 3/7",
        TimeWindow::clock((10, 51), (13, 1)),
        REGULAR_LUNCH,
    ),
    Block::new("p48", "Period 4/8", TimeWindow::clock((13, 8), (14, 40))),
];

static REGULAR_PASSING: [TimeWindow; 3] = [
    TimeWindow::clock((9, 12), (9, 19)),
    TimeWindow::clock((10, 51), (10, 58)),
    TimeWindow::clock((13, 1), (13, 8)),
];

static EARLY_RELEASE_BLOCKS: [Block; 5] = [
    Block::new("p15", "Period 1/5", TimeWindow::clock((7, 40), (8, 50))),
    Block::new("p26", "Period 2/6", TimeWindow::clock((8, 56), (10, 8))),
    Block::new("p37", "Period 3/7", TimeWindow::clock((10, 14), (11, 24))),
    Block::new("p48", "Period 4/8", TimeWindow::clock((11, 30), (12, 40))),
    Block::new("grab_and_go", "Grab & Go Lunch", TimeWindow::clock((12, 40), (12, 50))),
];

static EARLY_RELEASE_PASSING: [TimeWindow; 3] = [
    TimeWindow::clock((8, 50), (8, 56)),
    TimeWindow::clock((10, 8), (10, 14)),
    TimeWindow::clock((11, 24), (11, 30)),
];

static PROFESSIONAL_STUDY_BLOCKS: [Block; 5] = [
    Block::new("p15", "Period 1/5", TimeWindow::clock((7, 40), (8, 35))),
    Block::new("p26", "Period 2/6", TimeWindow::clock((8, 41), (9, 38))),
    Block::new("p37", "Period 3/7", TimeWindow::clock((9, 44), (10, 39))),
    Block::new("p48", "Period 4/8", TimeWindow::clock((10, 45), (11, 40))),
    Block::new("grab_and_go", "Grab & Go Lunch", TimeWindow::clock((11, 40), (11, 50))),
];

static PROFESSIONAL_STUDY_PASSING: [TimeWindow; 3] = [
    TimeWindow::clock((8, 35), (8, 41)),
    TimeWindow::clock((9, 38), (9, 44)),
    TimeWindow::clock((10, 39), (10, 45)),
];

static REGULAR: ScheduleVariant = ScheduleVariant {
    name: VariantName::Regular,
    blocks: &REGULAR_BLOCKS,
    passing_periods: &REGULAR_PASSING,
    dismissal_label: "Dismissal",
};

static EARLY_RELEASE: ScheduleVariant = ScheduleVariant {
    name: VariantName::EarlyRelease,
    blocks: &EARLY_RELEASE_BLOCKS,
    passing_periods: &EARLY_RELEASE_PASSING,
    dismissal_label: "Buses depart",
};

static PROFESSIONAL_STUDY: ScheduleVariant = ScheduleVariant {
    name: VariantName::ProfessionalStudy,
    blocks: &PROFESSIONAL_STUDY_BLOCKS,
    passing_periods: &PROFESSIONAL_STUDY_PASSING,
    dismissal_label: "Buses depart",
};

/// Read-only access to the published schedule variants.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleCatalog;

impl ScheduleCatalog {
    /// The variant for a name.
    pub fn variant(name: VariantName) -> &'static ScheduleVariant {
        match name {
            VariantName::Regular => &REGULAR,
            VariantName::EarlyRelease => &EARLY_RELEASE,
            VariantName::ProfessionalStudy => &PROFESSIONAL_STUDY,
        }
    }

    /// The variant for a catalog key (`regular`, `earlyRelease`, `professionalStudy`).
    pub fn get(name: &str) -> Option<&'static ScheduleVariant> {
        name.parse().ok().map(Self::variant)
    }

    /// All variants, in catalog order.
    pub fn all() -> impl Iterator<Item = &'static ScheduleVariant> {
        VariantName::ALL.into_iter().map(Self::variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hm;

    #[test]
    fn test_lookup_by_key() {
        assert_eq!(ScheduleCatalog::get("regular").unwrap().name, VariantName::Regular);
        assert_eq!(
            ScheduleCatalog::get("earlyRelease").unwrap().name,
            VariantName::EarlyRelease
        );
        assert_eq!(
            ScheduleCatalog::get("professionalStudy").unwrap().name,
            VariantName::ProfessionalStudy
        );
        assert!(ScheduleCatalog::get("exam").is_none());
        assert_eq!(ScheduleCatalog::all().count(), 3);
    }

    #[test]
    fn test_regular_published_times() {
        let v = ScheduleCatalog::variant(VariantName::Regular);
        let windows: Vec<_> = v.blocks.iter().map(|b| b.window).collect();
        assert_eq!(
            windows,
            vec![
                TimeWindow::new(460, 552),
                TimeWindow::new(559, 651),
                TimeWindow::new(651, 781),
                TimeWindow::new(788, 880),
            ]
        );
        assert_eq!(
            v.passing_periods,
            &[
                TimeWindow::new(552, 559),
                TimeWindow::new(651, 658),
                TimeWindow::new(781, 788),
            ]
        );
    }

    #[test]
    fn test_regular_lunch_groups() {
        let (idx, block) = ScheduleCatalog::variant(VariantName::Regular)
            .lunch_block()
            .unwrap();
        assert_eq!(idx, 2);
        assert_eq!(block.key, SHARED_LUNCH_KEY);

        let lunch = block.lunch_groups.unwrap();
        assert_eq!(lunch.lunch_a.window, TimeWindow::new(hm(10, 51), hm(11, 22)));
        assert_eq!(lunch.lunch_a.adjacent_class_window.start_minute, 689);
        assert_eq!(lunch.lunch_b.window, TimeWindow::new(750, 781));
        assert_eq!(lunch.lunch_b.adjacent_class_window, TimeWindow::new(658, 750));
        assert_eq!(lunch.lunch_a.buildings, &["21", "20", "5", "9"]);
        assert_eq!(lunch.lunch_b.buildings, &["17", "8", "PE"]);
    }

    #[test]
    fn test_short_days_end_with_buses() {
        let er = ScheduleCatalog::variant(VariantName::EarlyRelease);
        assert_eq!(er.span(), Some(TimeWindow::clock((7, 40), (12, 50))));
        assert!(er.lunch_block().is_none());

        let psd = ScheduleCatalog::variant(VariantName::ProfessionalStudy);
        assert_eq!(psd.span(), Some(TimeWindow::clock((7, 40), (11, 50))));
        assert_eq!(psd.dismissal_label, "Buses depart");
    }
}
