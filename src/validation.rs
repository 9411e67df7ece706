//! Structural checks for bell schedules.
//!
//! A schedule variant is sound when:
//! - Every window is non-empty and fits in one day
//! - Blocks are ascending and do not overlap
//! - Every gap between consecutive blocks is exactly one passing period
//! - Passing periods sit in a gap or at the edge of the shared lunch block
//! - At most one block carries lunch groups, and its lunch phases
//!   partition the block: every minute belongs to exactly one phase
//!
//! A broken catalog is a programming error. These checks run in tests and
//! from tooling; the resolver does not call them.

use crate::catalog::ScheduleCatalog;
use crate::models::{Block, LunchGroups, ScheduleVariant, TimeWindow};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The variant has no blocks.
    EmptyVariant,
    /// A window is empty, inverted, or runs past midnight.
    MalformedWindow,
    /// Blocks are not in ascending start order.
    UnsortedBlocks,
    /// Two blocks overlap.
    OverlappingBlocks,
    /// A gap between blocks is not exactly one passing period.
    UncoveredGap,
    /// A passing period is outside every gap and every lunch block.
    StrayPassingPeriod,
    /// More than one block carries lunch groups.
    MultipleLunchBlocks,
    /// Lunch phases leave a minute uncovered or cover it twice.
    LunchPartition,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates one schedule variant.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_variant(variant: &ScheduleVariant) -> ValidationResult {
    let mut errors = Vec::new();
    let name = variant.name;

    if variant.blocks.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyVariant,
            format!("Variant '{name}' has no blocks"),
        ));
        return Err(errors);
    }

    // Window shape
    for block in variant.blocks {
        check_window(&mut errors, &block.window, || format!("block '{}'", block.key));
    }
    for (i, pp) in variant.passing_periods.iter().enumerate() {
        check_window(&mut errors, pp, || format!("passing period #{i}"));
    }

    // Ordering and overlap
    for pair in variant.blocks.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        if next.window.start_minute < prev.window.start_minute {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnsortedBlocks,
                format!("Block '{}' starts before '{}'", next.key, prev.key),
            ));
        } else if prev.window.overlaps(&next.window) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverlappingBlocks,
                format!("Blocks '{}' and '{}' overlap", prev.key, next.key),
            ));
        }
    }

    check_gaps(&mut errors, variant);

    // Lunch block
    let lunch_blocks: Vec<&Block> = variant.blocks.iter().filter(|b| b.is_shared_lunch()).collect();
    if lunch_blocks.len() > 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::MultipleLunchBlocks,
            format!(
                "Variant '{name}' has {} blocks with lunch groups",
                lunch_blocks.len()
            ),
        ));
    }
    for block in lunch_blocks {
        if let Some(groups) = &block.lunch_groups {
            check_lunch_partition(&mut errors, block, groups);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates every variant in the published catalog.
pub fn validate_catalog() -> ValidationResult {
    let errors: Vec<ValidationError> = ScheduleCatalog::all()
        .filter_map(|v| validate_variant(v).err())
        .flatten()
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_window(
    errors: &mut Vec<ValidationError>,
    window: &TimeWindow,
    what: impl FnOnce() -> String,
) {
    if !window.is_well_formed() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedWindow,
            format!(
                "Window of {} is malformed: [{}, {})",
                what(),
                window.start_minute,
                window.end_minute
            ),
        ));
    }
}

/// Each gap between consecutive blocks must be exactly one passing period,
/// and each passing period must be a gap or sit inside the lunch block.
fn check_gaps(errors: &mut Vec<ValidationError>, variant: &ScheduleVariant) {
    let gaps: Vec<TimeWindow> = variant
        .blocks
        .windows(2)
        .filter(|pair| pair[0].window.end_minute < pair[1].window.start_minute)
        .map(|pair| TimeWindow::new(pair[0].window.end_minute, pair[1].window.start_minute))
        .collect();

    for gap in &gaps {
        if !variant.passing_periods.contains(gap) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UncoveredGap,
                format!(
                    "Gap [{}, {}) in '{}' is not a passing period",
                    gap.start_minute, gap.end_minute, variant.name
                ),
            ));
        }
    }

    for pp in variant.passing_periods {
        let in_gap = gaps.contains(pp);
        let in_lunch_block = variant
            .blocks
            .iter()
            .any(|b| b.is_shared_lunch() && b.window.encloses(pp));
        if !in_gap && !in_lunch_block {
            errors.push(ValidationError::new(
                ValidationErrorKind::StrayPassingPeriod,
                format!(
                    "Passing period [{}, {}) in '{}' is neither a gap nor inside the lunch block",
                    pp.start_minute, pp.end_minute, variant.name
                ),
            ));
        }
    }
}

/// Sweeps every minute of the lunch block and counts matching phases.
fn check_lunch_partition(errors: &mut Vec<ValidationError>, block: &Block, groups: &LunchGroups) {
    let subs = [
        ("lunch A", groups.lunch_a.window),
        ("lunch A class", groups.lunch_a.adjacent_class_window),
        ("lunch B", groups.lunch_b.window),
        ("lunch B class", groups.lunch_b.adjacent_class_window),
    ];
    for (label, window) in subs {
        check_window(errors, &window, || format!("{label} in '{}'", block.key));
        if !block.window.encloses(&window) {
            errors.push(ValidationError::new(
                ValidationErrorKind::LunchPartition,
                format!("{label} window extends outside block '{}'", block.key),
            ));
        }
    }

    for minute in block.window.start_minute..block.window.end_minute {
        let phases = groups.phases_at(minute);
        if phases.len() != 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::LunchPartition,
                format!(
                    "Minute {minute} of block '{}' matches {} lunch phases {:?}",
                    block.key,
                    phases.len(),
                    phases
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LunchSubWindow, VariantName};

    fn variant(blocks: Vec<Block>, passing: Vec<TimeWindow>) -> ScheduleVariant {
        ScheduleVariant {
            name: VariantName::Regular,
            blocks: blocks.leak(),
            passing_periods: passing.leak(),
            dismissal_label: "Dismissal",
        }
    }

    fn groups(a_lunch_end: u16) -> LunchGroups {
        LunchGroups {
            lunch_a: LunchSubWindow {
                window: TimeWindow::new(100, a_lunch_end),
                buildings: &["1"],
                adjacent_class_window: TimeWindow::new(140, 200),
            },
            lunch_b: LunchSubWindow {
                window: TimeWindow::new(170, 200),
                buildings: &["2"],
                adjacent_class_window: TimeWindow::new(107, 170),
            },
        }
    }

    #[test]
    fn test_published_catalog_is_valid() {
        assert_eq!(validate_catalog(), Ok(()));
    }

    #[test]
    fn test_each_variant_valid() {
        for v in ScheduleCatalog::all() {
            assert!(validate_variant(v).is_ok(), "variant {}", v.name);
        }
    }

    #[test]
    fn test_empty_variant() {
        let errors = validate_variant(&variant(vec![], vec![])).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyVariant);
    }

    #[test]
    fn test_inverted_window() {
        let v = variant(vec![Block::new("x", "X", TimeWindow::new(50, 40))], vec![]);
        let errors = validate_variant(&v).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MalformedWindow));
    }

    #[test]
    fn test_overlapping_blocks() {
        let v = variant(
            vec![
                Block::new("one", "One", TimeWindow::new(10, 30)),
                Block::new("two", "Two", TimeWindow::new(25, 40)),
            ],
            vec![],
        );
        let errors = validate_variant(&v).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::OverlappingBlocks));
    }

    #[test]
    fn test_unsorted_blocks() {
        let v = variant(
            vec![
                Block::new("two", "Two", TimeWindow::new(40, 50)),
                Block::new("one", "One", TimeWindow::new(10, 30)),
            ],
            vec![],
        );
        let errors = validate_variant(&v).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UnsortedBlocks));
    }

    #[test]
    fn test_uncovered_gap_and_stray_period() {
        let v = variant(
            vec![
                Block::new("one", "One", TimeWindow::new(10, 30)),
                Block::new("two", "Two", TimeWindow::new(35, 50)),
            ],
            vec![TimeWindow::new(30, 34)],
        );
        let errors = validate_variant(&v).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::UncoveredGap));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::StrayPassingPeriod));
    }

    #[test]
    fn test_lunch_partition_sound() {
        let v = variant(
            vec![Block::with_lunch("l", "L", TimeWindow::new(100, 200), groups(130))],
            vec![TimeWindow::new(100, 107)],
        );
        assert!(validate_variant(&v).is_ok());
    }

    #[test]
    fn test_lunch_partition_overlap() {
        // Lunch A runs into lunch A's class window: minutes 140..150 match twice.
        let v = variant(
            vec![Block::with_lunch("l", "L", TimeWindow::new(100, 200), groups(150))],
            vec![],
        );
        let errors = validate_variant(&v).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::LunchPartition && e.message.contains("140")));
    }

    #[test]
    fn test_lunch_partition_outside_block() {
        let v = variant(
            vec![Block::with_lunch("l", "L", TimeWindow::new(100, 190), groups(130))],
            vec![],
        );
        let errors = validate_variant(&v).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::LunchPartition && e.message.contains("outside")));
    }

    #[test]
    fn test_multiple_lunch_blocks() {
        let v = variant(
            vec![
                Block::with_lunch("l1", "L1", TimeWindow::new(100, 200), groups(130)),
                Block::with_lunch("l2", "L2", TimeWindow::new(100, 200), groups(130)),
            ],
            vec![],
        );
        let errors = validate_variant(&v).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MultipleLunchBlocks));
    }
}
