//! Built-in resolution rules.
//!
//! Each rule answers for one kind of moment in the school day. They are
//! meant to run in the order [`StatusResolver::standard`] lists them; on
//! their own some would shadow others (the lunch block is also a block,
//! the first lunch passing period is inside the lunch block).
//!
//! [`StatusResolver::standard`]: super::StatusResolver::standard

use super::{ResolutionRule, ResolveContext};
use crate::models::{
    format_minute, Block, LunchPhase, LunchSubWindow, Minute, ScheduleStatus, SecondaryLine,
    TimeWindow, PASSING_PERIOD, SCHOOL_ENDED, SCHOOL_STARTS,
};

/// Next-label when the following block is the shared lunch block.
pub const LUNCH_BLOCK_NEXT_LABEL: &str = "Period 3/7 & Lunch A";

/// Next-label while group A is out of class during the shared block.
pub const CLASS_CONTINUES_LABEL: &str = "Period 3/7 continues";

/// Next-label before group B's lunch.
pub const LUNCH_B_LABEL: &str = "Lunch B";

// ======================== Passing period ========================

/// Between two blocks.
///
/// The next activity is the first block starting after now, skipping the
/// shared lunch block.
#[derive(Debug, Clone, Copy)]
pub struct PassingPeriod;

impl ResolutionRule for PassingPeriod {
    fn name(&self) -> &'static str {
        "passing-period"
    }

    fn resolve(&self, ctx: &ResolveContext<'_>) -> Option<ScheduleStatus> {
        let window = ctx
            .variant
            .passing_periods
            .iter()
            .find(|pp| pp.contains(ctx.minute))?;
        let status = ScheduleStatus::new(PASSING_PERIOD).with_range(*window);
        Some(match ctx.variant.next_regular_block(ctx.minute) {
            Some(next) => status.with_next(next.label, next.window.start_minute),
            None => status,
        })
    }

    fn description(&self) -> &'static str {
        "Passing period between blocks"
    }
}

// ======================== Staggered lunch ========================

/// Inside the shared block while the two lunch groups alternate.
#[derive(Debug, Clone, Copy)]
pub struct StaggeredLunch;

impl ResolutionRule for StaggeredLunch {
    fn name(&self) -> &'static str {
        "staggered-lunch"
    }

    fn resolve(&self, ctx: &ResolveContext<'_>) -> Option<ScheduleStatus> {
        let (idx, block) = ctx.variant.lunch_block()?;
        if !block.window.contains(ctx.minute) {
            return None;
        }
        let groups = block.lunch_groups?;
        let phase = groups.phase_at(ctx.minute)?;
        let (a, b) = (&groups.lunch_a, &groups.lunch_b);
        let status = ScheduleStatus::new(block.label);

        let lunch_a_now = group_line("Lunch A", a, &a.window.to_string());
        let lunch_b_now = group_line("Lunch B", b, &b.window.to_string());
        let b_in_class = in_class_until("Lunch B", b, b.window.start_minute);

        let status = match phase {
            LunchPhase::LunchA => status
                .with_range(a.window)
                .with_line(SecondaryLine::current(lunch_a_now))
                .with_line(SecondaryLine::other(b_in_class))
                .with_next(CLASS_CONTINUES_LABEL, a.adjacent_class_window.start_minute),
            LunchPhase::ReturningFromLunchA => status
                .with_range(TimeWindow::new(
                    a.window.end_minute,
                    a.adjacent_class_window.start_minute,
                ))
                .with_line(SecondaryLine::current(group_line(
                    "Lunch A",
                    a,
                    &format!(
                        "back in class at {}",
                        format_minute(a.adjacent_class_window.start_minute)
                    ),
                )))
                .with_line(SecondaryLine::other(b_in_class))
                .with_next(CLASS_CONTINUES_LABEL, a.adjacent_class_window.start_minute),
            LunchPhase::BetweenLunches => status
                .with_range(TimeWindow::new(
                    a.adjacent_class_window.start_minute,
                    b.window.start_minute,
                ))
                .with_line(SecondaryLine::other(group_line("Lunch A", a, "done")))
                .with_line(SecondaryLine::other(lunch_b_now))
                .with_next(LUNCH_B_LABEL, b.window.start_minute),
            LunchPhase::LunchB => {
                let status = status
                    .with_range(b.window)
                    .with_line(SecondaryLine::other(in_class_until(
                        "Lunch A",
                        a,
                        a.adjacent_class_window.end_minute,
                    )))
                    .with_line(SecondaryLine::current(lunch_b_now));
                next_after(status, ctx, idx, block)
            }
        };
        Some(status)
    }

    fn description(&self) -> &'static str {
        "Staggered lunch inside the shared block"
    }
}

fn group_line(name: &str, group: &LunchSubWindow, detail: &str) -> String {
    format!("{name} (Bldgs {}): {detail}", group.buildings_label())
}

fn in_class_until(name: &str, group: &LunchSubWindow, until: Minute) -> String {
    group_line(name, group, &format!("in class until {}", format_minute(until)))
}

/// Adds the block after `idx` as next, or dismissal at the end of `block`.
fn next_after(
    status: ScheduleStatus,
    ctx: &ResolveContext<'_>,
    idx: usize,
    block: &Block,
) -> ScheduleStatus {
    match ctx.variant.block_after(idx) {
        Some(next) if next.is_shared_lunch() => {
            status.with_next(LUNCH_BLOCK_NEXT_LABEL, next.window.start_minute)
        }
        Some(next) => status.with_next(next.label, next.window.start_minute),
        None => status.with_next(ctx.variant.dismissal_label, block.window.end_minute),
    }
}

// ======================== Generic block scan ========================

/// Inside an ordinary block.
#[derive(Debug, Clone, Copy)]
pub struct ActiveBlock;

impl ResolutionRule for ActiveBlock {
    fn name(&self) -> &'static str {
        "active-block"
    }

    fn resolve(&self, ctx: &ResolveContext<'_>) -> Option<ScheduleStatus> {
        let (idx, block) = ctx
            .variant
            .blocks
            .iter()
            .enumerate()
            .find(|(_, b)| b.window.contains(ctx.minute))?;
        let status = ScheduleStatus::new(block.label).with_range(block.window);
        Some(next_after(status, ctx, idx, block))
    }

    fn description(&self) -> &'static str {
        "Block in session"
    }
}

// ======================== Outside the school day ========================

/// Before the first bell.
#[derive(Debug, Clone, Copy)]
pub struct BeforeFirstBlock;

impl ResolutionRule for BeforeFirstBlock {
    fn name(&self) -> &'static str {
        "before-first-block"
    }

    fn resolve(&self, ctx: &ResolveContext<'_>) -> Option<ScheduleStatus> {
        let first = ctx.variant.first_block()?;
        (ctx.minute < first.window.start_minute).then(|| {
            ScheduleStatus::new(SCHOOL_STARTS).with_next(first.label, first.window.start_minute)
        })
    }

    fn description(&self) -> &'static str {
        "Before school"
    }
}

/// After the last block.
#[derive(Debug, Clone, Copy)]
pub struct AfterLastBlock;

impl ResolutionRule for AfterLastBlock {
    fn name(&self) -> &'static str {
        "after-last-block"
    }

    fn resolve(&self, ctx: &ResolveContext<'_>) -> Option<ScheduleStatus> {
        let last = ctx.variant.last_block()?;
        (ctx.minute >= last.window.end_minute).then(|| ScheduleStatus::new(SCHOOL_ENDED))
    }

    fn description(&self) -> &'static str {
        "After school"
    }
}
