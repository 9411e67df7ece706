//! Status resolution for instructional days.
//!
//! Given a schedule variant, a rotation code and a minute of the day, the
//! [`StatusResolver`] answers "what is happening right now, and what is
//! next". It is a pure function of its inputs: no clock, no I/O, no state.
//!
//! # Rule order
//!
//! Rules are evaluated in a fixed order and the first one that applies
//! wins. Passing periods and lunch phases are nested inside or adjacent to
//! ordinary blocks, so they must be checked before the generic block scan:
//!
//! 1. [`rules::PassingPeriod`]
//! 2. [`rules::StaggeredLunch`]
//! 3. [`rules::ActiveBlock`]
//! 4. [`rules::BeforeFirstBlock`]
//! 5. [`rules::AfterLastBlock`]
//!
//! If no rule applies the status is "unavailable"; with a sound catalog
//! that cannot happen.
//!
//! # Usage
//!
//! ```
//! use bell_schedule::catalog::ScheduleCatalog;
//! use bell_schedule::models::{RotationCode, VariantName};
//! use bell_schedule::resolver::StatusResolver;
//!
//! let regular = ScheduleCatalog::variant(VariantName::Regular);
//! let status = StatusResolver::standard().resolve(regular, RotationCode::A, 555);
//! assert_eq!(status.headline, "White Day");
//! assert_eq!(status.primary_label, "Passing Period");
//! ```

pub mod rules;

use std::fmt::Debug;
use std::sync::Arc;

use crate::models::{
    Minute, RotationCode, ScheduleStatus, ScheduleVariant, VariantName, MINUTES_PER_DAY,
};

/// Inputs visible to a resolution rule.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// Schedule being resolved.
    pub variant: &'a ScheduleVariant,
    /// Minute of the day, `0..1440`.
    pub minute: Minute,
}

/// One step of the ordered status resolution.
///
/// Returns `Some(status)` if the rule applies at `ctx.minute`. The
/// resolver fills in the headline.
pub trait ResolutionRule: Send + Sync + Debug {
    /// Rule name (e.g., "passing-period").
    fn name(&self) -> &'static str;

    /// Produces a status if this rule applies.
    fn resolve(&self, ctx: &ResolveContext<'_>) -> Option<ScheduleStatus>;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Day headline: the rotation color, or the variant name if unlabeled.
pub fn headline(variant: VariantName, rotation: RotationCode) -> &'static str {
    match rotation {
        RotationCode::A => "White Day",
        RotationCode::B => "Blue Day",
        RotationCode::Unlabeled => variant.headline(),
    }
}

/// An ordered list of resolution rules; first match wins.
#[derive(Clone)]
pub struct StatusResolver {
    rules: Vec<Arc<dyn ResolutionRule>>,
}

impl StatusResolver {
    /// Creates a resolver with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The published rule order.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::PassingPeriod)
            .with_rule(rules::StaggeredLunch)
            .with_rule(rules::ActiveBlock)
            .with_rule(rules::BeforeFirstBlock)
            .with_rule(rules::AfterLastBlock)
    }

    /// Appends a rule (evaluated after all existing rules).
    pub fn with_rule<R: ResolutionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Rule names, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Resolves the status at `minute`.
    ///
    /// Minutes past the end of the day are clamped to the last minute.
    pub fn resolve(
        &self,
        variant: &ScheduleVariant,
        rotation: RotationCode,
        minute: Minute,
    ) -> ScheduleStatus {
        match self.first_match(variant, minute) {
            Some((_, status)) => status.with_headline(headline(variant.name, rotation)),
            None => ScheduleStatus::unavailable(),
        }
    }

    /// Name of the rule that decides `minute`, if any.
    pub fn deciding_rule(&self, variant: &ScheduleVariant, minute: Minute) -> Option<&'static str> {
        self.first_match(variant, minute).map(|(name, _)| name)
    }

    fn first_match(
        &self,
        variant: &ScheduleVariant,
        minute: Minute,
    ) -> Option<(&'static str, ScheduleStatus)> {
        let ctx = ResolveContext {
            variant,
            minute: minute.min(MINUTES_PER_DAY - 1),
        };
        self.rules
            .iter()
            .find_map(|rule| rule.resolve(&ctx).map(|status| (rule.name(), status)))
    }
}

impl Default for StatusResolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for StatusResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusResolver")
            .field("rules", &self.rule_names())
            .finish()
    }
}
