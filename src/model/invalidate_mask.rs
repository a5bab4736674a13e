use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::LogicalRange;

/// Repaint severity. A higher level always implies the work of the lower ones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum InvalidationLevel {
    #[default]
    None = 0,
    /// Crosshair and other cursor-driven overlays only.
    Cursor = 1,
    /// Series and grid repaint without re-measuring layout.
    Light = 2,
    Full = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaneInvalidation {
    pub level: InvalidationLevel,
    pub auto_scale: bool,
}

impl PaneInvalidation {
    #[must_use]
    pub const fn new(level: InvalidationLevel, auto_scale: bool) -> Self {
        Self { level, auto_scale }
    }

    #[must_use]
    pub fn merged(self, other: Self) -> Self {
        Self {
            level: self.level.max(other.level),
            auto_scale: self.auto_scale || other.auto_scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeScaleInvalidationType {
    FitContent,
    ApplyRange,
    ApplyBarSpacing,
    ApplyRightOffset,
    Reset,
    Animation,
    StopAnimation,
}

/// Linear right-offset animation evaluated against the paint clock (milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScaleAnimation {
    pub from: f64,
    pub to: f64,
    pub start_time: f64,
    pub duration: f64,
}

impl TimeScaleAnimation {
    #[must_use]
    pub fn finished(self, now: f64) -> bool {
        self.duration <= 0.0 || (now - self.start_time) / self.duration >= 1.0
    }

    #[must_use]
    pub fn position(self, now: f64) -> f64 {
        if self.finished(now) {
            return self.to;
        }
        let progress = ((now - self.start_time) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * progress
    }
}

/// Queued structural change of the visible time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimeScaleInvalidation {
    FitContent,
    ApplyRange(LogicalRange),
    ApplyBarSpacing(f64),
    ApplyRightOffset(f64),
    Reset,
    Animation(TimeScaleAnimation),
    StopAnimation,
}

impl TimeScaleInvalidation {
    #[must_use]
    pub fn kind(self) -> TimeScaleInvalidationType {
        match self {
            Self::FitContent => TimeScaleInvalidationType::FitContent,
            Self::ApplyRange(_) => TimeScaleInvalidationType::ApplyRange,
            Self::ApplyBarSpacing(_) => TimeScaleInvalidationType::ApplyBarSpacing,
            Self::ApplyRightOffset(_) => TimeScaleInvalidationType::ApplyRightOffset,
            Self::Reset => TimeScaleInvalidationType::Reset,
            Self::Animation(_) => TimeScaleInvalidationType::Animation,
            Self::StopAnimation => TimeScaleInvalidationType::StopAnimation,
        }
    }
}

type TimeScaleQueue = SmallVec<[TimeScaleInvalidation; 4]>;

/// Everything that changed since the last paint.
///
/// Two independent axes: repaint severity (global and per pane) and queued
/// time-scale structural changes. Operations never fail; merging is a
/// max/OR on the first axis and a replay through the setters on the second.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InvalidateMask {
    invalidated_panes: BTreeMap<usize, PaneInvalidation>,
    global_level: InvalidationLevel,
    time_scale_invalidations: TimeScaleQueue,
}

impl InvalidateMask {
    #[must_use]
    pub fn new(global_level: InvalidationLevel) -> Self {
        Self {
            global_level,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn cursor() -> Self {
        Self::new(InvalidationLevel::Cursor)
    }

    #[must_use]
    pub fn light() -> Self {
        Self::new(InvalidationLevel::Light)
    }

    #[must_use]
    pub fn full() -> Self {
        Self::new(InvalidationLevel::Full)
    }

    #[must_use]
    pub fn full_invalidation(&self) -> InvalidationLevel {
        self.global_level
    }

    /// True when nothing is pending on either axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.global_level == InvalidationLevel::None
            && self
                .invalidated_panes
                .values()
                .all(|pane| pane.level == InvalidationLevel::None && !pane.auto_scale)
            && self.time_scale_invalidations.is_empty()
    }

    pub fn invalidate_pane(&mut self, pane_index: usize, invalidation: PaneInvalidation) {
        self.invalidated_panes
            .entry(pane_index)
            .and_modify(|previous| *previous = previous.merged(invalidation))
            .or_insert(invalidation);
    }

    #[must_use]
    pub fn invalidation_for_pane(&self, pane_index: usize) -> PaneInvalidation {
        match self.invalidated_panes.get(&pane_index) {
            Some(pane) => PaneInvalidation {
                level: self.global_level.max(pane.level),
                auto_scale: pane.auto_scale,
            },
            None => PaneInvalidation {
                level: self.global_level,
                auto_scale: false,
            },
        }
    }

    #[must_use]
    pub fn explicit_pane_invalidations(&self) -> Vec<(usize, PaneInvalidation)> {
        self.invalidated_panes
            .iter()
            .map(|(pane_index, invalidation)| (*pane_index, *invalidation))
            .collect()
    }

    #[must_use]
    pub fn time_scale_invalidations(&self) -> &[TimeScaleInvalidation] {
        &self.time_scale_invalidations
    }

    /// Pending animation, if one is queued.
    #[must_use]
    pub fn time_scale_animation(&self) -> Option<TimeScaleAnimation> {
        self.time_scale_invalidations
            .iter()
            .find_map(|invalidation| match invalidation {
                TimeScaleInvalidation::Animation(animation) => Some(*animation),
                _ => None,
            })
    }

    pub fn set_fit_content(&mut self) {
        self.replace_time_scale_invalidations(TimeScaleInvalidation::FitContent);
    }

    pub fn apply_range(&mut self, range: LogicalRange) {
        self.replace_time_scale_invalidations(TimeScaleInvalidation::ApplyRange(range));
    }

    pub fn reset_time_scale(&mut self) {
        self.replace_time_scale_invalidations(TimeScaleInvalidation::Reset);
    }

    pub fn set_bar_spacing(&mut self, spacing: f64) {
        self.push_incremental_invalidation(TimeScaleInvalidation::ApplyBarSpacing(spacing));
    }

    pub fn set_right_offset(&mut self, offset: f64) {
        self.push_incremental_invalidation(TimeScaleInvalidation::ApplyRightOffset(offset));
    }

    pub fn set_time_scale_animation(&mut self, animation: TimeScaleAnimation) {
        self.remove_time_scale_animation();
        self.time_scale_invalidations
            .push(TimeScaleInvalidation::Animation(animation));
    }

    /// Cancels a pending animation and leaves a single stop marker in the queue.
    pub fn stop_time_scale_animation(&mut self) {
        self.time_scale_invalidations.retain(|invalidation| {
            !matches!(
                invalidation,
                TimeScaleInvalidation::Animation(_) | TimeScaleInvalidation::StopAnimation
            )
        });
        self.time_scale_invalidations
            .push(TimeScaleInvalidation::StopAnimation);
    }

    pub fn merge(&mut self, other: &InvalidateMask) {
        for invalidation in &other.time_scale_invalidations {
            self.apply_time_scale_invalidation(*invalidation);
        }
        self.global_level = self.global_level.max(other.global_level);
        for (pane_index, pane) in &other.invalidated_panes {
            self.invalidate_pane(*pane_index, *pane);
        }
    }

    // Bar spacing and right offset coexist with each other but not with a
    // whole-viewport request, and a later value of the same kind wins.
    fn push_incremental_invalidation(&mut self, invalidation: TimeScaleInvalidation) {
        self.stop_time_scale_animation();
        let kind = invalidation.kind();
        self.time_scale_invalidations.retain(|queued| {
            !matches!(
                queued,
                TimeScaleInvalidation::FitContent
                    | TimeScaleInvalidation::ApplyRange(_)
                    | TimeScaleInvalidation::Reset
            ) && queued.kind() != kind
        });
        self.time_scale_invalidations.push(invalidation);
    }

    fn replace_time_scale_invalidations(&mut self, invalidation: TimeScaleInvalidation) {
        self.stop_time_scale_animation();
        self.time_scale_invalidations.clear();
        self.time_scale_invalidations.push(invalidation);
    }

    fn apply_time_scale_invalidation(&mut self, invalidation: TimeScaleInvalidation) {
        match invalidation {
            TimeScaleInvalidation::FitContent => self.set_fit_content(),
            TimeScaleInvalidation::ApplyRange(range) => self.apply_range(range),
            TimeScaleInvalidation::ApplyBarSpacing(spacing) => self.set_bar_spacing(spacing),
            TimeScaleInvalidation::ApplyRightOffset(offset) => self.set_right_offset(offset),
            TimeScaleInvalidation::Reset => self.reset_time_scale(),
            TimeScaleInvalidation::Animation(animation) => self.set_time_scale_animation(animation),
            TimeScaleInvalidation::StopAnimation => self.stop_time_scale_animation(),
        }
    }

    fn remove_time_scale_animation(&mut self) {
        self.time_scale_invalidations
            .retain(|invalidation| !matches!(invalidation, TimeScaleInvalidation::Animation(_)));
    }
}

#[cfg(test)]
mod tests {
    use super::{
        InvalidateMask, InvalidationLevel, PaneInvalidation, TimeScaleAnimation,
        TimeScaleInvalidation, TimeScaleInvalidationType,
    };
    use crate::core::LogicalRange;

    const ANIMATION: TimeScaleAnimation = TimeScaleAnimation {
        from: 0.0,
        to: 10.0,
        start_time: 100.0,
        duration: 200.0,
    };

    #[test]
    fn pane_without_entry_reports_global_level_only() {
        let mut mask = InvalidateMask::light();
        mask.invalidate_pane(2, PaneInvalidation::new(InvalidationLevel::Cursor, true));
        assert_eq!(
            mask.invalidation_for_pane(2),
            PaneInvalidation::new(InvalidationLevel::Light, true)
        );
        assert_eq!(
            mask.invalidation_for_pane(5),
            PaneInvalidation::new(InvalidationLevel::Light, false)
        );
    }

    #[test]
    fn apply_range_discards_incremental_entries() {
        let mut mask = InvalidateMask::light();
        mask.set_bar_spacing(8.0);
        mask.set_right_offset(2.0);
        mask.apply_range(LogicalRange::new(10.0, 20.0));
        assert_eq!(
            mask.time_scale_invalidations(),
            &[TimeScaleInvalidation::ApplyRange(LogicalRange::new(10.0, 20.0))]
        );
    }

    #[test]
    fn bar_spacing_after_fit_content_drops_the_fit() {
        let mut mask = InvalidateMask::light();
        mask.set_fit_content();
        mask.set_bar_spacing(12.0);
        mask.set_right_offset(3.0);
        mask.set_bar_spacing(14.0);
        assert_eq!(
            mask.time_scale_invalidations(),
            &[
                TimeScaleInvalidation::ApplyRightOffset(3.0),
                TimeScaleInvalidation::StopAnimation,
                TimeScaleInvalidation::ApplyBarSpacing(14.0),
            ]
        );
    }

    #[test]
    fn single_animation_entry_survives_repeated_sets() {
        let mut mask = InvalidateMask::cursor();
        mask.set_time_scale_animation(ANIMATION);
        mask.set_time_scale_animation(TimeScaleAnimation {
            to: 20.0,
            ..ANIMATION
        });
        let kinds: Vec<_> = mask
            .time_scale_invalidations()
            .iter()
            .map(|inv| inv.kind())
            .collect();
        assert_eq!(kinds, vec![TimeScaleInvalidationType::Animation]);
        assert_eq!(mask.time_scale_animation().map(|a| a.to), Some(20.0));
    }

    #[test]
    fn animation_position_interpolates_and_clamps() {
        assert!(!ANIMATION.finished(150.0));
        assert_eq!(ANIMATION.position(200.0), 5.0);
        assert!(ANIMATION.finished(300.0));
        assert_eq!(ANIMATION.position(1_000.0), 10.0);
    }

    #[test]
    fn empty_mask_reports_empty() {
        assert!(InvalidateMask::new(InvalidationLevel::None).is_empty());
        assert!(!InvalidateMask::cursor().is_empty());
        let mut mask = InvalidateMask::new(InvalidationLevel::None);
        mask.stop_time_scale_animation();
        assert!(!mask.is_empty());
    }
}
