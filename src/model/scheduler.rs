use tracing::{debug, trace};

use crate::core::LogicalRange;
use crate::error::ChartResult;

use super::{InvalidateMask, TimeScaleAnimation, TimeScaleInvalidation};

/// Time-scale collaborator receiving the structural part of a consumed mask.
pub trait TimeScaleInvalidationTarget {
    fn fit_content(&mut self);
    fn set_logical_range(&mut self, range: LogicalRange);
    fn set_bar_spacing(&mut self, spacing: f64);
    fn set_right_offset(&mut self, offset: f64);
    fn restore_default(&mut self);
}

/// Outcome of one [`RenderScheduler::paint`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// Nothing was pending; no frame was produced.
    Idle,
    /// A frame was drawn and nothing is left pending.
    Drawn,
    /// A frame was drawn and an animation re-queued itself for the next paint.
    DrawnWithAnimation,
}

/// Owner of the single pending invalidation accumulator.
///
/// Requests between two paints merge into one mask; the host is asked for a
/// paint callback only on the first request of each burst.
#[derive(Debug, Default)]
pub struct RenderScheduler {
    pending: Option<InvalidateMask>,
    frames_produced: u64,
}

impl RenderScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `mask` into the pending accumulator.
    ///
    /// Returns `true` when the caller must request a paint callback.
    pub fn invalidate(&mut self, mask: &InvalidateMask) -> bool {
        match &mut self.pending {
            Some(pending) => {
                pending.merge(mask);
                trace!(level = ?pending.full_invalidation(), "coalesced invalidation");
                false
            }
            None => {
                let mut pending = InvalidateMask::default();
                pending.merge(mask);
                debug!(level = ?pending.full_invalidation(), "paint requested");
                self.pending = Some(pending);
                true
            }
        }
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<&InvalidateMask> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn frames_produced(&self) -> u64 {
        self.frames_produced
    }

    /// Removes and returns the pending mask.
    pub fn take_pending(&mut self) -> Option<InvalidateMask> {
        self.pending.take()
    }

    /// Consumes the pending mask for one frame.
    ///
    /// Structural entries are applied to `time_scale` in queue order before
    /// `draw` runs. An animation that has not finished at `now` is re-queued in
    /// a fresh light mask, so the host keeps receiving paint requests until it ends.
    pub fn paint<T, F>(
        &mut self,
        now: f64,
        time_scale: &mut T,
        draw: F,
    ) -> ChartResult<PaintOutcome>
    where
        T: TimeScaleInvalidationTarget + ?Sized,
        F: FnOnce(&InvalidateMask) -> ChartResult<()>,
    {
        let Some(mask) = self.pending.take() else {
            return Ok(PaintOutcome::Idle);
        };

        let mut running: Option<TimeScaleAnimation> = None;
        for invalidation in mask.time_scale_invalidations() {
            match *invalidation {
                TimeScaleInvalidation::FitContent => time_scale.fit_content(),
                TimeScaleInvalidation::ApplyRange(range) => time_scale.set_logical_range(range),
                TimeScaleInvalidation::ApplyBarSpacing(spacing) => {
                    time_scale.set_bar_spacing(spacing);
                }
                TimeScaleInvalidation::ApplyRightOffset(offset) => {
                    time_scale.set_right_offset(offset);
                }
                TimeScaleInvalidation::Reset => time_scale.restore_default(),
                TimeScaleInvalidation::Animation(animation) => {
                    time_scale.set_right_offset(animation.position(now));
                    if !animation.finished(now) {
                        running = Some(animation);
                    }
                }
                TimeScaleInvalidation::StopAnimation => {}
            }
        }

        draw(&mask)?;
        self.frames_produced += 1;

        match running {
            Some(animation) => {
                let mut next = InvalidateMask::light();
                next.set_time_scale_animation(animation);
                self.pending = Some(next);
                Ok(PaintOutcome::DrawnWithAnimation)
            }
            None => Ok(PaintOutcome::Drawn),
        }
    }
}
