//! Invalidation model: what must be redrawn, and when.

mod invalidate_mask;
mod scheduler;

pub use invalidate_mask::{
    InvalidateMask, InvalidationLevel, PaneInvalidation, TimeScaleAnimation,
    TimeScaleInvalidation, TimeScaleInvalidationType,
};
pub use scheduler::{PaintOutcome, RenderScheduler, TimeScaleInvalidationTarget};
