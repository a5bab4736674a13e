//! Hardware-accelerated custom series composited above or below the 2D chart.
//!
//! The compositor owns the shared context and the draw order; every series
//! owns its own buffers and programs between `on_init` and `on_destroy`.
//! Backends plug in by implementing [`GpuContext`].

mod compositor;
mod context;
mod series;
mod transform;

pub use compositor::{GpuOverlayCompositor, GpuSeriesId, GpuSeriesState};
pub use context::{GpuContext, GpuContextFactory};
pub use series::{GpuCustomSeries, GpuFrameContext, OverlayPlacement};
pub use transform::{ClipRect, DataToClipTransform, DataWindow, GpuViewport};
