use serde::{Deserialize, Serialize};

use crate::core::PixelRect;
use crate::error::ChartResult;

use super::{DataToClipTransform, GpuContext, GpuViewport};

/// Layer a compositor draws into relative to the 2D chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlayPlacement {
    #[default]
    Above,
    Below,
}

/// Per-frame values shared by all series.
///
/// The transform changes on every pan or zoom; do not keep it across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuFrameContext {
    pub viewport: GpuViewport,
    pub surface_width: u32,
    pub surface_height: u32,
    pub transform: DataToClipTransform,
    /// Pane area in device pixels.
    pub clip: PixelRect,
}

pub trait GpuCustomSeries {
    fn name(&self) -> &str;

    /// Lower values are drawn first.
    fn order(&self) -> i32 {
        0
    }

    /// Allocates buffers and programs. An error leaves the series inert.
    fn on_init(&mut self, context: &mut dyn GpuContext) -> ChartResult<()>;

    fn render(&mut self, context: &mut dyn GpuContext, frame: &GpuFrameContext) -> ChartResult<()>;

    fn on_destroy(&mut self, context: &mut dyn GpuContext);
}
