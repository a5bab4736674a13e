use crate::core::PixelRect;
use crate::error::ChartResult;

/// Shared drawing surface handed to every custom series.
pub trait GpuContext {
    /// Backing surface size in device pixels.
    fn surface_size(&self) -> (u32, u32);

    fn resize_surface(&mut self, width: u32, height: u32) -> ChartResult<()>;

    fn disable_scissor(&mut self);

    fn set_viewport(&mut self, rect: PixelRect);

    fn clear_transparent(&mut self);
}

/// Creates the shared context once the host surface exists.
pub type GpuContextFactory = Box<dyn FnMut() -> ChartResult<Box<dyn GpuContext>>>;
