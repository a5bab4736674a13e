use crate::core::Size;
use crate::error::{ChartError, ChartResult};

use super::Canvas;

/// Device-pixel drawing scope; coordinates must be snapped by the caller.
pub struct BitmapScope<'a> {
    pub context: &'a mut dyn Canvas,
    pub media_size: Size,
    pub bitmap_size: Size,
    pub horizontal_pixel_ratio: f64,
    pub vertical_pixel_ratio: f64,
}

/// CSS-pixel drawing scope; the canvas is pre-scaled by the pixel ratios.
pub struct MediaScope<'a> {
    pub context: &'a mut dyn Canvas,
    pub media_size: Size,
}

/// A canvas together with its CSS and device-pixel sizes.
pub struct RenderingTarget<'a> {
    canvas: &'a mut dyn Canvas,
    media_size: Size,
    bitmap_size: Size,
}

impl<'a> RenderingTarget<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, media_size: Size, bitmap_size: Size) -> ChartResult<Self> {
        for size in [media_size, bitmap_size] {
            if !size.is_valid() {
                return Err(ChartError::InvalidViewport {
                    width: size.width,
                    height: size.height,
                });
            }
        }
        Ok(Self {
            canvas,
            media_size,
            bitmap_size,
        })
    }

    /// Target whose bitmap size is `round(media * pixel_ratio)` on both axes.
    pub fn with_pixel_ratio(
        canvas: &'a mut dyn Canvas,
        media_size: Size,
        pixel_ratio: f64,
    ) -> ChartResult<Self> {
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(ChartError::InvalidData(
                "device pixel ratio must be finite and > 0".to_owned(),
            ));
        }
        let bitmap_size = Size::new(
            (media_size.width * pixel_ratio).round(),
            (media_size.height * pixel_ratio).round(),
        );
        Self::new(canvas, media_size, bitmap_size)
    }

    #[must_use]
    pub fn media_size(&self) -> Size {
        self.media_size
    }

    #[must_use]
    pub fn bitmap_size(&self) -> Size {
        self.bitmap_size
    }

    #[must_use]
    pub fn horizontal_pixel_ratio(&self) -> f64 {
        self.bitmap_size.width / self.media_size.width
    }

    #[must_use]
    pub fn vertical_pixel_ratio(&self) -> f64 {
        self.bitmap_size.height / self.media_size.height
    }

    /// Direct access for measurements that do not draw.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    pub fn use_bitmap_coordinate_space<R>(
        &mut self,
        draw: impl FnOnce(&mut BitmapScope<'_>) -> R,
    ) -> R {
        let horizontal_pixel_ratio = self.horizontal_pixel_ratio();
        let vertical_pixel_ratio = self.vertical_pixel_ratio();
        self.canvas.save();
        let result = {
            let mut scope = BitmapScope {
                context: &mut *self.canvas,
                media_size: self.media_size,
                bitmap_size: self.bitmap_size,
                horizontal_pixel_ratio,
                vertical_pixel_ratio,
            };
            draw(&mut scope)
        };
        self.canvas.restore();
        result
    }

    pub fn use_media_coordinate_space<R>(
        &mut self,
        draw: impl FnOnce(&mut MediaScope<'_>) -> R,
    ) -> R {
        let horizontal_pixel_ratio = self.horizontal_pixel_ratio();
        let vertical_pixel_ratio = self.vertical_pixel_ratio();
        self.canvas.save();
        self.canvas.scale(horizontal_pixel_ratio, vertical_pixel_ratio);
        let result = {
            let mut scope = MediaScope {
                context: &mut *self.canvas,
                media_size: self.media_size,
            };
            draw(&mut scope)
        };
        self.canvas.restore();
        result
    }
}

/// Anything drawn into a pane.
pub trait PaneRenderer {
    fn draw(&self, target: &mut RenderingTarget<'_>) -> ChartResult<()>;

    fn draw_background(&self, _target: &mut RenderingTarget<'_>) -> ChartResult<()> {
        Ok(())
    }
}
