use serde::{Deserialize, Serialize};

use crate::core::PixelRect;
use crate::error::{ChartError, ChartResult};

/// Surface size in CSS pixels plus the device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpuViewport {
    pub width_css: f64,
    pub height_css: f64,
    pub device_pixel_ratio: f64,
}

impl GpuViewport {
    pub fn validate(self) -> ChartResult<()> {
        let valid = self.width_css.is_finite()
            && self.height_css.is_finite()
            && self.width_css > 0.0
            && self.height_css > 0.0
            && self.device_pixel_ratio.is_finite()
            && self.device_pixel_ratio > 0.0;
        if valid {
            Ok(())
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width_css,
                height: self.height_css,
            })
        }
    }

    /// `floor(css * dpr)` on both axes.
    #[must_use]
    pub fn surface_size(self) -> (u32, u32) {
        (
            (self.width_css * self.device_pixel_ratio).floor() as u32,
            (self.height_css * self.device_pixel_ratio).floor() as u32,
        )
    }
}

/// Visible data-space window: time keys horizontally, prices vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataWindow {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Clip region in CSS pixels relative to the surface origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ClipRect {
    /// Device-pixel rectangle covering the clip, clamped to the surface.
    #[must_use]
    pub fn to_pixel_rect(self, device_pixel_ratio: f64, surface: (u32, u32)) -> PixelRect {
        let (surface_width, surface_height) = (f64::from(surface.0), f64::from(surface.1));
        let left = (self.x * device_pixel_ratio).floor().clamp(0.0, surface_width);
        let top = (self.y * device_pixel_ratio).floor().clamp(0.0, surface_height);
        let right = ((self.x + self.width) * device_pixel_ratio)
            .ceil()
            .clamp(left, surface_width);
        let bottom = ((self.y + self.height) * device_pixel_ratio)
            .ceil()
            .clamp(top, surface_height);
        PixelRect::new(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
        )
    }
}

/// Affine data-space to clip-space map, stored as a column-major 3x3 matrix.
///
/// Kept in `f64` because time keys are millisecond timestamps; narrow with
/// [`DataToClipTransform::to_f32_columns`] only for upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataToClipTransform {
    matrix: [f64; 9],
}

impl DataToClipTransform {
    pub fn from_window(window: DataWindow) -> ChartResult<Self> {
        let width = window.x_max - window.x_min;
        let height = window.y_max - window.y_min;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "data window must have a positive finite extent, got {width} x {height}"
            )));
        }
        let scale_x = 2.0 / width;
        let scale_y = 2.0 / height;
        Ok(Self {
            matrix: [
                scale_x,
                0.0,
                0.0,
                0.0,
                scale_y,
                0.0,
                -1.0 - window.x_min * scale_x,
                -1.0 - window.y_min * scale_y,
                1.0,
            ],
        })
    }

    #[must_use]
    pub fn matrix(&self) -> &[f64; 9] {
        &self.matrix
    }

    #[must_use]
    pub fn apply(&self, x: f64, y: f64) -> [f64; 2] {
        let m = &self.matrix;
        [m[0] * x + m[3] * y + m[6], m[1] * x + m[4] * y + m[7]]
    }

    #[must_use]
    pub fn to_f32_columns(&self) -> [f32; 9] {
        self.matrix.map(|value| value as f32)
    }
}
