use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::ChartResult;

use super::{Color, FillStyle, LineCap, LineJoin, LineStyle, TextAlign};

/// Measured extents of a text run, in the canvas' current units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub actual_bounding_box_ascent: f64,
    pub actual_bounding_box_descent: f64,
}

/// Immediate-mode 2D drawing context.
///
/// Coordinates are device pixels unless a scale was pushed with [`Canvas::scale`].
/// Path-building calls are infallible; operations that rasterize report
/// backend failures.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);
    fn scale(&mut self, sx: f64, sy: f64);

    fn set_line_width(&mut self, width: f64);
    fn line_width(&self) -> f64;
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);
    fn set_line_dash(&mut self, segments: &[f64]);
    fn set_stroke_color(&mut self, color: Color);
    fn set_fill_style(&mut self, style: FillStyle);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);

    fn stroke(&mut self) -> ChartResult<()>;
    fn fill(&mut self) -> ChartResult<()>;
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()>;
    /// Draws text with its vertical middle at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()>;
    fn measure_text(&mut self, text: &str) -> TextMetrics;
}

pub fn set_line_style(canvas: &mut dyn Canvas, style: LineStyle) {
    let pattern = style.dash_pattern(canvas.line_width());
    canvas.set_line_dash(&pattern);
}

/// Runs `draw` with a half-pixel shift when the stroke width is odd, so
/// strokes on integer coordinates cover whole device pixels.
pub fn stroke_in_pixel<F>(canvas: &mut dyn Canvas, draw: F) -> ChartResult<()>
where
    F: FnOnce(&mut dyn Canvas) -> ChartResult<()>,
{
    canvas.save();
    if canvas.line_width() % 2.0 != 0.0 {
        canvas.translate(0.5, 0.5);
    }
    let result = draw(canvas);
    canvas.restore();
    result
}

fn odd_width_correction(canvas: &dyn Canvas) -> f64 {
    if canvas.line_width() % 2.0 != 0.0 {
        0.5
    } else {
        0.0
    }
}

pub fn draw_horizontal_line(
    canvas: &mut dyn Canvas,
    y: f64,
    left: f64,
    right: f64,
) -> ChartResult<()> {
    let correction = odd_width_correction(canvas);
    canvas.begin_path();
    canvas.move_to(left, y + correction);
    canvas.line_to(right, y + correction);
    canvas.stroke()
}

pub fn draw_vertical_line(
    canvas: &mut dyn Canvas,
    x: f64,
    top: f64,
    bottom: f64,
) -> ChartResult<()> {
    let correction = odd_width_correction(canvas);
    canvas.begin_path();
    canvas.move_to(x + correction, top);
    canvas.line_to(x + correction, bottom);
    canvas.stroke()
}

/// Appends a rounded rectangle sub-path.
///
/// `radii` are top-left, top-right, bottom-right, bottom-left and are clamped
/// to half of the shorter side.
pub fn append_round_rect(
    canvas: &mut dyn Canvas,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radii: [f64; 4],
) {
    let limit = (width.min(height) * 0.5).max(0.0);
    let [top_left, top_right, bottom_right, bottom_left] = radii.map(|r| r.clamp(0.0, limit));
    let right = x + width;
    let bottom = y + height;

    canvas.move_to(x + top_left, y);
    canvas.line_to(right - top_right, y);
    if top_right > 0.0 {
        canvas.arc(right - top_right, y + top_right, top_right, -FRAC_PI_2, 0.0);
    }
    canvas.line_to(right, bottom - bottom_right);
    if bottom_right > 0.0 {
        canvas.arc(
            right - bottom_right,
            bottom - bottom_right,
            bottom_right,
            0.0,
            FRAC_PI_2,
        );
    }
    canvas.line_to(x + bottom_left, bottom);
    if bottom_left > 0.0 {
        canvas.arc(x + bottom_left, bottom - bottom_left, bottom_left, FRAC_PI_2, PI);
    }
    canvas.line_to(x, y + top_left);
    if top_left > 0.0 {
        canvas.arc(x + top_left, y + top_left, top_left, PI, PI + FRAC_PI_2);
    }
    canvas.close_path();
}
