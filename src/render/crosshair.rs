use crate::error::ChartResult;

use super::{
    BitmapScope, Color, LineCap, LineStyle, PaneRenderer, RenderingTarget, draw_horizontal_line,
    draw_vertical_line, set_line_style,
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrosshairLineData {
    pub visible: bool,
    pub line_width: f64,
    pub color: Color,
    pub line_style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrosshairRendererData {
    pub vert_line: CrosshairLineData,
    pub horz_line: CrosshairLineData,
    /// Media-space position; negative means "off the pane".
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default)]
pub struct CrosshairRenderer {
    data: Option<CrosshairRendererData>,
}

impl CrosshairRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, data: Option<CrosshairRendererData>) {
        self.data = data;
    }

    #[must_use]
    pub fn data(&self) -> Option<&CrosshairRendererData> {
        self.data.as_ref()
    }

    fn draw_impl(&self, scope: &mut BitmapScope<'_>) -> ChartResult<()> {
        let Some(data) = self.data else {
            return Ok(());
        };
        if !data.vert_line.visible && !data.horz_line.visible {
            return Ok(());
        }

        let x = (data.x * scope.horizontal_pixel_ratio).round();
        let y = (data.y * scope.vertical_pixel_ratio).round();
        let canvas = &mut *scope.context;
        canvas.set_line_cap(LineCap::Butt);

        if data.vert_line.visible && x >= 0.0 {
            let width = (data.vert_line.line_width * scope.horizontal_pixel_ratio)
                .floor()
                .max(1.0);
            canvas.set_line_width(width);
            canvas.set_stroke_color(data.vert_line.color);
            set_line_style(canvas, data.vert_line.line_style);
            draw_vertical_line(canvas, x, 0.0, scope.bitmap_size.height)?;
        }
        if data.horz_line.visible && y >= 0.0 {
            let width = (data.horz_line.line_width * scope.vertical_pixel_ratio)
                .floor()
                .max(1.0);
            canvas.set_line_width(width);
            canvas.set_stroke_color(data.horz_line.color);
            set_line_style(canvas, data.horz_line.line_style);
            draw_horizontal_line(canvas, y, 0.0, scope.bitmap_size.width)?;
        }
        Ok(())
    }
}

impl PaneRenderer for CrosshairRenderer {
    fn draw(&self, target: &mut RenderingTarget<'_>) -> ChartResult<()> {
        target.use_bitmap_coordinate_space(|scope| self.draw_impl(scope))
    }
}
