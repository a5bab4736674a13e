use crate::core::{PriceMark, TimeMark};
use crate::error::ChartResult;

use super::{
    BitmapScope, Color, LineStyle, PaneRenderer, RenderingTarget, set_line_style, stroke_in_pixel,
};

/// Snapshot of grid options plus the marks of the current frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridRendererData {
    pub vert_lines_visible: bool,
    pub horz_lines_visible: bool,
    pub vert_lines_color: Color,
    pub horz_lines_color: Color,
    pub vert_line_style: LineStyle,
    pub horz_line_style: LineStyle,
    pub time_marks: Vec<f64>,
    pub price_marks: Vec<f64>,
}

impl GridRendererData {
    /// Refills mark coordinates without reallocating.
    pub fn set_marks(&mut self, time_marks: &[TimeMark], price_marks: &[PriceMark]) {
        self.time_marks.clear();
        self.time_marks
            .extend(time_marks.iter().map(|mark| mark.coord));
        self.price_marks.clear();
        self.price_marks
            .extend(price_marks.iter().map(|mark| mark.coord));
    }
}

#[derive(Debug, Default)]
pub struct GridRenderer {
    data: Option<GridRendererData>,
}

impl GridRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, data: Option<GridRendererData>) {
        self.data = data;
    }

    #[must_use]
    pub fn data(&self) -> Option<&GridRendererData> {
        self.data.as_ref()
    }

    /// In-place access for views that refresh the data every frame.
    pub fn data_mut(&mut self) -> &mut GridRendererData {
        self.data.get_or_insert_with(GridRendererData::default)
    }

    fn draw_impl(&self, scope: &mut BitmapScope<'_>) -> ChartResult<()> {
        let Some(data) = &self.data else {
            return Ok(());
        };
        let line_width = scope.horizontal_pixel_ratio.floor().max(1.0);
        let bitmap = scope.bitmap_size;
        let (hpr, vpr) = (scope.horizontal_pixel_ratio, scope.vertical_pixel_ratio);
        scope.context.set_line_width(line_width);

        stroke_in_pixel(scope.context, |canvas| {
            if data.vert_lines_visible {
                canvas.set_stroke_color(data.vert_lines_color);
                set_line_style(canvas, data.vert_line_style);
                canvas.begin_path();
                for coord in &data.time_marks {
                    let x = (coord * hpr).round();
                    canvas.move_to(x, -line_width);
                    canvas.line_to(x, bitmap.height + line_width);
                }
                canvas.stroke()?;
            }
            if data.horz_lines_visible {
                canvas.set_stroke_color(data.horz_lines_color);
                set_line_style(canvas, data.horz_line_style);
                canvas.begin_path();
                for coord in &data.price_marks {
                    let y = (coord * vpr).round();
                    canvas.move_to(-line_width, y);
                    canvas.line_to(bitmap.width + line_width, y);
                }
                canvas.stroke()?;
            }
            Ok(())
        })
    }
}

impl PaneRenderer for GridRenderer {
    fn draw(&self, target: &mut RenderingTarget<'_>) -> ChartResult<()> {
        target.use_bitmap_coordinate_space(|scope| self.draw_impl(scope))
    }
}
