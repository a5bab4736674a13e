use std::f64::consts::TAU;

use crate::core::{IndexRange, Point};
use crate::error::ChartResult;

use super::{
    BitmapScope, Color, FillStyle, LineCap, LineJoin, LinePoint, LineStyle, LineType,
    PaneRenderer, RenderingTarget, set_line_style, walk_line,
};

/// One visible point of a line series; `color` overrides the series color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineStrokeItem {
    pub x: f64,
    pub y: f64,
    pub color: Option<Color>,
}

impl LinePoint for LineStrokeItem {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineRendererData {
    pub items: Vec<LineStrokeItem>,
    pub visible_range: Option<IndexRange>,
    pub line_type: LineType,
    pub line_color: Color,
    pub line_width: f64,
    pub line_style: LineStyle,
    pub bar_width: f64,
    /// Radius of the dot drawn on every visible point, in CSS pixels.
    pub point_markers_radius: Option<f64>,
}

#[derive(Debug, Default)]
pub struct LineRenderer {
    data: Option<LineRendererData>,
}

impl LineRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, data: Option<LineRendererData>) {
        self.data = data;
    }

    #[must_use]
    pub fn data(&self) -> Option<&LineRendererData> {
        self.data.as_ref()
    }

    fn draw_impl(&self, scope: &mut BitmapScope<'_>) -> ChartResult<()> {
        let Some(data) = &self.data else {
            return Ok(());
        };
        let Some(visible_range) = data.visible_range else {
            return Ok(());
        };
        if data.items.is_empty() || visible_range.is_empty() {
            return Ok(());
        }

        let canvas = &mut *scope.context;
        canvas.set_line_cap(LineCap::Butt);
        canvas.set_line_width(data.line_width * scope.vertical_pixel_ratio);
        set_line_style(canvas, data.line_style);
        canvas.set_line_join(LineJoin::Round);

        let series_color = data.line_color;
        walk_line(
            scope,
            &data.items,
            data.line_type,
            visible_range,
            data.bar_width,
            |_, item| item.color.unwrap_or(series_color),
            |scope, color, _, _| {
                scope.context.set_stroke_color(*color);
                scope.context.stroke()
            },
        )?;

        if let Some(radius) = data.point_markers_radius
            && radius > 0.0
        {
            self.draw_point_markers(scope, data, visible_range, radius)?;
        }
        Ok(())
    }

    fn draw_point_markers(
        &self,
        scope: &mut BitmapScope<'_>,
        data: &LineRendererData,
        visible_range: IndexRange,
        radius: f64,
    ) -> ChartResult<()> {
        let (hpr, vpr) = (scope.horizontal_pixel_ratio, scope.vertical_pixel_ratio);
        let to = visible_range.to.min(data.items.len());
        for item in data.items.get(visible_range.from..to).unwrap_or_default() {
            let center = Point::new(item.x * hpr, item.y * vpr);
            scope
                .context
                .set_fill_style(FillStyle::Solid(item.color.unwrap_or(data.line_color)));
            scope.context.begin_path();
            scope.context.arc(center.x, center.y, radius * hpr, 0.0, TAU);
            scope.context.fill()?;
        }
        Ok(())
    }
}

impl PaneRenderer for LineRenderer {
    fn draw(&self, target: &mut RenderingTarget<'_>) -> ChartResult<()> {
        target.use_bitmap_coordinate_space(|scope| self.draw_impl(scope))
    }
}
