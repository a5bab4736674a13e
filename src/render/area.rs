use crate::core::IndexRange;
use crate::error::ChartResult;

use super::{
    BitmapScope, Color, FillStyle, LinePoint, LineType, PaneRenderer, RenderingTarget, walk_line,
};

/// One visible point of an area series with optional gradient overrides.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AreaFillItem {
    pub x: f64,
    pub y: f64,
    pub top_color: Option<Color>,
    pub bottom_color: Option<Color>,
}

impl LinePoint for AreaFillItem {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AreaRendererData {
    pub items: Vec<AreaFillItem>,
    pub visible_range: Option<IndexRange>,
    pub line_type: LineType,
    pub bar_width: f64,
    pub top_color: Color,
    pub bottom_color: Color,
    /// Media-space y the area is closed against.
    pub base_level_coordinate: f64,
    /// Top of the gradient in media space; defaults to the pane top.
    pub gradient_top: Option<f64>,
}

#[derive(Debug, Default)]
pub struct AreaRenderer {
    data: Option<AreaRendererData>,
}

impl AreaRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, data: Option<AreaRendererData>) {
        self.data = data;
    }

    #[must_use]
    pub fn data(&self) -> Option<&AreaRendererData> {
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

        let base = data.base_level_coordinate;
        let top_y = data.gradient_top.unwrap_or(0.0) * scope.vertical_pixel_ratio;
        let bottom_y = scope.bitmap_size.height;
        walk_line(
            scope,
            &data.items,
            data.line_type,
            visible_range,
            data.bar_width,
            |_, item| FillStyle::VerticalGradient {
                top: item.top_color.unwrap_or(data.top_color),
                bottom: item.bottom_color.unwrap_or(data.bottom_color),
                top_y,
                bottom_y,
            },
            |scope, style, first, last| {
                let (hpr, vpr) = (scope.horizontal_pixel_ratio, scope.vertical_pixel_ratio);
                let canvas = &mut *scope.context;
                canvas.line_to(last.x * hpr, base * vpr);
                canvas.line_to(first.x * hpr, base * vpr);
                canvas.close_path();
                canvas.set_fill_style(*style);
                canvas.fill()
            },
        )
    }
}

impl PaneRenderer for AreaRenderer {
    fn draw(&self, target: &mut RenderingTarget<'_>) -> ChartResult<()> {
        target.use_bitmap_coordinate_space(|scope| self.draw_impl(scope))
    }
}
