use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::FontDescription;
use tracing::warn;

use crate::error::{ChartError, ChartResult};

use super::{Canvas, Color, FillStyle, LineCap, LineJoin, TextAlign, TextMetrics};

#[derive(Debug, Clone)]
struct PaintState {
    stroke: Color,
    fill: FillStyle,
    font: FontDescription,
    text_align: TextAlign,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            stroke: Color::rgb(0.0, 0.0, 0.0),
            fill: FillStyle::Solid(Color::rgb(0.0, 0.0, 0.0)),
            font: FontDescription::from_string("Sans 10px"),
            text_align: TextAlign::Left,
        }
    }
}

/// [`Canvas`] over a Cairo context, measuring and drawing text with Pango.
///
/// Cairo keeps transform, line width, cap, join and dash itself; paint
/// sources, font and alignment are tracked here so `save`/`restore` behave
/// like an HTML canvas.
#[derive(Debug)]
pub struct CairoCanvas {
    context: Context,
    surface: Option<ImageSurface>,
    state: PaintState,
    saved: Vec<PaintState>,
}

impl CairoCanvas {
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self {
            context,
            surface: None,
            state: PaintState::default(),
            saved: Vec::new(),
        }
    }

    /// Offscreen ARGB32 canvas of `width x height` device pixels.
    pub fn with_image_surface(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidViewport {
                width: f64::from(width),
                height: f64::from(height),
            });
        }
        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        let context = Context::new(&surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        Ok(Self {
            surface: Some(surface),
            ..Self::new(context)
        })
    }

    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }

    #[must_use]
    pub fn surface(&self) -> Option<&ImageSurface> {
        self.surface.as_ref()
    }

    fn apply_fill(&self) -> ChartResult<()> {
        match self.state.fill {
            FillStyle::Solid(color) => {
                apply_color(&self.context, color);
                Ok(())
            }
            FillStyle::VerticalGradient {
                top,
                bottom,
                top_y,
                bottom_y,
            } => {
                let gradient = LinearGradient::new(0.0, top_y, 0.0, bottom_y);
                gradient.add_color_stop_rgba(0.0, top.red, top.green, top.blue, top.alpha);
                gradient.add_color_stop_rgba(
                    1.0,
                    bottom.red,
                    bottom.green,
                    bottom.blue,
                    bottom.alpha,
                );
                self.context
                    .set_source(&gradient)
                    .map_err(|err| map_backend_error("failed to set gradient", err))
            }
        }
    }

    fn layout(&self, text: &str) -> pango::Layout {
        let layout = pangocairo::functions::create_layout(&self.context);
        layout.set_font_description(Some(&self.state.font));
        layout.set_text(text);
        layout
    }
}

impl Canvas for CairoCanvas {
    fn save(&mut self) {
        if let Err(err) = self.context.save() {
            warn!(error = %err, "cairo save failed");
        }
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Err(err) = self.context.restore() {
            warn!(error = %err, "cairo restore failed");
        }
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.context.translate(dx, dy);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.context.scale(sx, sy);
    }

    fn set_line_width(&mut self, width: f64) {
        self.context.set_line_width(width);
    }

    fn line_width(&self) -> f64 {
        self.context.line_width()
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.context.set_line_cap(match cap {
            LineCap::Butt => cairo::LineCap::Butt,
            LineCap::Round => cairo::LineCap::Round,
            LineCap::Square => cairo::LineCap::Square,
        });
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.context.set_line_join(match join {
            LineJoin::Miter => cairo::LineJoin::Miter,
            LineJoin::Round => cairo::LineJoin::Round,
            LineJoin::Bevel => cairo::LineJoin::Bevel,
        });
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.context.set_dash(segments, 0.0);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.state.stroke = color;
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.state.fill = style;
    }

    fn set_font(&mut self, font: &str) {
        self.state.font = FontDescription::from_string(&css_font_to_pango(font));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    fn begin_path(&mut self) {
        self.context.new_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.context.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.context.line_to(x, y);
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.context.curve_to(cp1x, cp1y, cp2x, cp2y, x, y);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.context.arc(cx, cy, radius, start_angle, end_angle);
    }

    fn close_path(&mut self) {
        self.context.close_path();
    }

    fn stroke(&mut self) -> ChartResult<()> {
        apply_color(&self.context, self.state.stroke);
        self.context
            .stroke()
            .map_err(|err| map_backend_error("failed to stroke path", err))
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.apply_fill()?;
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill path", err))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.context.new_path();
        self.context.rectangle(x, y, width, height);
        self.fill()
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        let layout = self.layout(text);
        let (width, height) = layout.pixel_size();
        let left = match self.state.text_align {
            TextAlign::Left => x,
            TextAlign::Center => x - f64::from(width) / 2.0,
            TextAlign::Right => x - f64::from(width),
        };
        self.apply_fill()?;
        self.context.move_to(left, y - f64::from(height) / 2.0);
        pangocairo::functions::show_layout(&self.context, &layout);
        self.context.new_path();
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> TextMetrics {
        let layout = self.layout(text);
        let (ink, logical) = layout.pixel_extents();
        let baseline = f64::from(layout.baseline()) / f64::from(pango::SCALE);
        let ink_top = f64::from(ink.y());
        let ink_bottom = f64::from(ink.y() + ink.height());
        TextMetrics {
            width: f64::from(logical.width()),
            actual_bounding_box_ascent: baseline - ink_top,
            actual_bounding_box_descent: ink_bottom - baseline,
        }
    }
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

/// `"12px Sans"` becomes `"Sans 12px"`; anything else is passed through.
fn css_font_to_pango(font: &str) -> String {
    match font.split_once(' ') {
        Some((size, family)) if size.ends_with("px") => format!("{family} {size}"),
        _ => font.to_owned(),
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Size;
    use crate::render::{GridRenderer, GridRendererData, PaneRenderer, RenderingTarget};

    #[test]
    fn css_fonts_are_reordered_for_pango() {
        assert_eq!(css_font_to_pango("12px Trebuchet MS"), "Trebuchet MS 12px");
        assert_eq!(css_font_to_pango("Sans 9"), "Sans 9");
    }

    #[test]
    fn grid_draws_onto_image_surface() {
        let mut canvas = CairoCanvas::with_image_surface(40, 20).expect("surface");
        let mut renderer = GridRenderer::new();
        renderer.set_data(Some(GridRendererData {
            vert_lines_visible: true,
            horz_lines_visible: true,
            vert_lines_color: Color::rgb(0.5, 0.5, 0.5),
            horz_lines_color: Color::rgb(0.5, 0.5, 0.5),
            time_marks: vec![10.0, 20.0],
            price_marks: vec![5.0],
            ..GridRendererData::default()
        }));
        let mut target =
            RenderingTarget::new(&mut canvas, Size::new(40.0, 20.0), Size::new(40.0, 20.0))
                .expect("target");
        renderer.draw(&mut target).expect("draw");
    }
}
