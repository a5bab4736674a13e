use crate::error::ChartResult;

use super::{Canvas, Color, FillStyle, LineCap, LineJoin, TextAlign, TextMetrics};

/// One call received by a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    Scale { sx: f64, sy: f64 },
    SetLineWidth(f64),
    SetLineCap(LineCap),
    SetLineJoin(LineJoin),
    SetLineDash(Vec<f64>),
    SetStrokeColor(Color),
    SetFillStyle(FillStyle),
    SetFont(String),
    SetTextAlign(TextAlign),
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    BezierCurveTo {
        cp1x: f64,
        cp1y: f64,
        cp2x: f64,
        cp2y: f64,
        x: f64,
        y: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    },
    ClosePath,
    Stroke,
    Fill,
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillText { text: String, x: f64, y: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CanvasState {
    line_width: f64,
    font_size: f64,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            font_size: 10.0,
        }
    }
}

/// Headless canvas that records every call.
///
/// Text is measured with a fixed advance of `0.6 * font size` per character,
/// which keeps label geometry deterministic in tests and snapshots.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    state: CanvasState,
    saved: Vec<CanvasState>,
    measure_calls: usize,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|command| predicate(command)).count()
    }

    #[must_use]
    pub fn measure_calls(&self) -> usize {
        self.measure_calls
    }

    /// Drops recorded commands but keeps the drawing state.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

fn parse_font_size(font: &str) -> Option<f64> {
    font.split_whitespace()
        .find_map(|token| token.strip_suffix("px"))
        .and_then(|size| size.parse::<f64>().ok())
        .filter(|size| size.is_finite() && *size > 0.0)
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.saved.push(self.state);
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
        self.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.push(DrawCommand::Translate { dx, dy });
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.push(DrawCommand::Scale { sx, sy });
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
        self.push(DrawCommand::SetLineWidth(width));
    }

    fn line_width(&self) -> f64 {
        self.state.line_width
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.push(DrawCommand::SetLineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.push(DrawCommand::SetLineJoin(join));
    }

    fn set_line_dash(&mut self, segments: &[f64]) {
        self.push(DrawCommand::SetLineDash(segments.to_vec()));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.push(DrawCommand::SetStrokeColor(color));
    }

    fn set_fill_style(&mut self, style: FillStyle) {
        self.push(DrawCommand::SetFillStyle(style));
    }

    fn set_font(&mut self, font: &str) {
        if let Some(size) = parse_font_size(font) {
            self.state.font_size = size;
        }
        self.push(DrawCommand::SetFont(font.to_owned()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::SetTextAlign(align));
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push(DrawCommand::LineTo { x, y });
    }

    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.push(DrawCommand::BezierCurveTo {
            cp1x,
            cp1y,
            cp2x,
            cp2y,
            x,
            y,
        });
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.push(DrawCommand::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) -> ChartResult<()> {
        self.push(DrawCommand::Stroke);
        Ok(())
    }

    fn fill(&mut self) -> ChartResult<()> {
        self.push(DrawCommand::Fill);
        Ok(())
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> ChartResult<()> {
        self.push(DrawCommand::FillRect {
            x,
            y,
            width,
            height,
        });
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        self.push(DrawCommand::FillText {
            text: text.to_owned(),
            x,
            y,
        });
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> TextMetrics {
        self.measure_calls += 1;
        let size = self.state.font_size;
        TextMetrics {
            width: text.chars().count() as f64 * size * 0.6,
            actual_bounding_box_ascent: size * 0.7,
            actual_bounding_box_descent: size * 0.2,
        }
    }
}
