mod area;
mod canvas;
mod crosshair;
mod grid;
mod line;
mod price_axis_label;
mod primitives;
mod recording;
mod target;
mod text_width_cache;
mod walk_line;

pub use area::{AreaFillItem, AreaRenderer, AreaRendererData};
pub use canvas::{
    Canvas, TextMetrics, append_round_rect, draw_horizontal_line, draw_vertical_line,
    set_line_style, stroke_in_pixel,
};
pub use crosshair::{CrosshairLineData, CrosshairRenderer, CrosshairRendererData};
pub use grid::{GridRenderer, GridRendererData};
pub use line::{LineRenderer, LineRendererData, LineStrokeItem};
pub use price_axis_label::{
    BitmapLabelGeometry, LabelAlign, LabelGeometry, MediaLabelGeometry, PriceAxisViewRenderer,
    PriceAxisViewRendererCommonData, PriceAxisViewRendererData,
};
pub use primitives::{Color, FillStyle, LineCap, LineJoin, LineStyle, LineType, TextAlign};
pub use recording::{DrawCommand, RecordingCanvas};
pub use target::{BitmapScope, MediaScope, PaneRenderer, RenderingTarget};
pub use text_width_cache::TextWidthCache;
pub use walk_line::{LinePoint, get_control_points, walk_line};

#[cfg(feature = "cairo-backend")]
mod cairo_canvas;
#[cfg(feature = "cairo-backend")]
pub use cairo_canvas::CairoCanvas;
