use tracing::trace;

use crate::config::GridOptions;
use crate::core::{PriceMark, TimeMark};
use crate::render::GridRenderer;

/// Marks of the external time and price scales for one pane.
pub trait MarksSource {
    fn time_marks(&self) -> &[TimeMark];
    fn price_marks(&self) -> &[PriceMark];
}

#[derive(Debug)]
pub struct GridPaneView {
    options: GridOptions,
    renderer: GridRenderer,
    invalidated: bool,
}

impl GridPaneView {
    #[must_use]
    pub fn new(options: GridOptions) -> Self {
        Self {
            options,
            renderer: GridRenderer::new(),
            invalidated: true,
        }
    }

    pub fn update(&mut self) {
        self.invalidated = true;
    }

    pub fn apply_options(&mut self, options: GridOptions) {
        self.options = options;
        self.invalidated = true;
    }

    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    pub fn renderer(&mut self, source: &impl MarksSource) -> &GridRenderer {
        if self.invalidated {
            let options = self.options;
            let data = self.renderer.data_mut();
            data.vert_lines_visible = options.vert_lines.visible;
            data.horz_lines_visible = options.horz_lines.visible;
            data.vert_lines_color = options.vert_lines.color;
            data.horz_lines_color = options.horz_lines.color;
            data.vert_line_style = options.vert_lines.style;
            data.horz_line_style = options.horz_lines.style;
            data.set_marks(source.time_marks(), source.price_marks());
            trace!(
                time_marks = data.time_marks.len(),
                price_marks = data.price_marks.len(),
                "grid renderer data rebuilt"
            );
            self.invalidated = false;
        }
        &self.renderer
    }
}
