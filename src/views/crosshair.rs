use crate::config::{CrosshairLineOptions, CrosshairOptions};
use crate::core::Point;
use crate::render::{CrosshairLineData, CrosshairRenderer, CrosshairRendererData};

/// Current crosshair position in pane media coordinates.
pub trait CrosshairSource {
    /// `None` while the pointer is outside the pane.
    fn crosshair_position(&self) -> Option<Point>;
}

#[derive(Debug)]
pub struct CrosshairPaneView {
    options: CrosshairOptions,
    renderer: CrosshairRenderer,
    invalidated: bool,
}

impl CrosshairPaneView {
    #[must_use]
    pub fn new(options: CrosshairOptions) -> Self {
        Self {
            options,
            renderer: CrosshairRenderer::new(),
            invalidated: true,
        }
    }

    pub fn update(&mut self) {
        self.invalidated = true;
    }

    pub fn apply_options(&mut self, options: CrosshairOptions) {
        self.options = options;
        self.invalidated = true;
    }

    pub fn renderer(&mut self, source: &impl CrosshairSource) -> &CrosshairRenderer {
        if self.invalidated {
            let data = match source.crosshair_position() {
                Some(position) => CrosshairRendererData {
                    vert_line: line_data(&self.options.vert_line),
                    horz_line: line_data(&self.options.horz_line),
                    x: position.x,
                    y: position.y,
                },
                None => CrosshairRendererData {
                    x: -1.0,
                    y: -1.0,
                    ..CrosshairRendererData::default()
                },
            };
            self.renderer.set_data(Some(data));
            self.invalidated = false;
        }
        &self.renderer
    }
}

fn line_data(options: &CrosshairLineOptions) -> CrosshairLineData {
    CrosshairLineData {
        visible: options.visible,
        line_width: options.width,
        color: options.color,
        line_style: options.style,
    }
}
