use crate::config::PriceAxisRendererOptions;
use crate::error::ChartResult;

use super::{
    Color, FillStyle, RenderingTarget, TextAlign, TextWidthCache, append_round_rect,
};

/// Which side of the axis the pane is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    /// Pane to the right; text hugs the right edge (left price axis).
    Right,
    /// Pane to the left; text hugs the left edge (right price axis).
    Left,
}

/// Values shared by the axis label and its pane-side twin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PriceAxisViewRendererCommonData {
    pub coordinate: f64,
    /// Overrides `coordinate` once label collision layout has run.
    pub fixed_coordinate: Option<f64>,
    pub background: Color,
    pub color: Color,
    pub additional_padding_top: f64,
    pub additional_padding_bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceAxisViewRendererData {
    pub visible: bool,
    pub text: String,
    pub tick_visible: bool,
    pub move_text_to_invisible_tick: bool,
    pub separator_visible: bool,
}

/// Label box snapped to device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitmapLabelGeometry {
    pub y_top: f64,
    pub y_mid: f64,
    pub y_bottom: f64,
    pub total_width: f64,
    pub total_height: f64,
    pub radius: f64,
    pub horz_border: f64,
    pub x_outside: f64,
    pub x_inside: f64,
    pub x_tick: f64,
    pub tick_height: f64,
    pub right: f64,
}

/// Bitmap extents divided back into CSS pixels, plus the text anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaLabelGeometry {
    pub y_top: f64,
    pub y_bottom: f64,
    pub x_outside: f64,
    pub x_inside: f64,
    pub x_text: f64,
    pub text_mid_correction: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGeometry {
    pub align_right: bool,
    pub bitmap: BitmapLabelGeometry,
    pub media: MediaLabelGeometry,
}

#[derive(Debug, Default)]
pub struct PriceAxisViewRenderer {
    data: PriceAxisViewRendererData,
    common: PriceAxisViewRendererCommonData,
}

impl PriceAxisViewRenderer {
    #[must_use]
    pub fn new(data: PriceAxisViewRendererData, common: PriceAxisViewRendererCommonData) -> Self {
        Self { data, common }
    }

    pub fn set_data(
        &mut self,
        data: PriceAxisViewRendererData,
        common: PriceAxisViewRendererCommonData,
    ) {
        self.data = data;
        self.common = common;
    }

    #[must_use]
    pub fn data(&self) -> &PriceAxisViewRendererData {
        &self.data
    }

    /// Label height in CSS pixels, used by collision layout.
    #[must_use]
    pub fn height(&self, options: &PriceAxisRendererOptions) -> f64 {
        if !self.data.visible {
            return 0.0;
        }
        options.font_size
            + options.padding_top
            + options.padding_bottom
            + self.common.additional_padding_top
            + self.common.additional_padding_bottom
    }

    pub fn calculate_geometry(
        &self,
        target: &mut RenderingTarget<'_>,
        options: &PriceAxisRendererOptions,
        cache: &mut TextWidthCache,
        align: LabelAlign,
    ) -> LabelGeometry {
        let hpr = target.horizontal_pixel_ratio();
        let vpr = target.vertical_pixel_ratio();
        let media_size = target.media_size();
        let bitmap_size = target.bitmap_size();

        let tick_size = if self.data.tick_visible || !self.data.move_text_to_invisible_tick {
            options.tick_length
        } else {
            0.0
        };
        let horz_border = if self.data.separator_visible {
            options.border_size
        } else {
            0.0
        };
        let padding_top = options.padding_top + self.common.additional_padding_top;
        let padding_bottom = options.padding_bottom + self.common.additional_padding_bottom;

        let canvas = target.canvas();
        cache.set_font(canvas, &options.font());
        let text_mid_correction = cache.y_mid_correction(canvas, &self.data.text);
        let text_width = cache.measure_text(canvas, &self.data.text).ceil();

        let total_height = options.font_size + padding_top + padding_bottom;
        let total_width = options.border_size
            + options.padding_inner
            + options.padding_outer
            + text_width
            + tick_size;

        let tick_height = vpr.floor().max(1.0);
        let mut total_height_bitmap = (total_height * vpr).round();
        // Same parity as the tick keeps the tick vertically centered.
        if total_height_bitmap % 2.0 != tick_height % 2.0 {
            total_height_bitmap += 1.0;
        }
        let horz_border_bitmap = if horz_border > 0.0 {
            (horz_border * hpr).floor().max(1.0)
        } else {
            0.0
        };
        let total_width_bitmap = (total_width * hpr).round();
        let tick_size_bitmap = (tick_size * hpr).round();

        let y_mid = self.common.fixed_coordinate.unwrap_or(self.common.coordinate);
        let y_mid_bitmap = (y_mid * vpr).round() - (vpr * 0.5).floor();
        let y_top_bitmap = (y_mid_bitmap + tick_height / 2.0 - total_height_bitmap / 2.0).floor();
        let y_bottom_bitmap = y_top_bitmap + total_height_bitmap;

        let align_right = align == LabelAlign::Right;
        let (x_inside, x_inside_bitmap) = if align_right {
            (
                media_size.width - horz_border,
                bitmap_size.width - horz_border_bitmap,
            )
        } else {
            (horz_border, horz_border_bitmap)
        };
        let (x_outside_bitmap, x_tick_bitmap, x_text) = if align_right {
            (
                x_inside_bitmap - total_width_bitmap,
                x_inside_bitmap - tick_size_bitmap,
                x_inside - tick_size - options.padding_inner - horz_border,
            )
        } else {
            (
                x_inside_bitmap + total_width_bitmap,
                x_inside_bitmap + tick_size_bitmap,
                x_inside + horz_border + tick_size + options.padding_inner,
            )
        };

        LabelGeometry {
            align_right,
            bitmap: BitmapLabelGeometry {
                y_top: y_top_bitmap,
                y_mid: y_mid_bitmap,
                y_bottom: y_bottom_bitmap,
                total_width: total_width_bitmap,
                total_height: total_height_bitmap,
                radius: 2.0 * hpr,
                horz_border: horz_border_bitmap,
                x_outside: x_outside_bitmap,
                x_inside: x_inside_bitmap,
                x_tick: x_tick_bitmap,
                tick_height,
                right: bitmap_size.width,
            },
            media: MediaLabelGeometry {
                y_top: y_top_bitmap / vpr,
                y_bottom: y_bottom_bitmap / vpr,
                x_outside: x_outside_bitmap / hpr,
                x_inside: x_inside_bitmap / hpr,
                x_text,
                text_mid_correction,
            },
        }
    }

    pub fn draw(
        &self,
        target: &mut RenderingTarget<'_>,
        options: &PriceAxisRendererOptions,
        cache: &mut TextWidthCache,
        align: LabelAlign,
    ) -> ChartResult<()> {
        if !self.data.visible || self.data.text.is_empty() {
            return Ok(());
        }
        let geometry = self.calculate_geometry(target, options, cache, align);
        let bitmap = geometry.bitmap;
        let common = self.common;

        target.use_bitmap_coordinate_space(|scope| {
            let canvas = &mut *scope.context;
            let (body_left, body_right) = if geometry.align_right {
                (bitmap.x_outside, bitmap.x_tick)
            } else {
                (bitmap.x_tick, bitmap.x_outside)
            };
            let radii = if geometry.align_right {
                [bitmap.radius, 0.0, 0.0, bitmap.radius]
            } else {
                [0.0, bitmap.radius, bitmap.radius, 0.0]
            };

            canvas.set_fill_style(FillStyle::Solid(common.background));
            canvas.begin_path();
            append_round_rect(
                canvas,
                body_left,
                bitmap.y_top,
                body_right - body_left,
                bitmap.total_height,
                radii,
            );
            canvas.fill()?;

            if self.data.tick_visible {
                let tick_left = bitmap.x_inside.min(bitmap.x_tick);
                canvas.fill_rect(
                    tick_left,
                    bitmap.y_mid,
                    (bitmap.x_tick - bitmap.x_inside).abs(),
                    bitmap.tick_height,
                )?;
            }

            if bitmap.horz_border > 0.0 {
                let border_left = if geometry.align_right {
                    bitmap.right - bitmap.horz_border
                } else {
                    0.0
                };
                canvas.set_fill_style(FillStyle::Solid(options.pane_background_color));
                canvas.fill_rect(
                    border_left,
                    bitmap.y_top,
                    bitmap.horz_border,
                    bitmap.y_bottom - bitmap.y_top,
                )?;
            }
            Ok::<(), crate::error::ChartError>(())
        })?;

        let media = geometry.media;
        target.use_media_coordinate_space(|scope| {
            let canvas = &mut *scope.context;
            canvas.set_font(&options.font());
            canvas.set_text_align(if geometry.align_right {
                TextAlign::Right
            } else {
                TextAlign::Left
            });
            canvas.set_fill_style(FillStyle::Solid(common.color));
            canvas.fill_text(
                &self.data.text,
                media.x_text,
                (media.y_top + media.y_bottom) / 2.0 + media.text_mid_correction,
            )
        })
    }
}
