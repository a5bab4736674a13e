//! Serializable option groups consumed by the time behavior and the renderers.
//!
//! Every group uses `#[serde(default)]`, so a partial JSON document only
//! overrides the fields it names. Callback hooks (tick-mark and time
//! formatters) are not serializable and are attached to the behavior directly.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::horz_scale::DEFAULT_DATE_FORMAT;
use crate::render::{Color, LineStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeScaleLabelOptions {
    pub time_visible: bool,
    pub seconds_visible: bool,
}

impl Default for TimeScaleLabelOptions {
    fn default() -> Self {
        Self {
            time_visible: false,
            seconds_visible: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationOptions {
    pub locale: String,
    pub date_format: String,
}

impl Default for LocalizationOptions {
    fn default() -> Self {
        Self {
            locale: "en-US".to_owned(),
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLineOptions {
    pub visible: bool,
    pub color: Color,
    pub style: LineStyle,
}

impl Default for GridLineOptions {
    fn default() -> Self {
        Self {
            visible: true,
            color: Color::from_rgb8(0xd6, 0xdc, 0xde),
            style: LineStyle::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridOptions {
    pub vert_lines: GridLineOptions,
    pub horz_lines: GridLineOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairLineOptions {
    pub visible: bool,
    pub color: Color,
    pub width: f64,
    pub style: LineStyle,
}

impl Default for CrosshairLineOptions {
    fn default() -> Self {
        Self {
            visible: true,
            color: Color::from_rgb8(0x9b, 0x7d, 0xff),
            width: 1.0,
            style: LineStyle::LargeDashed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrosshairOptions {
    pub vert_line: CrosshairLineOptions,
    pub horz_line: CrosshairLineOptions,
}

/// Metrics shared by every price-axis label on one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceAxisRendererOptions {
    pub font_family: String,
    pub font_size: f64,
    pub border_size: f64,
    pub tick_length: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub padding_inner: f64,
    pub padding_outer: f64,
    pub pane_background_color: Color,
}

impl Default for PriceAxisRendererOptions {
    fn default() -> Self {
        Self {
            font_family: "Sans".to_owned(),
            font_size: 12.0,
            border_size: 1.0,
            tick_length: 5.0,
            padding_top: 2.5,
            padding_bottom: 2.5,
            padding_inner: 5.0,
            padding_outer: 5.0,
            pane_background_color: Color::rgb(1.0, 1.0, 1.0),
        }
    }
}

impl PriceAxisRendererOptions {
    #[must_use]
    pub fn font(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub time_scale: TimeScaleLabelOptions,
    pub localization: LocalizationOptions,
    pub grid: GridOptions,
    pub crosshair: CrosshairOptions,
    pub price_axis_label: PriceAxisRendererOptions,
}

impl ChartOptions {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let options: Self = serde_json::from_str(input)?;
        options.validate()?;
        Ok(options)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.grid.vert_lines.color,
            self.grid.horz_lines.color,
            self.crosshair.vert_line.color,
            self.crosshair.horz_line.color,
            self.price_axis_label.pane_background_color,
        ] {
            color.validate()?;
        }
        for (name, width) in [
            ("crosshair.vert_line.width", self.crosshair.vert_line.width),
            ("crosshair.horz_line.width", self.crosshair.horz_line.width),
        ] {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        let label = &self.price_axis_label;
        for (name, value) in [
            ("price_axis_label.font_size", label.font_size),
            ("price_axis_label.border_size", label.border_size),
            ("price_axis_label.tick_length", label.tick_length),
            ("price_axis_label.padding_top", label.padding_top),
            ("price_axis_label.padding_bottom", label.padding_bottom),
            ("price_axis_label.padding_inner", label.padding_inner),
            ("price_axis_label.padding_outer", label.padding_outer),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if label.font_size == 0.0 {
            return Err(ChartError::InvalidConfig(
                "`price_axis_label.font_size` must be > 0".to_owned(),
            ));
        }
        if self.localization.date_format.is_empty() {
            return Err(ChartError::InvalidConfig(
                "`localization.date_format` must not be empty".to_owned(),
            ));
        }
        Ok(())
    }
}
