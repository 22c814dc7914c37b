//! Chart configuration
//!
//! A [`ChartConfig`] is built once and read by every draw. Per-call tweaks are
//! expressed as a [`ChartOverrides`] value and resolved with
//! [`ChartConfig::merged`] before layout begins, so nothing is mutated mid-draw.
//!
//! Every section is `#[serde(default)]`: a partial JSON document fills the
//! missing fields with defaults.

use crate::error::{ChartError, ChartResult};
use crate::model::{ChartTitle, Color, Font, Palette};
use crate::scale::UnitStrategy;
use serde::{Deserialize, Serialize};

/// Offsets between the surface edges and the plot rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl Margins {
    pub const fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Same offset on all four sides
    pub const fn uniform(offset: f64) -> Self {
        Self::new(offset, offset, offset, offset)
    }

    fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("top", self.top),
            ("bottom", self.bottom),
            ("left", self.left),
            ("right", self.right),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} margin must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(50.0)
    }
}

/// Axis units, scaling, and captions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Color of axis lines, tick marks, and gridlines
    pub color: Color,
    /// Fixed pixel spacing of horizontal-axis ticks; `None` puts one tick under each category
    pub unit_x: Option<f64>,
    /// Value-space distance represented by one vertical tick
    pub unit_y: f64,
    /// Replace `unit_y` when the data range spans more than ten units
    pub auto_scale: bool,
    /// How the replacement unit is chosen
    pub unit_strategy: UnitStrategy,
    /// Caption drawn at the right end of the horizontal axis
    pub horizontal_caption: String,
    /// Caption drawn above the vertical axis
    pub vertical_caption: String,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            unit_x: None,
            unit_y: 50.0,
            auto_scale: true,
            unit_strategy: UnitStrategy::DigitLength,
            horizontal_caption: String::new(),
            vertical_caption: String::new(),
        }
    }
}

/// Fonts used for labels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fonts {
    /// Axis labels, category labels, pie labels, and the title
    pub standard: Font,
    /// Legend text and line-end labels
    pub small: Font,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            standard: Font::new(18.0, "sans-serif"),
            small: Font::new(10.0, "sans-serif"),
        }
    }
}

/// Legend strip geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    /// Width of one legend cell
    pub cell_width: f64,
    /// Side of the square color swatch
    pub swatch_size: f64,
    /// Height of the strip's bounding box
    pub height: f64,
    /// Gap between the strip and the surface's right edge
    pub edge_gap: f64,
    /// Distance from the surface's bottom edge to the strip's top edge
    pub bottom_offset: f64,
    /// Maximum rendered width of a label
    pub label_max_width: f64,
    pub text_color: Color,
    pub box_color: Color,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            cell_width: 60.0,
            swatch_size: 12.0,
            height: 30.0,
            edge_gap: 10.0,
            bottom_offset: 40.0,
            label_max_width: 50.0,
            text_color: Color::BLACK,
            box_color: Color::BLACK,
        }
    }
}

/// Bar chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Preferred bar width; shrunk when a group would overflow its category slot
    pub width: f64,
    pub outline_color: Color,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            outline_color: Color::BLACK,
        }
    }
}

/// Line chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub marker_radius: f64,
    pub line_width: f64,
    /// Color of the series name drawn after the last point
    pub label_color: Color,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            marker_radius: 2.0,
            line_width: 1.0,
            label_color: Color::BLACK,
        }
    }
}

/// Pie chart settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieConfig {
    /// Pie radius as a fraction of the surface's shorter side
    pub radius_ratio: f64,
    /// Label distance from the center as a fraction of the radius
    pub label_radius_ratio: f64,
    /// Slices at or below this fraction of the total get no label
    pub min_label_fraction: f64,
    pub label_background: Color,
}

impl Default for PieConfig {
    fn default() -> Self {
        Self {
            radius_ratio: 0.35,
            label_radius_ratio: 0.7,
            min_label_fraction: 0.01,
            label_background: Color::WHITE,
        }
    }
}

/// Complete, immutable chart configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub margins: Margins,
    pub axis: AxisConfig,
    pub palette: Palette,
    pub fonts: Fonts,
    pub text_color: Color,
    pub title: ChartTitle,
    pub legend: LegendConfig,
    pub bar: BarConfig,
    pub line: LineConfig,
    pub pie: PieConfig,
}

impl ChartConfig {
    /// Parse a (possibly partial) JSON configuration and validate it
    pub fn from_json(json: &str) -> ChartResult<Self> {
        let config: ChartConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_title(mut self, title: ChartTitle) -> Self {
        self.title = title;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Resolve per-call overrides into a new validated configuration
    pub fn merged(&self, overrides: &ChartOverrides) -> ChartResult<Self> {
        let mut config = self.clone();
        if let Some(margins) = overrides.margins {
            config.margins = margins;
        }
        if let Some(unit_x) = overrides.unit_x {
            config.axis.unit_x = Some(unit_x);
        }
        if let Some(unit_y) = overrides.unit_y {
            config.axis.unit_y = unit_y;
        }
        if let Some(auto_scale) = overrides.auto_scale {
            config.axis.auto_scale = auto_scale;
        }
        if let Some(strategy) = overrides.unit_strategy {
            config.axis.unit_strategy = strategy;
        }
        if let Some(color) = overrides.axis_color {
            config.axis.color = color;
        }
        if let Some(ref palette) = overrides.palette {
            config.palette = palette.clone();
        }
        if let Some(color) = overrides.text_color {
            config.text_color = color;
        }
        if let Some(ref title) = overrides.title {
            config.title = title.clone();
        }
        if let Some(width) = overrides.bar_width {
            config.bar.width = width;
        }
        if let Some(ratio) = overrides.pie_label_radius_ratio {
            config.pie.label_radius_ratio = ratio;
        }
        if let Some(fraction) = overrides.pie_min_label_fraction {
            config.pie.min_label_fraction = fraction;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check every field that layout depends on
    pub fn validate(&self) -> ChartResult<()> {
        self.margins.validate()?;

        if !(self.axis.unit_y.is_finite() && self.axis.unit_y > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "unit_y must be positive, got {}",
                self.axis.unit_y
            )));
        }
        if let Some(unit_x) = self.axis.unit_x {
            if !(unit_x.is_finite() && unit_x > 0.0) {
                return Err(ChartError::InvalidConfig(format!(
                    "unit_x must be positive, got {unit_x}"
                )));
            }
        }
        if self.palette.is_empty() {
            return Err(ChartError::InvalidConfig("palette has no colors".to_string()));
        }
        if !(self.bar.width.is_finite() && self.bar.width > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "bar width must be positive, got {}",
                self.bar.width
            )));
        }
        if !(self.legend.cell_width.is_finite() && self.legend.cell_width > 0.0) {
            return Err(ChartError::InvalidConfig(format!(
                "legend cell width must be positive, got {}",
                self.legend.cell_width
            )));
        }
        for (name, ratio) in [
            ("pie radius ratio", self.pie.radius_ratio),
            ("pie label radius ratio", self.pie.label_radius_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be in (0, 1], got {ratio}"
                )));
            }
        }
        if !(0.0..1.0).contains(&self.pie.min_label_fraction) {
            return Err(ChartError::InvalidConfig(format!(
                "pie minimum label fraction must be in [0, 1), got {}",
                self.pie.min_label_fraction
            )));
        }
        Ok(())
    }
}

/// Optional per-call overrides, merged over a [`ChartConfig`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOverrides {
    pub margins: Option<Margins>,
    pub unit_x: Option<f64>,
    pub unit_y: Option<f64>,
    pub auto_scale: Option<bool>,
    pub unit_strategy: Option<UnitStrategy>,
    pub axis_color: Option<Color>,
    pub palette: Option<Palette>,
    pub text_color: Option<Color>,
    pub title: Option<ChartTitle>,
    pub bar_width: Option<f64>,
    pub pie_label_radius_ratio: Option<f64>,
    pub pie_min_label_fraction: Option<f64>,
}
