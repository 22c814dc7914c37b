//! Axis layout and rendering
//!
//! The vertical axis gets a tick mark, a signed value label, and a dashed
//! half-weight gridline for every tick above and below zero. The horizontal axis
//! is drawn along the zero line with unlabeled tick marks; category labels are
//! the series renderers' job.

use crate::config::ChartConfig;
use crate::geometry::{Point, Rect};
use crate::mapper::CoordinateMapper;
use crate::scale::format_tick_label;
use crate::surface::{DrawingSurface, StrokeStyle, TextAlign, TextStyle};

/// Half the length of a tick mark
const TICK_HALF_LENGTH: f64 = 3.0;
/// Gap between the vertical axis and the right edge of its labels
const LABEL_GAP: f64 = 4.0;
/// Offset from a tick to its label's baseline
const LABEL_BASELINE_OFFSET: f64 = 6.0;
const AXIS_LINE_WIDTH: f64 = 1.0;
const GRIDLINE_WIDTH: f64 = 0.5;
/// Offset of the vertical caption above and left of the plot's top-left corner
const VERTICAL_CAPTION_OFFSET: f64 = 20.0;
/// Distance from the zero line down to a category label's baseline
pub const CATEGORY_LABEL_OFFSET: f64 = 21.0;
pub const CATEGORY_LABEL_MAX_WIDTH: f64 = 40.0;

/// Anchor of the label centered under a category
pub(crate) fn category_label_anchor(mapper: &CoordinateMapper, category_index: usize) -> Point {
    Point::new(
        mapper.to_surface_x(category_index),
        mapper.scale().zero_line_y + CATEGORY_LABEL_OFFSET,
    )
}

pub(crate) fn category_label_style(config: &ChartConfig) -> TextStyle {
    TextStyle::new(
        TextAlign::Center,
        config.text_color,
        config.fonts.standard.clone(),
    )
    .with_max_width(CATEGORY_LABEL_MAX_WIDTH)
}

/// One vertical-axis tick
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTick {
    /// Signed steps from zero
    pub index: i64,
    pub y: f64,
    pub label: String,
}

/// Positions computed for both axes
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    pub plot: Rect,
    pub zero_line_y: f64,
    /// Ticks below zero, nearest to zero first
    pub negative_ticks: Vec<ValueTick>,
    /// Ticks above zero, nearest to zero first
    pub positive_ticks: Vec<ValueTick>,
    /// Surface x of each horizontal-axis tick mark
    pub category_ticks: Vec<f64>,
}

impl AxisLayout {
    /// Compute tick positions from the mapper's scale
    ///
    /// Horizontal ticks sit under each category center, or every `unit_x`
    /// pixels starting half a unit in when a fixed spacing is configured.
    pub fn calculate(mapper: &CoordinateMapper, category_count: usize, unit_x: Option<f64>) -> Self {
        let plot = mapper.plot();
        let scale = mapper.scale();

        let tick = |index: i64| ValueTick {
            index,
            y: scale.tick_y(index),
            label: format_tick_label(scale.tick_value(index)),
        };
        let negative_ticks = (1..=scale.negative_ticks as i64).map(|i| tick(-i)).collect();
        let positive_ticks = (1..=scale.positive_ticks as i64).map(tick).collect();

        let category_ticks = match unit_x {
            Some(unit) => {
                let mut ticks = Vec::new();
                let mut x = plot.x + unit / 2.0;
                while x < plot.right() {
                    ticks.push(x);
                    x += unit;
                }
                ticks
            }
            None => (0..category_count).map(|i| mapper.to_surface_x(i)).collect(),
        };

        Self {
            plot,
            zero_line_y: scale.zero_line_y,
            negative_ticks,
            positive_ticks,
            category_ticks,
        }
    }
}

/// Draws axes, gridlines, tick labels, and axis captions
pub struct AxisRenderer<'a> {
    config: &'a ChartConfig,
}

impl<'a> AxisRenderer<'a> {
    pub fn new(config: &'a ChartConfig) -> Self {
        Self { config }
    }

    pub fn draw(&self, surface: &mut dyn DrawingSurface, layout: &AxisLayout) {
        let plot = layout.plot;
        let axis_stroke = StrokeStyle::solid(AXIS_LINE_WIDTH, self.config.axis.color);
        let label_style = TextStyle::new(
            TextAlign::Right,
            self.config.text_color,
            self.config.fonts.standard.clone(),
        );

        surface.draw_line(
            Point::new(plot.x, plot.bottom()),
            Point::new(plot.x, plot.y),
            &axis_stroke,
        );

        for tick in &layout.negative_ticks {
            self.draw_value_tick(surface, plot, tick, &axis_stroke, &label_style);
        }

        surface.draw_line(
            Point::new(plot.x, layout.zero_line_y),
            Point::new(plot.right(), layout.zero_line_y),
            &axis_stroke,
        );
        for &x in &layout.category_ticks {
            surface.draw_line(
                Point::new(x, layout.zero_line_y - TICK_HALF_LENGTH),
                Point::new(x, layout.zero_line_y + TICK_HALF_LENGTH),
                &axis_stroke,
            );
        }
        surface.draw_text(
            Point::new(plot.x - LABEL_GAP, layout.zero_line_y + LABEL_BASELINE_OFFSET),
            "0",
            &label_style,
        );

        for tick in &layout.positive_ticks {
            self.draw_value_tick(surface, plot, tick, &axis_stroke, &label_style);
        }

        self.draw_captions(surface, plot);
    }

    fn draw_value_tick(
        &self,
        surface: &mut dyn DrawingSurface,
        plot: Rect,
        tick: &ValueTick,
        axis_stroke: &StrokeStyle,
        label_style: &TextStyle,
    ) {
        surface.draw_line(
            Point::new(plot.x - TICK_HALF_LENGTH, tick.y),
            Point::new(plot.x + TICK_HALF_LENGTH, tick.y),
            axis_stroke,
        );
        surface.draw_text(
            Point::new(plot.x - LABEL_GAP, tick.y + LABEL_BASELINE_OFFSET),
            &tick.label,
            label_style,
        );
        surface.draw_line(
            Point::new(plot.x + LABEL_GAP, tick.y),
            Point::new(plot.right(), tick.y),
            &StrokeStyle::dashed(GRIDLINE_WIDTH, self.config.axis.color),
        );
    }

    fn draw_captions(&self, surface: &mut dyn DrawingSurface, plot: Rect) {
        let style = TextStyle::new(
            TextAlign::Left,
            self.config.text_color,
            self.config.fonts.standard.clone(),
        );
        let axis = &self.config.axis;

        if !axis.horizontal_caption.is_empty() {
            surface.draw_text(
                Point::new(plot.right(), plot.bottom()),
                &axis.horizontal_caption,
                &style,
            );
        }
        if !axis.vertical_caption.is_empty() {
            surface.draw_text(
                Point::new(
                    plot.x - VERTICAL_CAPTION_OFFSET,
                    plot.y - VERTICAL_CAPTION_OFFSET,
                ),
                &axis.vertical_caption,
                &style,
            );
        }
    }
}
