//! Grouped bar chart layout and rendering

use crate::axis::{category_label_anchor, category_label_style};
use crate::config::ChartConfig;
use crate::dataset::ChartDataset;
use crate::geometry::{Point, Rect};
use crate::mapper::CoordinateMapper;
use crate::model::Color;
use crate::surface::{DrawingSurface, FillStyle};

/// Bars start this far off the zero line so they never overdraw the axis stroke
const ZERO_LINE_CLEARANCE: f64 = 0.5;

/// Layout for one bar
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    /// Anchored on the zero line; negative height grows upward
    pub bounds: Rect,
    pub series_index: usize,
    pub category_index: usize,
    pub value: f64,
    pub color: Color,
}

/// Layout for a whole bar chart body
#[derive(Debug, Clone, PartialEq)]
pub struct BarChartLayout {
    /// Bar width after any shrinking
    pub bar_width: f64,
    pub bars: Vec<BarLayout>,
    /// Category label anchors and texts
    pub labels: Vec<(Point, String)>,
}

impl BarChartLayout {
    /// Lay out every bar, grouped by category and centered in its slot
    ///
    /// When the configured width times the series count reaches the category
    /// interval, bars shrink to `interval / (series + 1)` so groups never touch.
    pub fn calculate(dataset: &ChartDataset, mapper: &CoordinateMapper, config: &ChartConfig) -> Self {
        let series_count = dataset.series_count();
        let interval = mapper.category_interval();
        let zero_line_y = mapper.scale().zero_line_y;

        let mut bar_width = config.bar.width;
        if bar_width * series_count as f64 >= interval {
            bar_width = interval / (series_count + 1) as f64;
            tracing::trace!(bar_width, interval, "shrunk bars to fit category slots");
        }
        let group_width = bar_width * series_count as f64;

        let mut bars = Vec::with_capacity(dataset.category_count() * series_count);
        let mut labels = Vec::with_capacity(dataset.category_count());

        for (category_index, row) in dataset.rows().iter().enumerate() {
            let group_left = mapper.to_surface_x(category_index) - group_width / 2.0;

            for (series_index, &value) in row.values.iter().enumerate() {
                let extent = mapper.extent_from_zero(value);
                let y = if extent < 0.0 {
                    zero_line_y - ZERO_LINE_CLEARANCE
                } else {
                    zero_line_y + ZERO_LINE_CLEARANCE
                };

                bars.push(BarLayout {
                    bounds: Rect::new(
                        group_left + bar_width * series_index as f64,
                        y,
                        bar_width,
                        extent,
                    ),
                    series_index,
                    category_index,
                    value,
                    color: config.palette.color(series_index),
                });
            }

            labels.push((category_label_anchor(mapper, category_index), row.label.clone()));
        }

        Self {
            bar_width,
            bars,
            labels,
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawingSurface, config: &ChartConfig) {
        for bar in &self.bars {
            surface.draw_filled_rect(
                bar.bounds,
                &FillStyle::new(bar.color, Some(config.bar.outline_color)),
            );
        }

        let label_style = category_label_style(config);
        for (at, text) in &self.labels {
            surface.draw_text(*at, text, &label_style);
        }
    }
}
