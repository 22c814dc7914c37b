//! Line chart layout and rendering

use crate::axis::{category_label_anchor, category_label_style};
use crate::config::ChartConfig;
use crate::dataset::ChartDataset;
use crate::geometry::Point;
use crate::mapper::CoordinateMapper;
use crate::model::Color;
use crate::surface::{DrawingSurface, StrokeStyle, TextAlign, TextStyle};

/// Offset from the last point of a series to its name label
const END_LABEL_OFFSET_X: f64 = 5.0;
const END_LABEL_OFFSET_Y: f64 = 3.0;
const END_LABEL_MAX_WIDTH: f64 = 40.0;

/// One series polyline
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeriesLayout {
    pub series_index: usize,
    pub color: Color,
    /// One point per category, left to right
    pub points: Vec<Point>,
    /// Series name drawn just right of the last point
    pub end_label: Option<(Point, String)>,
}

/// Layout for a whole line chart body
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartLayout {
    pub series: Vec<LineSeriesLayout>,
    pub labels: Vec<(Point, String)>,
}

impl LineChartLayout {
    /// `series_names` label the end of each polyline; missing names leave it bare
    pub fn calculate(
        dataset: &ChartDataset,
        mapper: &CoordinateMapper,
        config: &ChartConfig,
        series_names: &[String],
    ) -> Self {
        let series = (0..dataset.series_count())
            .map(|series_index| {
                let points: Vec<Point> = dataset
                    .rows()
                    .iter()
                    .enumerate()
                    .map(|(category_index, row)| {
                        mapper.to_surface(category_index, row.values[series_index])
                    })
                    .collect();

                let end_label = points.last().zip(series_names.get(series_index)).map(|(last, name)| {
                    (
                        Point::new(last.x + END_LABEL_OFFSET_X, last.y + END_LABEL_OFFSET_Y),
                        name.clone(),
                    )
                });

                LineSeriesLayout {
                    series_index,
                    color: config.palette.color(series_index),
                    points,
                    end_label,
                }
            })
            .collect();

        let labels = dataset
            .rows()
            .iter()
            .enumerate()
            .map(|(category_index, row)| (category_label_anchor(mapper, category_index), row.label.clone()))
            .collect();

        Self { series, labels }
    }

    /// Number of line segments the chart draws
    pub fn segment_count(&self) -> usize {
        self.series
            .iter()
            .map(|s| s.points.len().saturating_sub(1))
            .sum()
    }

    /// Draw category by category: every series' marker and outgoing segment, then
    /// the category label
    pub fn draw(&self, surface: &mut dyn DrawingSurface, config: &ChartConfig) {
        let end_label_style = TextStyle::new(
            TextAlign::Left,
            config.line.label_color,
            config.fonts.small.clone(),
        )
        .with_max_width(END_LABEL_MAX_WIDTH);
        let category_style = category_label_style(config);

        for (category_index, (label_at, label)) in self.labels.iter().enumerate() {
            for series in &self.series {
                let Some(&point) = series.points.get(category_index) else {
                    continue;
                };
                surface.draw_filled_circle(point, config.line.marker_radius, series.color);

                match series.points.get(category_index + 1) {
                    Some(&next) => surface.draw_line(
                        point,
                        next,
                        &StrokeStyle::solid(config.line.line_width, series.color),
                    ),
                    None => {
                        if let Some((at, name)) = &series.end_label {
                            surface.draw_text(*at, name, &end_label_style);
                        }
                    }
                }
            }

            surface.draw_text(*label_at, label, &category_style);
        }
    }
}
