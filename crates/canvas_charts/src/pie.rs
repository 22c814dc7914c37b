//! Pie chart layout and rendering
//!
//! Slices take the first value of every row, start at 12 o'clock, and run
//! clockwise. Each slice whose share exceeds the configured minimum gets its
//! value printed on a white box inside the wedge.

use crate::config::ChartConfig;
use crate::dataset::ChartDataset;
use crate::error::{ChartError, ChartResult};
use crate::geometry::{Point, Rect, SurfaceSize};
use crate::mapper::PolarMapper;
use crate::model::Color;
use crate::scale::format_tick_label;
use crate::surface::{DrawingSurface, FillStyle, TextAlign, TextStyle};
use std::f64::consts::TAU;

const LABEL_BOX_WIDTH: f64 = 36.0;
const LABEL_BOX_HEIGHT: f64 = 18.0;
/// Baseline of the value text below the top of its box
const LABEL_BASELINE_OFFSET: f64 = 16.0;
const LABEL_MAX_WIDTH: f64 = 50.0;

/// Value label inside a slice
#[derive(Debug, Clone, PartialEq)]
pub struct PieLabelLayout {
    pub background: Rect,
    pub anchor: Point,
    pub text: String,
}

/// Layout for one slice
#[derive(Debug, Clone, PartialEq)]
pub struct PieSliceLayout {
    pub index: usize,
    pub value: f64,
    /// Share of the total
    pub fraction: f64,
    /// Clockwise from 12 o'clock, in radians
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: Color,
    pub label: Option<PieLabelLayout>,
}

impl PieSliceLayout {
    /// Angle bisecting the slice
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }
}

/// Layout for a whole pie
#[derive(Debug, Clone, PartialEq)]
pub struct PieChartLayout {
    pub polar: PolarMapper,
    pub total: f64,
    pub slices: Vec<PieSliceLayout>,
}

impl PieChartLayout {
    /// Lay out one slice per row of `dataset`, centered on the surface
    ///
    /// Fails when the first-series values do not add up to a positive total.
    pub fn calculate(dataset: &ChartDataset, size: SurfaceSize, config: &ChartConfig) -> ChartResult<Self> {
        let total: f64 = dataset.first_series().sum();
        if total <= 0.0 || !total.is_finite() {
            return Err(ChartError::InvalidDataset(format!(
                "pie values must add up to a positive total, got {total}"
            )));
        }

        let polar = PolarMapper::new(
            Point::new(size.width / 2.0, size.height / 2.0),
            size.width.min(size.height) * config.pie.radius_ratio,
        );

        let mut start_angle = 0.0;
        let slices = dataset
            .first_series()
            .enumerate()
            .map(|(index, value)| {
                let fraction = value / total;
                let end_angle = start_angle + TAU * fraction;

                let label = (fraction > config.pie.min_label_fraction).then(|| {
                    let at = polar.point_at(start_angle + TAU * fraction / 2.0, config.pie.label_radius_ratio);
                    PieLabelLayout {
                        background: Rect::new(
                            at.x - LABEL_BOX_WIDTH / 2.0,
                            at.y,
                            LABEL_BOX_WIDTH,
                            LABEL_BOX_HEIGHT,
                        ),
                        anchor: Point::new(at.x, at.y + LABEL_BASELINE_OFFSET),
                        text: format_tick_label(value),
                    }
                });

                let slice = PieSliceLayout {
                    index,
                    value,
                    fraction,
                    start_angle,
                    end_angle,
                    color: config.palette.color(index),
                    label,
                };
                start_angle = end_angle;
                slice
            })
            .collect();

        Ok(Self {
            polar,
            total,
            slices,
        })
    }

    /// Draw every wedge and its label in slice order
    pub fn draw(&self, surface: &mut dyn DrawingSurface, config: &ChartConfig) {
        let label_style = TextStyle::new(
            TextAlign::Center,
            config.text_color,
            config.fonts.standard.clone(),
        )
        .with_max_width(LABEL_MAX_WIDTH);
        let label_fill = FillStyle::new(config.pie.label_background, None);

        for slice in &self.slices {
            surface.draw_filled_arc(
                self.polar.center,
                self.polar.radius,
                self.polar.to_surface_angle(slice.start_angle),
                self.polar.to_surface_angle(slice.end_angle),
                slice.color,
            );

            if let Some(label) = &slice.label {
                surface.draw_filled_rect(label.background, &label_fill);
                surface.draw_text(label.anchor, &label.text, &label_style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChartRow;
    use crate::surface::{CommandRecorder, DrawCommand};
    use proptest::prelude::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn dataset(values: &[f64]) -> ChartDataset {
        let rows: Vec<ChartRow> = values
            .iter()
            .enumerate()
            .map(|(i, v)| ChartRow::new(format!("S{i}"), vec![*v]))
            .collect();
        ChartDataset::validate(&rows).unwrap()
    }

    fn size() -> SurfaceSize {
        SurfaceSize::new(400.0, 300.0)
    }

    #[test]
    fn test_fractions_and_angles() {
        let layout = PieChartLayout::calculate(&dataset(&[1.0, 1.0, 2.0]), size(), &ChartConfig::default()).unwrap();

        let fractions: Vec<f64> = layout.slices.iter().map(|s| s.fraction).collect();
        assert_eq!(fractions, vec![0.25, 0.25, 0.5]);

        let expected = [(0.0, FRAC_PI_2), (FRAC_PI_2, PI), (PI, TAU)];
        for (slice, (start, end)) in layout.slices.iter().zip(expected) {
            assert!((slice.start_angle - start).abs() < 1e-12);
            assert!((slice.end_angle - end).abs() < 1e-12);
        }
    }

    #[test]
    fn test_center_and_radius() {
        let layout = PieChartLayout::calculate(&dataset(&[3.0]), size(), &ChartConfig::default()).unwrap();

        assert_eq!(layout.polar.center, Point::new(200.0, 150.0));
        assert!((layout.polar.radius - 105.0).abs() < 1e-9);
    }

    #[test]
    fn test_label_placed_on_bisector() {
        let layout = PieChartLayout::calculate(&dataset(&[1.0, 1.0]), size(), &ChartConfig::default()).unwrap();

        // First slice bisects at 3 o'clock; label 0.7 of the radius out
        let label = layout.slices[0].label.clone().unwrap();
        let distance = 105.0 * 0.7;
        assert!((label.background.x - (200.0 + distance - 18.0)).abs() < 1e-9);
        assert!((label.background.y - 150.0).abs() < 1e-9);
        assert!((label.anchor.y - 166.0).abs() < 1e-9);
        assert_eq!(label.text, "1");
        assert!((layout.slices[0].mid_angle() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_small_slices_unlabeled() {
        let layout = PieChartLayout::calculate(&dataset(&[999.0, 1.0]), size(), &ChartConfig::default()).unwrap();

        assert!(layout.slices[0].label.is_some());
        // 0.001 of the total is under the 0.01 threshold
        assert!(layout.slices[1].label.is_none());
    }

    #[test]
    fn test_non_positive_total_rejected() {
        let config = ChartConfig::default();

        for values in [&[0.0, 0.0][..], &[-1.0, 0.5][..]] {
            let err = PieChartLayout::calculate(&dataset(values), size(), &config).unwrap_err();
            assert!(matches!(err, ChartError::InvalidDataset(_)));
        }
    }

    #[test]
    fn test_draw_rotates_arcs_to_twelve_o_clock() {
        let config = ChartConfig::default();
        let layout = PieChartLayout::calculate(&dataset(&[1.0, 3.0]), size(), &config).unwrap();
        let mut recorder = CommandRecorder::new(400.0, 300.0);

        layout.draw(&mut recorder, &config);

        let arcs: Vec<(f64, f64)> = recorder
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Arc {
                    start_angle,
                    end_angle,
                    ..
                } => Some((*start_angle, *end_angle)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 2);
        assert!((arcs[0].0 + FRAC_PI_2).abs() < 1e-12);
        assert!((arcs[0].1 - 0.0).abs() < 1e-12);
        assert!((arcs[1].1 - (TAU - FRAC_PI_2)).abs() < 1e-12);

        // Arc, box, text per labeled slice
        assert_eq!(recorder.len(), 6);
        assert!(matches!(
            &recorder.commands()[1],
            DrawCommand::FilledRect { style, .. } if style.fill == Color::WHITE && style.stroke.is_none()
        ));
    }

    proptest! {
        #[test]
        fn prop_fractions_cover_full_turn(values in prop::collection::vec(0.01f64..1_000.0, 1..12)) {
            let layout = PieChartLayout::calculate(&dataset(&values), size(), &ChartConfig::default()).unwrap();

            let sum: f64 = layout.slices.iter().map(|s| s.fraction).sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);

            let last = layout.slices.last().unwrap();
            prop_assert!((last.end_angle - TAU).abs() < 1e-9);

            for pair in layout.slices.windows(2) {
                prop_assert_eq!(pair[0].end_angle, pair[1].start_angle);
            }
        }
    }
}
