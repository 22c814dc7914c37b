//! Data-space to surface-space mapping
//!
//! Charts reason with a bottom-left origin (larger values are higher), while the
//! surface has a top-left origin. [`CoordinateMapper`] is the only place that
//! inversion happens; renderers work with the surface coordinates it returns.

use crate::geometry::{Point, Rect};
use crate::scale::AxisScale;
use std::f64::consts::FRAC_PI_2;

/// Maps category indices and values onto the plot rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    plot: Rect,
    category_interval: f64,
    scale: AxisScale,
}

impl CoordinateMapper {
    /// `category_count` is clamped to at least one slot
    pub fn new(plot: Rect, category_count: usize, scale: AxisScale) -> Self {
        Self {
            plot,
            category_interval: plot.width / category_count.max(1) as f64,
            scale,
        }
    }

    pub fn plot(&self) -> Rect {
        self.plot
    }

    pub fn scale(&self) -> &AxisScale {
        &self.scale
    }

    /// Width of one category slot
    pub fn category_interval(&self) -> f64 {
        self.category_interval
    }

    /// Surface x of a category's center
    pub fn to_surface_x(&self, category_index: usize) -> f64 {
        self.plot.x + self.category_interval * (category_index as f64 + 0.5)
    }

    /// Surface y of a value; larger values map to smaller y
    pub fn to_surface_y(&self, value: f64) -> f64 {
        self.scale.zero_line_y - (value / self.scale.unit) * self.scale.pixel_interval
    }

    /// Inverse of [`to_surface_y`](Self::to_surface_y)
    pub fn to_value(&self, y: f64) -> f64 {
        (self.scale.zero_line_y - y) / self.scale.pixel_interval * self.scale.unit
    }

    /// Signed pixel extent of a value measured from the zero line (negative is upward)
    pub fn extent_from_zero(&self, value: f64) -> f64 {
        self.to_surface_y(value) - self.scale.zero_line_y
    }

    pub fn to_surface(&self, category_index: usize, value: f64) -> Point {
        Point::new(self.to_surface_x(category_index), self.to_surface_y(value))
    }
}

/// Angle math for pie charts
///
/// Chart angles are measured clockwise from 12 o'clock; the surface's arc
/// primitive measures from 3 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarMapper {
    pub center: Point,
    pub radius: f64,
}

impl PolarMapper {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Convert a chart angle to the arc primitive's convention
    pub fn to_surface_angle(&self, angle: f64) -> f64 {
        angle - FRAC_PI_2
    }

    /// Surface point at `angle` and `radius_ratio * radius` from the center
    pub fn point_at(&self, angle: f64, radius_ratio: f64) -> Point {
        let distance = self.radius * radius_ratio;
        Point::new(
            self.center.x + angle.sin() * distance,
            self.center.y - angle.cos() * distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AxisConfig;
    use crate::dataset::ChartDataset;
    use crate::model::ChartRow;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn mapper() -> CoordinateMapper {
        // Zero line one tick above the plot bottom, four ticks of 100px each
        let scale = AxisScale {
            unit: 10.0,
            positive_ticks: 3,
            negative_ticks: 1,
            pixel_interval: 100.0,
            zero_line_y: 350.0,
        };
        CoordinateMapper::new(Rect::new(50.0, 50.0, 600.0, 400.0), 3, scale)
    }

    #[test]
    fn test_categories_centered_in_slots() {
        let mapper = mapper();

        assert_eq!(mapper.category_interval(), 200.0);
        assert_eq!(mapper.to_surface_x(0), 150.0);
        assert_eq!(mapper.to_surface_x(2), 550.0);
    }

    #[test]
    fn test_single_category_spans_plot() {
        let scale = mapper().scale;
        let mapper = CoordinateMapper::new(Rect::new(50.0, 50.0, 600.0, 400.0), 1, scale);

        assert_eq!(mapper.category_interval(), 600.0);
        assert_eq!(mapper.to_surface_x(0), 350.0);
    }

    #[test]
    fn test_values_map_upward() {
        let mapper = mapper();

        assert_eq!(mapper.to_surface_y(0.0), 350.0);
        assert_eq!(mapper.to_surface_y(30.0), 50.0);
        assert_eq!(mapper.to_surface_y(-10.0), 450.0);
        assert!(mapper.to_surface_y(20.0) < mapper.to_surface_y(10.0));
    }

    #[test]
    fn test_extent_from_zero() {
        let mapper = mapper();

        assert_eq!(mapper.extent_from_zero(20.0), -200.0);
        assert_eq!(mapper.extent_from_zero(-5.0), 50.0);
    }

    #[test]
    fn test_polar_angles() {
        let polar = PolarMapper::new(Point::new(100.0, 100.0), 50.0);

        assert_eq!(polar.to_surface_angle(0.0), -FRAC_PI_2);

        let noon = polar.point_at(0.0, 1.0);
        assert!((noon.x - 100.0).abs() < 1e-9);
        assert!((noon.y - 50.0).abs() < 1e-9);

        let three = polar.point_at(PI / 2.0, 1.0);
        assert!((three.x - 150.0).abs() < 1e-9);
        assert!((three.y - 100.0).abs() < 1e-9);

        let six = polar.point_at(PI, 0.5);
        assert!((six.x - 100.0).abs() < 1e-9);
        assert!((six.y - 125.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_value_round_trip(value in -1e6f64..1e6) {
            let mapper = mapper();
            let y = mapper.to_surface_y(value);
            let back = mapper.to_surface_y(mapper.to_value(y));
            prop_assert!((back - y).abs() <= 1e-6 * y.abs().max(1.0));
            prop_assert!((mapper.to_value(y) - value).abs() <= 1e-6 * value.abs().max(1.0));
        }

        #[test]
        fn prop_max_value_between_plot_top_and_zero_line(
            values in prop::collection::vec(-10_000.0f64..10_000.0, 1..20),
            unit_y in 1.0f64..500.0,
        ) {
            let rows: Vec<ChartRow> = values
                .iter()
                .enumerate()
                .map(|(i, v)| ChartRow::new(format!("C{i}"), vec![*v]))
                .collect();
            let dataset = ChartDataset::validate(&rows).unwrap();
            let axis = AxisConfig { unit_y, ..Default::default() };
            let plot = Rect::new(50.0, 50.0, 600.0, 400.0);
            let scale = AxisScale::compute(&dataset, &axis, plot).unwrap();
            let mapper = CoordinateMapper::new(plot, dataset.category_count(), scale);

            let top = mapper.to_surface_y(dataset.max_value());
            let zero = mapper.scale().zero_line_y;
            prop_assert!(top >= plot.y - 1e-6);
            prop_assert!(top <= zero);
            prop_assert_eq!(top == zero, dataset.max_value() == 0.0);
        }

        #[test]
        fn prop_mapping_is_monotonic(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            prop_assume!(b - a > 1e-3);
            let mapper = mapper();
            prop_assert!(mapper.to_surface_y(a) > mapper.to_surface_y(b));
        }
    }
}
