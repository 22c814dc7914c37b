//! Axis scale calculation
//!
//! Derives the vertical tick layout from dataset aggregates: the value unit per
//! tick, tick counts on each side of zero, the pixel spacing between ticks, and
//! the surface y of the zero line.

use crate::config::AxisConfig;
use crate::dataset::ChartDataset;
use crate::error::{ChartError, ChartResult};
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Number of configured units the data range may span before auto-scaling kicks in
const AUTO_SCALE_SPAN: f64 = 10.0;

/// How the value unit is replaced when auto-scaling triggers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitStrategy {
    /// `10^(d - 1)` where `d` is the number of decimal digits in the integer part of the range
    #[default]
    DigitLength,
    /// Smallest of `{1, 2, 5} x 10^k` that keeps the range within ten ticks
    NiceNumbers,
}

impl UnitStrategy {
    /// Replacement unit for a data range
    pub fn unit_for_range(self, range: f64) -> f64 {
        match self {
            UnitStrategy::DigitLength => {
                let digits = format!("{:.0}", range.trunc()).len() as i32;
                10f64.powi(digits - 1)
            }
            UnitStrategy::NiceNumbers => {
                let raw = range / AUTO_SCALE_SPAN;
                let magnitude = 10f64.powf(raw.log10().floor());
                [1.0, 2.0, 5.0, 10.0]
                    .iter()
                    .map(|m| m * magnitude)
                    .find(|step| *step >= raw)
                    .unwrap_or(10.0 * magnitude)
            }
        }
    }
}

/// Resolve the value unit for a data range
///
/// Returns `configured` unless `auto_adjust` is set and the range spans more
/// than ten configured units.
pub fn resolve_unit(range: f64, configured: f64, auto_adjust: bool, strategy: UnitStrategy) -> f64 {
    if auto_adjust && range > configured * AUTO_SCALE_SPAN {
        let unit = strategy.unit_for_range(range);
        tracing::trace!(
            range,
            configured,
            unit,
            ?strategy,
            "auto-adjusted vertical unit"
        );
        unit
    } else {
        configured
    }
}

/// Derived vertical scale for one draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    /// Value-space distance represented by one tick
    pub unit: f64,
    /// Ticks above the zero line
    pub positive_ticks: u32,
    /// Ticks below the zero line
    pub negative_ticks: u32,
    /// Surface-space distance between adjacent ticks
    pub pixel_interval: f64,
    /// Surface y of the value-zero line
    pub zero_line_y: f64,
}

impl AxisScale {
    /// Compute the scale for a dataset drawn into `plot`
    ///
    /// Fails when the unit is so small that the ticks would be packed closer
    /// than one pixel apart.
    pub fn compute(dataset: &ChartDataset, axis: &AxisConfig, plot: Rect) -> ChartResult<Self> {
        let unit = resolve_unit(
            dataset.range(),
            axis.unit_y,
            axis.auto_scale,
            axis.unit_strategy,
        );

        let positive = tick_count(dataset.max_value(), unit);
        let negative = tick_count(-dataset.min_value(), unit);

        let total = positive + negative;
        let max_ticks = plot.height.max(1.0).min(u32::MAX as f64);
        if total > max_ticks {
            return Err(ChartError::InvalidConfig(format!(
                "unit {unit} needs {total} ticks, more than the {}px plot can hold",
                plot.height
            )));
        }
        let positive_ticks = positive as u32;
        let negative_ticks = negative as u32;

        let pixel_interval = if total == 0.0 {
            plot.height
        } else {
            plot.height / total
        };
        let zero_line_y = plot.bottom() - negative * pixel_interval;

        let scale = Self {
            unit,
            positive_ticks,
            negative_ticks,
            pixel_interval,
            zero_line_y,
        };
        tracing::trace!(?scale, "computed axis scale");
        Ok(scale)
    }

    /// Surface y of the tick `index` steps from zero (negative indices are below zero)
    pub fn tick_y(&self, index: i64) -> f64 {
        self.zero_line_y - index as f64 * self.pixel_interval
    }

    /// Value represented by the tick `index` steps from zero
    pub fn tick_value(&self, index: i64) -> f64 {
        index as f64 * self.unit
    }

}

/// Whole ticks needed to reach `extent`, as a float so huge counts cannot wrap
fn tick_count(extent: f64, unit: f64) -> f64 {
    if extent <= 0.0 {
        0.0
    } else {
        (extent / unit).ceil()
    }
}

/// Format a tick value without trailing zeros or a negative zero
pub fn format_tick_label(value: f64) -> String {
    let formatted = format!("{:.10}", value + 0.0);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
