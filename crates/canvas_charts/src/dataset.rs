//! Chart dataset validation
//!
//! A [`ChartDataset`] is built fresh for every draw from the caller's rows and
//! carries the aggregates the scale calculator needs.

use crate::error::{ChartError, ChartResult};
use crate::model::ChartRow;

/// Validated rows plus derived aggregates
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataset {
    rows: Vec<ChartRow>,
    series_count: usize,
    max_value: f64,
    min_value: f64,
}

impl ChartDataset {
    /// Validate caller rows and compute aggregates
    ///
    /// Fails on an empty row list, rows without values, rows whose value count
    /// differs from the first row, and non-finite values. `max_value` is clamped
    /// to `>= 0` and `min_value` to `<= 0` so the zero baseline is always in range.
    pub fn validate(rows: &[ChartRow]) -> ChartResult<Self> {
        let first = rows
            .first()
            .ok_or_else(|| ChartError::InvalidDataset("no rows".to_string()))?;

        let series_count = first.values.len();
        if series_count == 0 {
            return Err(ChartError::InvalidDataset(format!(
                "row \"{}\" has no values",
                first.label
            )));
        }

        let mut max_value = 0.0_f64;
        let mut min_value = 0.0_f64;
        for (idx, row) in rows.iter().enumerate() {
            if row.values.len() != series_count {
                return Err(ChartError::InconsistentRow {
                    row: idx,
                    expected: series_count,
                    found: row.values.len(),
                });
            }
            for &value in &row.values {
                if !value.is_finite() {
                    return Err(ChartError::InvalidDataset(format!(
                        "row \"{}\" contains a non-finite value",
                        row.label
                    )));
                }
                max_value = max_value.max(value);
                min_value = min_value.min(value);
            }
        }

        Ok(Self {
            rows: rows.to_vec(),
            series_count,
            max_value,
            min_value,
        })
    }

    pub fn rows(&self) -> &[ChartRow] {
        &self.rows
    }

    /// Number of values per row
    pub fn series_count(&self) -> usize {
        self.series_count
    }

    /// Number of rows
    pub fn category_count(&self) -> usize {
        self.rows.len()
    }

    /// Largest value, never below zero
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Smallest value, never above zero
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// `max_value - min_value`
    pub fn range(&self) -> f64 {
        self.max_value - self.min_value
    }

    /// First value of every row, in row order
    pub fn first_series(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.values[0])
    }
}
