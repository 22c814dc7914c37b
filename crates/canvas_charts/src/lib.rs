//! Canvas Charts - bar, line, and pie chart layout on a 2D drawing surface
//!
//! This crate provides support for:
//! - Validating tabular chart data
//! - Deriving a vertical scale with ticks on both sides of zero
//! - Mapping categories and values onto a plot rectangle
//! - Laying out axes, grouped bars, polylines, and pie slices
//! - Legend and title decorations
//! - Recording draw intents and exporting them to JSON or SVG
//!
//! Rasterization is left to whatever implements [`DrawingSurface`].

mod error;
mod model;
mod geometry;
mod config;
mod dataset;
mod scale;
mod mapper;
mod surface;
mod axis;
mod bar;
mod line;
mod pie;
mod decoration;
mod chart;

pub use error::*;
pub use model::*;
pub use geometry::*;
pub use config::*;
pub use dataset::*;
pub use scale::*;
pub use mapper::*;
pub use surface::*;
pub use axis::*;
pub use bar::*;
pub use line::*;
pub use pie::*;
pub use decoration::*;
pub use chart::*;
