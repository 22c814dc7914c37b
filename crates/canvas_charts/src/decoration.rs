//! Legend and title decorations
//!
//! Both are positioned against the whole surface, not the plot area, so they
//! land in the same place for every chart kind.

use crate::config::ChartConfig;
use crate::geometry::{Point, Rect, SurfaceSize};
use crate::model::{ChartTitle, LegendEntry, TitlePosition};
use crate::surface::{DrawingSurface, FillStyle, TextAlign, TextStyle};

/// Swatch offset from the left edge of its cell
const SWATCH_INSET: f64 = 10.0;
/// Label offset from the left edge of its cell
const LABEL_INSET: f64 = 24.0;
/// Label baseline below the top of the strip
const LABEL_BASELINE: f64 = 18.0;
/// Title baseline distance from the top or bottom edge
const TITLE_EDGE_OFFSET: f64 = 20.0;

/// One positioned legend cell
#[derive(Debug, Clone, PartialEq)]
pub struct LegendCellLayout {
    pub entry: LegendEntry,
    pub swatch: Rect,
    pub label_at: Point,
}

/// Legend strip anchored to the surface's bottom-right corner
#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub bounds: Rect,
    pub cells: Vec<LegendCellLayout>,
}

impl LegendLayout {
    /// Lay out one cell per entry, or nothing when there are no entries
    pub fn calculate(entries: Vec<LegendEntry>, size: SurfaceSize, config: &ChartConfig) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }

        let legend = &config.legend;
        let width = entries.len() as f64 * legend.cell_width;
        let bounds = Rect::new(
            size.width - width - legend.edge_gap,
            size.height - legend.bottom_offset,
            width,
            legend.height,
        );
        let swatch_top = bounds.y + (legend.height - legend.swatch_size) / 2.0;

        let cells = entries
            .into_iter()
            .enumerate()
            .map(|(i, entry)| {
                let cell_x = bounds.x + i as f64 * legend.cell_width;
                LegendCellLayout {
                    entry,
                    swatch: Rect::new(
                        cell_x + SWATCH_INSET,
                        swatch_top,
                        legend.swatch_size,
                        legend.swatch_size,
                    ),
                    label_at: Point::new(cell_x + LABEL_INSET, bounds.y + LABEL_BASELINE),
                }
            })
            .collect();

        Some(Self { bounds, cells })
    }

    pub fn draw(&self, surface: &mut dyn DrawingSurface, config: &ChartConfig) {
        let label_style = TextStyle::new(
            TextAlign::Left,
            config.legend.text_color,
            config.fonts.small.clone(),
        )
        .with_max_width(config.legend.label_max_width);

        surface.draw_rect_outline(self.bounds, config.legend.box_color);
        for cell in &self.cells {
            let color = cell.entry.swatch_color;
            surface.draw_filled_rect(cell.swatch, &FillStyle::new(color, Some(color)));
            surface.draw_text(cell.label_at, &cell.entry.label, &label_style);
        }
    }
}

/// Positioned chart title
#[derive(Debug, Clone, PartialEq)]
pub struct TitleLayout {
    pub text: String,
    pub anchor: Point,
}

impl TitleLayout {
    /// Center the title horizontally near the top or bottom edge; empty titles are skipped
    pub fn calculate(title: &ChartTitle, size: SurfaceSize) -> Option<Self> {
        if title.text.is_empty() {
            return None;
        }

        let y = match title.position {
            TitlePosition::Top => TITLE_EDGE_OFFSET,
            TitlePosition::Bottom => size.height - TITLE_EDGE_OFFSET,
        };
        Some(Self {
            text: title.text.clone(),
            anchor: Point::new(size.width / 2.0, y),
        })
    }

    pub fn draw(&self, surface: &mut dyn DrawingSurface, config: &ChartConfig) {
        let style = TextStyle::new(
            TextAlign::Center,
            config.text_color,
            config.fonts.standard.clone(),
        );
        surface.draw_text(self.anchor, &self.text, &style);
    }
}
