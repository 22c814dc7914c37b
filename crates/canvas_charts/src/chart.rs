//! Chart entry points
//!
//! A [`ChartCanvas`] owns a validated [`ChartConfig`] and draws bar, line, or
//! pie charts onto any [`DrawingSurface`]. Every check runs before the first
//! primitive is issued, so a draw either completes or leaves the surface
//! untouched.
//!
//! The `draw_*` methods never fail: an unusable surface, config, or dataset is
//! logged and the draw becomes a no-op. The `try_draw*` methods report why.

use std::borrow::Cow;

use crate::axis::{AxisLayout, AxisRenderer};
use crate::bar::BarChartLayout;
use crate::config::{ChartConfig, ChartOverrides, Margins};
use crate::dataset::ChartDataset;
use crate::decoration::{LegendLayout, TitleLayout};
use crate::error::{ChartError, ChartResult};
use crate::geometry::{Rect, SurfaceSize};
use crate::line::LineChartLayout;
use crate::mapper::CoordinateMapper;
use crate::model::{ChartRow, LegendEntry};
use crate::pie::PieChartLayout;
use crate::scale::AxisScale;
use crate::surface::{CommandRecorder, DrawingSurface, RenderedChart};
use serde::{Deserialize, Serialize};

/// Chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
}

/// Plot rectangle left inside the surface by the margins
pub fn plot_area(size: SurfaceSize, margins: &Margins) -> ChartResult<Rect> {
    let plot = size
        .bounds()
        .inset_sides(margins.top, margins.right, margins.bottom, margins.left);
    if plot.width > 0.0 && plot.height > 0.0 {
        Ok(plot)
    } else {
        Err(ChartError::InvalidConfig(format!(
            "margins leave no plot area on a {}x{} surface",
            size.width, size.height
        )))
    }
}

/// Chart body laid out for one draw
enum BodyLayout {
    Bar {
        axis: AxisLayout,
        bars: BarChartLayout,
    },
    Line {
        axis: AxisLayout,
        lines: LineChartLayout,
    },
    Pie(PieChartLayout),
}

/// Everything a draw issues, computed up front
struct ChartLayout {
    body: BodyLayout,
    legend: Option<LegendLayout>,
    title: Option<TitleLayout>,
}

impl ChartLayout {
    fn draw(&self, surface: &mut dyn DrawingSurface, config: &ChartConfig) {
        match &self.body {
            BodyLayout::Bar { axis, bars } => {
                AxisRenderer::new(config).draw(surface, axis);
                bars.draw(surface, config);
            }
            BodyLayout::Line { axis, lines } => {
                AxisRenderer::new(config).draw(surface, axis);
                lines.draw(surface, config);
            }
            BodyLayout::Pie(pie) => pie.draw(surface, config),
        }
        if let Some(legend) = &self.legend {
            legend.draw(surface, config);
        }
        if let Some(title) = &self.title {
            title.draw(surface, config);
        }
    }
}

/// Draws charts with a fixed configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartCanvas {
    config: ChartConfig,
}

impl ChartCanvas {
    /// Create a canvas, rejecting an invalid configuration
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Draw a grouped bar chart; invalid input draws nothing
    pub fn draw_bar_chart(&self, surface: &mut dyn DrawingSurface, rows: &[ChartRow], legend_labels: &[String]) {
        self.draw(ChartKind::Bar, surface, rows, legend_labels, None);
    }

    /// Draw one polyline per series; invalid input draws nothing
    pub fn draw_line_chart(&self, surface: &mut dyn DrawingSurface, rows: &[ChartRow], legend_labels: &[String]) {
        self.draw(ChartKind::Line, surface, rows, legend_labels, None);
    }

    /// Draw a pie of each row's first value; invalid input draws nothing
    pub fn draw_pie_chart(&self, surface: &mut dyn DrawingSurface, rows: &[ChartRow], legend_labels: &[String]) {
        self.draw(ChartKind::Pie, surface, rows, legend_labels, None);
    }

    /// Draw any chart kind, logging and swallowing failures
    pub fn draw(
        &self,
        kind: ChartKind,
        surface: &mut dyn DrawingSurface,
        rows: &[ChartRow],
        legend_labels: &[String],
        overrides: Option<&ChartOverrides>,
    ) {
        if let Err(err) = self.try_draw(kind, surface, rows, legend_labels, overrides) {
            tracing::warn!(?kind, error = %err, "chart draw skipped");
        }
    }

    pub fn try_draw_bar_chart(
        &self,
        surface: &mut dyn DrawingSurface,
        rows: &[ChartRow],
        legend_labels: &[String],
    ) -> ChartResult<()> {
        self.try_draw(ChartKind::Bar, surface, rows, legend_labels, None)
    }

    pub fn try_draw_line_chart(
        &self,
        surface: &mut dyn DrawingSurface,
        rows: &[ChartRow],
        legend_labels: &[String],
    ) -> ChartResult<()> {
        self.try_draw(ChartKind::Line, surface, rows, legend_labels, None)
    }

    pub fn try_draw_pie_chart(
        &self,
        surface: &mut dyn DrawingSurface,
        rows: &[ChartRow],
        legend_labels: &[String],
    ) -> ChartResult<()> {
        self.try_draw(ChartKind::Pie, surface, rows, legend_labels, None)
    }

    /// Draw any chart kind, reporting why nothing was drawn
    ///
    /// `overrides` are merged over the canvas configuration for this call only.
    pub fn try_draw(
        &self,
        kind: ChartKind,
        surface: &mut dyn DrawingSurface,
        rows: &[ChartRow],
        legend_labels: &[String],
        overrides: Option<&ChartOverrides>,
    ) -> ChartResult<()> {
        let size = surface
            .size()
            .filter(SurfaceSize::is_usable)
            .ok_or(ChartError::SurfaceUnavailable)?;

        let config = match overrides {
            Some(overrides) => Cow::Owned(self.config.merged(overrides)?),
            None => Cow::Borrowed(&self.config),
        };

        let layout = Self::layout(kind, size, &config, rows, legend_labels)?;
        layout.draw(surface, &config);
        Ok(())
    }

    /// Draw onto a fresh [`CommandRecorder`] of the given size
    pub fn render(
        &self,
        kind: ChartKind,
        width: f64,
        height: f64,
        rows: &[ChartRow],
        legend_labels: &[String],
    ) -> ChartResult<RenderedChart> {
        let mut recorder = CommandRecorder::new(width, height);
        self.try_draw(kind, &mut recorder, rows, legend_labels, None)?;
        Ok(recorder.finish())
    }

    fn layout(
        kind: ChartKind,
        size: SurfaceSize,
        config: &ChartConfig,
        rows: &[ChartRow],
        legend_labels: &[String],
    ) -> ChartResult<ChartLayout> {
        let dataset = ChartDataset::validate(rows)?;
        tracing::debug!(
            ?kind,
            categories = dataset.category_count(),
            series = dataset.series_count(),
            width = size.width,
            height = size.height,
            "laying out chart"
        );

        let body = match kind {
            ChartKind::Pie => BodyLayout::Pie(PieChartLayout::calculate(&dataset, size, config)?),
            ChartKind::Bar | ChartKind::Line => {
                let plot = plot_area(size, &config.margins)?;
                let scale = AxisScale::compute(&dataset, &config.axis, plot)?;
                let mapper = CoordinateMapper::new(plot, dataset.category_count(), scale);
                let axis = AxisLayout::calculate(&mapper, dataset.category_count(), config.axis.unit_x);

                if kind == ChartKind::Bar {
                    BodyLayout::Bar {
                        axis,
                        bars: BarChartLayout::calculate(&dataset, &mapper, config),
                    }
                } else {
                    BodyLayout::Line {
                        axis,
                        lines: LineChartLayout::calculate(&dataset, &mapper, config, legend_labels),
                    }
                }
            }
        };

        Ok(ChartLayout {
            body,
            legend: LegendLayout::calculate(
                LegendEntry::from_labels(legend_labels, &config.palette),
                size,
                config,
            ),
            title: TitleLayout::calculate(&config.title, size),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChartTitle, TitlePosition};
    use crate::surface::DrawCommand;

    fn rows() -> Vec<ChartRow> {
        vec![
            ChartRow::new("Q1", vec![10.0, 4.0]),
            ChartRow::new("Q2", vec![-5.0, 8.0]),
            ChartRow::new("Q3", vec![20.0, 12.0]),
        ]
    }

    fn labels() -> Vec<String> {
        vec!["North".to_string(), "South".to_string()]
    }

    #[test]
    fn test_plot_area_from_margins() {
        let plot = plot_area(SurfaceSize::new(800.0, 500.0), &Margins::new(40.0, 60.0, 70.0, 20.0)).unwrap();
        assert_eq!(plot, Rect::new(70.0, 40.0, 710.0, 400.0));
    }

    #[test]
    fn test_plot_area_rejects_oversized_margins() {
        let err = plot_area(SurfaceSize::new(80.0, 80.0), &Margins::uniform(50.0)).unwrap_err();
        assert!(matches!(err, ChartError::InvalidConfig(_)));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ChartConfig::default();
        config.axis.unit_y = 0.0;
        assert!(ChartCanvas::new(config).is_err());
    }

    #[test]
    fn test_unavailable_surface() {
        let canvas = ChartCanvas::default();
        let mut recorder = CommandRecorder::unavailable();

        let err = canvas.try_draw_bar_chart(&mut recorder, &rows(), &labels()).unwrap_err();
        assert_eq!(err, ChartError::SurfaceUnavailable);
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_zero_sized_surface() {
        let canvas = ChartCanvas::default();
        let mut recorder = CommandRecorder::new(0.0, 300.0);

        let err = canvas.try_draw_line_chart(&mut recorder, &rows(), &labels()).unwrap_err();
        assert_eq!(err, ChartError::SurfaceUnavailable);
    }

    #[test]
    fn test_failed_draw_issues_nothing() {
        let canvas = ChartCanvas::default();
        let mut recorder = CommandRecorder::new(800.0, 500.0);

        canvas.draw_bar_chart(&mut recorder, &[], &labels());
        canvas.draw_line_chart(&mut recorder, &[ChartRow::new("A", vec![1.0]), ChartRow::new("B", vec![])], &[]);
        canvas.draw_pie_chart(&mut recorder, &[ChartRow::new("A", vec![0.0])], &labels());

        assert!(recorder.is_empty());
    }

    #[test]
    fn test_unit_too_small_for_plot_draws_nothing() {
        let mut config = ChartConfig::default();
        config.axis.unit_y = 1e-3;
        config.axis.auto_scale = false;
        let canvas = ChartCanvas::new(config).unwrap();
        let rows = vec![ChartRow::new("A", vec![5e6]), ChartRow::new("B", vec![-5e6])];
        let mut recorder = CommandRecorder::new(800.0, 500.0);

        let err = canvas.try_draw_bar_chart(&mut recorder, &rows, &labels()).unwrap_err();
        assert!(matches!(err, ChartError::InvalidConfig(_)));

        canvas.draw_bar_chart(&mut recorder, &rows, &labels());
        canvas.draw_line_chart(&mut recorder, &rows, &labels());
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_bar_chart_draws_axis_before_bars() {
        let canvas = ChartCanvas::default();
        let mut recorder = CommandRecorder::new(800.0, 500.0);

        canvas.try_draw_bar_chart(&mut recorder, &rows(), &labels()).unwrap();

        let commands = recorder.commands();
        assert!(matches!(commands[0], DrawCommand::Line { .. }));
        let first_bar = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FilledRect { .. }))
            .unwrap();
        assert!(commands[..first_bar]
            .iter()
            .all(|c| !matches!(c, DrawCommand::RectOutline { .. })));
        // Legend outline after every bar
        let legend = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::RectOutline { .. }))
            .unwrap();
        assert!(legend > first_bar + 5);
    }

    #[test]
    fn test_title_drawn_last() {
        let config = ChartConfig::default().with_title(ChartTitle::new("Revenue", TitlePosition::Bottom));
        let canvas = ChartCanvas::new(config).unwrap();
        let mut recorder = CommandRecorder::new(800.0, 500.0);

        canvas.try_draw_pie_chart(&mut recorder, &rows(), &labels()).unwrap();

        match recorder.commands().last().unwrap() {
            DrawCommand::Text { text, at, .. } => {
                assert_eq!(text, "Revenue");
                assert_eq!(at.y, 480.0);
            }
            other => panic!("expected title, got {other:?}"),
        }
    }

    #[test]
    fn test_overrides_apply_to_one_call() {
        let canvas = ChartCanvas::default();
        let overrides = ChartOverrides {
            title: Some(ChartTitle::new("Override", TitlePosition::Top)),
            ..Default::default()
        };
        let mut recorder = CommandRecorder::new(800.0, 500.0);

        canvas
            .try_draw(ChartKind::Line, &mut recorder, &rows(), &labels(), Some(&overrides))
            .unwrap();

        assert!(recorder
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::Text { text, .. } if text == "Override")));
        assert!(canvas.config().title.text.is_empty());
    }

    #[test]
    fn test_invalid_overrides_draw_nothing() {
        let canvas = ChartCanvas::default();
        let overrides = ChartOverrides {
            unit_y: Some(-1.0),
            ..Default::default()
        };
        let mut recorder = CommandRecorder::new(800.0, 500.0);

        let err = canvas
            .try_draw(ChartKind::Bar, &mut recorder, &rows(), &labels(), Some(&overrides))
            .unwrap_err();
        assert!(matches!(err, ChartError::InvalidConfig(_)));
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_render_collects_commands() {
        let canvas = ChartCanvas::default();
        let rendered = canvas.render(ChartKind::Pie, 400.0, 300.0, &rows(), &[]).unwrap();

        assert_eq!(rendered.width, 400.0);
        assert_eq!(
            rendered
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::Arc { .. }))
                .count(),
            3
        );
    }
}
