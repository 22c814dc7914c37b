//! Drawing surface contract
//!
//! The layout engine never rasterizes. It issues primitive-drawing intents to a
//! [`DrawingSurface`], passing a complete style value with every call so no
//! primitive depends on state left behind by another.
//!
//! [`CommandRecorder`] is an in-memory surface that records the intents as
//! [`DrawCommand`]s, which can be replayed onto another surface or exported to
//! JSON or SVG.

use crate::error::ChartResult;
use crate::geometry::{Point, Rect, SurfaceSize};
use crate::model::{Color, Font};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// Dash pattern of a stroked line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    #[default]
    Solid,
    /// 10px on, 10px off
    Dashed,
}

/// Full style of a stroked line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
    pub dash: LineDash,
}

impl StrokeStyle {
    pub fn solid(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            dash: LineDash::Solid,
        }
    }

    pub fn dashed(width: f64, color: Color) -> Self {
        Self {
            width,
            color,
            dash: LineDash::Dashed,
        }
    }
}

/// Full style of a filled rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub fill: Color,
    /// Outline color, if the rectangle is also stroked
    pub stroke: Option<Color>,
}

impl FillStyle {
    pub fn new(fill: Color, stroke: Option<Color>) -> Self {
        Self { fill, stroke }
    }
}

/// Horizontal alignment of text relative to its anchor point
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Full style of a text run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub align: TextAlign,
    /// Width the surface may compress the text into
    pub max_width: Option<f64>,
    pub color: Color,
    pub font: Font,
}

impl TextStyle {
    pub fn new(align: TextAlign, color: Color, font: Font) -> Self {
        Self {
            align,
            max_width: None,
            color,
            font,
        }
    }

    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

/// A 2D surface with a top-left origin and y growing downward
pub trait DrawingSurface {
    /// Current size, or `None` when the surface cannot be acquired
    fn size(&self) -> Option<SurfaceSize>;

    fn draw_line(&mut self, from: Point, to: Point, style: &StrokeStyle);

    fn draw_filled_circle(&mut self, center: Point, radius: f64, fill: Color);

    /// Filled wedge from the center; angles in radians from 3 o'clock, clockwise
    fn draw_filled_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: Color,
    );

    /// `rect.height` may be negative to grow upward from `rect.y`
    fn draw_filled_rect(&mut self, rect: Rect, style: &FillStyle);

    fn draw_rect_outline(&mut self, rect: Rect, stroke: Color);

    fn draw_text(&mut self, at: Point, text: &str, style: &TextStyle);
}

/// One recorded primitive call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawCommand {
    Line {
        from: Point,
        to: Point,
        style: StrokeStyle,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Color,
    },
    Arc {
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: Color,
    },
    FilledRect {
        rect: Rect,
        style: FillStyle,
    },
    RectOutline {
        rect: Rect,
        stroke: Color,
    },
    Text {
        at: Point,
        text: String,
        style: TextStyle,
    },
}

impl DrawCommand {
    /// Issue this command against a surface
    pub fn replay(&self, surface: &mut dyn DrawingSurface) {
        match self {
            DrawCommand::Line { from, to, style } => surface.draw_line(*from, *to, style),
            DrawCommand::Circle {
                center,
                radius,
                fill,
            } => surface.draw_filled_circle(*center, *radius, *fill),
            DrawCommand::Arc {
                center,
                radius,
                start_angle,
                end_angle,
                fill,
            } => surface.draw_filled_arc(*center, *radius, *start_angle, *end_angle, *fill),
            DrawCommand::FilledRect { rect, style } => surface.draw_filled_rect(*rect, style),
            DrawCommand::RectOutline { rect, stroke } => surface.draw_rect_outline(*rect, *stroke),
            DrawCommand::Text { at, text, style } => surface.draw_text(*at, text, style),
        }
    }
}

/// In-memory surface that records every primitive call
#[derive(Debug, Clone, Default)]
pub struct CommandRecorder {
    size: Option<SurfaceSize>,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    /// Create a recorder for a surface of the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Some(SurfaceSize::new(width, height)),
            commands: Vec::new(),
        }
    }

    /// A recorder standing in for a surface that could not be acquired
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every recorded command onto another surface, in order
    pub fn replay_onto(&self, surface: &mut dyn DrawingSurface) {
        for command in &self.commands {
            command.replay(surface);
        }
    }

    /// Consume the recorder into a rendered chart
    pub fn finish(self) -> RenderedChart {
        let size = self.size.unwrap_or(SurfaceSize::new(0.0, 0.0));
        RenderedChart {
            width: size.width,
            height: size.height,
            commands: self.commands,
        }
    }
}

impl DrawingSurface for CommandRecorder {
    fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    fn draw_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            style: style.clone(),
        });
    }

    fn draw_filled_circle(&mut self, center: Point, radius: f64, fill: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill,
        });
    }

    fn draw_filled_arc(
        &mut self,
        center: Point,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        fill: Color,
    ) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            fill,
        });
    }

    fn draw_filled_rect(&mut self, rect: Rect, style: &FillStyle) {
        self.commands.push(DrawCommand::FilledRect {
            rect,
            style: style.clone(),
        });
    }

    fn draw_rect_outline(&mut self, rect: Rect, stroke: Color) {
        self.commands.push(DrawCommand::RectOutline { rect, stroke });
    }

    fn draw_text(&mut self, at: Point, text: &str, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            style: style.clone(),
        });
    }
}

/// Recorded output of one or more draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl RenderedChart {
    pub fn to_json(&self) -> ChartResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Convert to an SVG document
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');

        for command in &self.commands {
            svg.push_str(&command_to_svg(command));
            svg.push('\n');
        }

        svg.push_str("</svg>");
        svg
    }
}

fn command_to_svg(command: &DrawCommand) -> String {
    match command {
        DrawCommand::Line { from, to, style } => {
            let mut attrs = format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}""#,
                from.x,
                from.y,
                to.x,
                to.y,
                style.color.to_css(),
                style.width
            );
            if style.dash == LineDash::Dashed {
                attrs.push_str(r#" stroke-dasharray="10 10""#);
            }
            attrs.push_str("/>");
            attrs
        }
        DrawCommand::Circle {
            center,
            radius,
            fill,
        } => format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{}"/>"#,
            center.x,
            center.y,
            radius,
            fill.to_css(),
            fill.to_css()
        ),
        DrawCommand::Arc {
            center,
            radius,
            start_angle,
            end_angle,
            fill,
        } => {
            if (end_angle - start_angle).abs() >= TAU - 1e-9 {
                // A full turn has coincident endpoints, which SVG arcs cannot express
                format!(
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    center.x,
                    center.y,
                    radius,
                    fill.to_css()
                )
            } else {
                format!(
                    r#"<path d="{}" fill="{}"/>"#,
                    wedge_path(*center, *radius, *start_angle, *end_angle),
                    fill.to_css()
                )
            }
        }
        DrawCommand::FilledRect { rect, style } => {
            let rect = rect.normalized();
            let mut attrs = format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}""#,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                style.fill.to_css()
            );
            if let Some(stroke) = style.stroke {
                attrs.push_str(&format!(r#" stroke="{}""#, stroke.to_css()));
            }
            attrs.push_str("/>");
            attrs
        }
        DrawCommand::RectOutline { rect, stroke } => {
            let rect = rect.normalized();
            format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}"/>"#,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                stroke.to_css()
            )
        }
        DrawCommand::Text { at, text, style } => {
            let anchor = match style.align {
                TextAlign::Left => "start",
                TextAlign::Center => "middle",
                TextAlign::Right => "end",
            };
            format!(
                r#"<text x="{}" y="{}" style="font: {}" fill="{}" text-anchor="{}">{}</text>"#,
                at.x,
                at.y,
                escape_xml(&style.font.to_css()),
                style.color.to_css(),
                anchor,
                escape_xml(text)
            )
        }
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn wedge_path(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> String {
    let large_arc = if (end_angle - start_angle).abs() > PI { 1 } else { 0 };
    let sweep = if end_angle >= start_angle { 1 } else { 0 };

    let start_x = center.x + radius * start_angle.cos();
    let start_y = center.y + radius * start_angle.sin();
    let end_x = center.x + radius * end_angle.cos();
    let end_y = center.y + radius * end_angle.sin();

    format!(
        "M {} {} L {} {} A {} {} 0 {} {} {} {} Z",
        center.x, center.y, start_x, start_y, radius, radius, large_arc, sweep, end_x, end_y
    )
}
