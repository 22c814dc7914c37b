//! Chart model types
//!
//! This module defines the value types shared by the layout engine:
//! colors and palettes, fonts, caller-supplied rows, titles, and legend entries.

use serde::{Deserialize, Serialize};

/// RGBA color representation
///
/// Serialized as a hex string (`"#RRGGBB"` or `"#RRGGBBAA"`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (fully opaque)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// Convert to hex string with a `#` prefix
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert to CSS color string
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid hex color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Ordered series/slice colors
///
/// Indexing cycles: series `n` of a palette with `len` colors gets color `n % len`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Palette(pub Vec<Color>);

impl Palette {
    /// The sixteen-color standard set used for bars, lines, slices, and swatches
    pub fn standard() -> Self {
        Self(vec![
            Color::rgb(0xFF, 0x28, 0x00), // Red
            Color::rgb(0xFA, 0xF5, 0x00), // Yellow
            Color::rgb(0x35, 0xA1, 0x6B), // Green
            Color::rgb(0x00, 0x41, 0xFF), // Blue
            Color::rgb(0x66, 0xCC, 0xFF), // Sky
            Color::rgb(0xFF, 0x99, 0xA0), // Pink
            Color::rgb(0xFF, 0x99, 0x00), // Orange
            Color::rgb(0x9A, 0x00, 0x79), // Purple
            Color::rgb(0x66, 0x33, 0x00), // Brown
            Color::rgb(0xFF, 0xD1, 0xD1), // Light pink
            Color::rgb(0xFF, 0xFF, 0x99), // Cream
            Color::rgb(0xCB, 0xF2, 0x66), // Light yellow-green
            Color::rgb(0xB4, 0xEB, 0xFA), // Light sky
            Color::rgb(0xED, 0xC5, 0x8F), // Beige
            Color::rgb(0x87, 0xE7, 0xB0), // Light green
            Color::rgb(0xC7, 0xB2, 0xDE), // Light purple
        ])
    }

    /// Color for the series or slice at `index`
    ///
    /// An empty palette yields black; `ChartConfig::validate` rejects it before layout.
    pub fn color(&self, index: usize) -> Color {
        if self.0.is_empty() {
            return Color::BLACK;
        }
        self.0[index % self.0.len()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

/// A font as size in pixels plus a family list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Font {
    pub size: f64,
    pub family: String,
}

impl Font {
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Self {
            size,
            family: family.into(),
        }
    }

    /// CSS shorthand, e.g. `10px sans-serif`
    pub fn to_css(&self) -> String {
        format!("{}px {}", self.size, self.family)
    }
}

/// One category: a label plus one value per series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartRow {
    pub label: String,
    pub values: Vec<f64>,
}

impl ChartRow {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

impl<L: Into<String>, const N: usize> From<(L, [f64; N])> for ChartRow {
    fn from((label, values): (L, [f64; N])) -> Self {
        Self::new(label, values.to_vec())
    }
}

/// Position of the chart title
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TitlePosition {
    #[default]
    Top,
    Bottom,
}

/// Chart title configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartTitle {
    /// Title text; an empty title draws nothing
    pub text: String,
    /// Position of the title
    pub position: TitlePosition,
}

impl ChartTitle {
    pub fn new(text: impl Into<String>, position: TitlePosition) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// One legend cell: swatch color and label
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub swatch_color: Color,
    pub label: String,
}

impl LegendEntry {
    /// Pair each label with its palette color
    pub fn from_labels(labels: &[String], palette: &Palette) -> Vec<LegendEntry> {
        labels
            .iter()
            .enumerate()
            .map(|(idx, label)| LegendEntry {
                swatch_color: palette.color(idx),
                label: label.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        let color = Color::from_hex("#FF0000").unwrap();
        assert_eq!(color, Color::rgb(255, 0, 0));

        let color = Color::from_hex("00FF00").unwrap();
        assert_eq!(color, Color::rgb(0, 255, 0));

        let color = Color::from_hex("#0000FF80").unwrap();
        assert_eq!(color, Color::rgba(0, 0, 255, 128));

        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GG0000").is_none());
    }

    #[test]
    fn test_color_to_css() {
        assert_eq!(Color::rgb(255, 128, 0).to_css(), "rgb(255, 128, 0)");
        assert!(Color::rgba(255, 128, 0, 128).to_css().starts_with("rgba(255, 128, 0,"));
    }

    #[test]
    fn test_color_serde_as_hex() {
        let json = serde_json::to_string(&Color::rgb(0x35, 0xA1, 0x6B)).unwrap();
        assert_eq!(json, "\"#35A16B\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::rgb(0x35, 0xA1, 0x6B));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn test_palette_cycles() {
        let palette = Palette(vec![Color::BLACK, Color::WHITE]);
        assert_eq!(palette.color(0), Color::BLACK);
        assert_eq!(palette.color(1), Color::WHITE);
        assert_eq!(palette.color(2), Color::BLACK);
        assert_eq!(palette.color(5), Color::WHITE);
    }

    #[test]
    fn test_standard_palette() {
        let palette = Palette::standard();
        assert_eq!(palette.len(), 16);
        assert_eq!(palette.color(0), Color::rgb(0xFF, 0x28, 0x00));
        assert_eq!(palette.color(16), palette.color(0));
    }

    #[test]
    fn test_row_from_tuple() {
        let row: ChartRow = ("A", [10.0, 20.0]).into();
        assert_eq!(row.label, "A");
        assert_eq!(row.values, vec![10.0, 20.0]);
    }

    #[test]
    fn test_legend_entries_take_palette_colors() {
        let palette = Palette::standard();
        let labels = vec!["one".to_string(), "two".to_string()];
        let entries = LegendEntry::from_labels(&labels, &palette);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].swatch_color, palette.color(1));
        assert_eq!(entries[1].label, "two");
    }

    #[test]
    fn test_font_css() {
        assert_eq!(Font::new(10.0, "sans-serif").to_css(), "10px sans-serif");
    }
}
