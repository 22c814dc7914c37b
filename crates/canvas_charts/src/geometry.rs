//! Surface-space geometry
//!
//! All coordinates are surface pixels with a top-left origin and y growing downward.

use serde::{Deserialize, Serialize};

/// A point in surface coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in surface coordinates
///
/// `height` may be negative, in which case the rectangle extends upward from `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Get the right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Get the bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Shrink by different amounts on each side
    pub fn inset_sides(&self, top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(0.0),
            height: (self.height - top - bottom).max(0.0),
        }
    }

    /// Same rectangle with a non-negative height, anchored at its top edge
    pub fn normalized(&self) -> Self {
        if self.height < 0.0 {
            Self::new(self.x, self.y + self.height, self.width, -self.height)
        } else {
            *self
        }
    }

    /// Horizontal extent `[x, right)` overlaps another rectangle's extent
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        const EPS: f64 = 1e-9;
        self.x < other.right() - EPS && other.x < self.right() - EPS
    }
}

/// Size of a drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether both dimensions are finite and positive
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_inset_sides() {
        let rect = Rect::new(0.0, 0.0, 800.0, 500.0);
        let plot = rect.inset_sides(50.0, 40.0, 60.0, 30.0);

        assert_eq!(plot.x, 30.0);
        assert_eq!(plot.y, 50.0);
        assert_eq!(plot.width, 730.0);
        assert_eq!(plot.height, 390.0);
        assert_eq!(plot.bottom(), 440.0);
    }

    #[test]
    fn test_rect_normalized() {
        let up = Rect::new(10.0, 100.0, 5.0, -30.0).normalized();
        assert_eq!(up, Rect::new(10.0, 70.0, 5.0, 30.0));

        let down = Rect::new(10.0, 100.0, 5.0, 30.0);
        assert_eq!(down.normalized(), down);
    }

    #[test]
    fn test_touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(9.0, 0.0, 10.0, 10.0);

        assert!(!a.overlaps_horizontally(&b));
        assert!(a.overlaps_horizontally(&c));
    }

    #[test]
    fn test_surface_size_usable() {
        assert!(SurfaceSize::new(800.0, 500.0).is_usable());
        assert!(!SurfaceSize::new(0.0, 500.0).is_usable());
        assert!(!SurfaceSize::new(800.0, f64::NAN).is_usable());
    }
}
