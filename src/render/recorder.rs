//! Recording canvas and affine coordinate mapper.

use crate::color::Rgba;
use crate::geometry::{DataRange, LineStyle, Point, Rect};

use super::{Canvas, CoordinateMapper};

/// A primitive as received by a [`Canvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceShape {
    /// Filled rectangle.
    FillRect(Rect, Rgba),
    /// Stroked segment.
    Line(Point, Point, LineStyle),
    /// Filled circle.
    Circle(Point, f64, Rgba),
    /// Text.
    Text(Point, String, Rgba),
}

/// A canvas that records every primitive it is asked to draw.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    shapes: Vec<DeviceShape>,
}

impl Recorder {
    /// Recorded primitives in draw order.
    #[must_use]
    pub fn shapes(&self) -> &[DeviceShape] {
        &self.shapes
    }

    /// Recorded filled rectangles in draw order.
    #[must_use]
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.shapes
            .iter()
            .filter_map(|s| match s {
                DeviceShape::FillRect(r, _) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }
}

impl Canvas for Recorder {
    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.shapes.push(DeviceShape::FillRect(rect, color));
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: LineStyle) {
        self.shapes.push(DeviceShape::Line(from, to, style));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba) {
        self.shapes.push(DeviceShape::Circle(center, radius, color));
    }

    fn fill_text(&mut self, at: Point, text: &str, color: Rgba) {
        self.shapes
            .push(DeviceShape::Text(at, text.to_string(), color));
    }
}

/// Independent affine maps on x and y: `device = data * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMapper {
    x_scale: f64,
    x_offset: f64,
    y_scale: f64,
    y_offset: f64,
}

impl AffineMapper {
    /// Create a mapper from explicit coefficients.
    #[must_use]
    pub const fn new(x_scale: f64, x_offset: f64, y_scale: f64, y_offset: f64) -> Self {
        Self {
            x_scale,
            x_offset,
            y_scale,
            y_offset,
        }
    }

    /// Data units equal device units.
    #[must_use]
    pub const fn identity() -> Self {
        Self::new(1.0, 0.0, 1.0, 0.0)
    }

    /// Map `range` onto `area`, y growing upward. A degenerate axis maps to
    /// the middle of the area.
    #[must_use]
    pub fn fit(range: DataRange, area: Rect) -> Self {
        let axis = |lo: f64, hi: f64, start: f64, len: f64| {
            if lo == hi {
                (0.0, start + len / 2.0)
            } else {
                let s = len / (hi - lo);
                (s, start - lo * s)
            }
        };
        let (xs, xo) = axis(range.x_min, range.x_max, area.x, area.width);
        let (ys, yo) = axis(range.y_min, range.y_max, area.y, area.height);
        Self::new(xs, xo, ys, yo)
    }
}

impl CoordinateMapper for AffineMapper {
    fn map(&self, x: f64, y: f64) -> Point {
        Point::new(x * self.x_scale + self.x_offset, y * self.y_scale + self.y_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_maps_corners() {
        let m = AffineMapper::fit(
            DataRange::new(0.0, 10.0, -1.0, 1.0),
            Rect::new(0.0, 0.0, 100.0, 50.0),
        );
        assert_eq!(m.map(0.0, -1.0), Point::new(0.0, 0.0));
        assert_eq!(m.map(10.0, 1.0), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_fit_degenerate_axis() {
        let m = AffineMapper::fit(
            DataRange::new(3.0, 3.0, 0.0, 1.0),
            Rect::new(0.0, 0.0, 100.0, 10.0),
        );
        assert_eq!(m.map(3.0, 0.0).x, 50.0);
    }

    #[test]
    fn test_recorder_clear() {
        let mut rec = Recorder::default();
        rec.fill_circle(Point::new(0.0, 0.0), 1.0, Rgba::BLACK);
        assert_eq!(rec.shapes().len(), 1);
        rec.clear();
        assert!(rec.shapes().is_empty());
    }
}
