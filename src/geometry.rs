//! Geometric primitives for visualization.
//!
//! Two coordinate systems meet here:
//!
//! - **device space** ([`Point`], [`Rect`]): what a [`Canvas`](crate::render::Canvas)
//!   draws in, produced by a [`CoordinateMapper`](crate::render::CoordinateMapper);
//! - **data space** ([`Anchor`], [`Shape`]): what the chart emitters produce.
//!
//! An [`Anchor`] is a data-space point plus a device-space offset. Widths of
//! bars and boxes, lateral group offsets and glyph radii are lengths on the
//! device, so they travel alongside the data coordinate until the mapper
//! resolves it.

use crate::color::Rgba;
use crate::render::CoordinateMapper;

/// A 2D point in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// An axis-aligned rectangle in device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Lowest x.
    pub x: f64,
    /// Lowest y.
    pub y: f64,
    /// Width (never negative).
    pub width: f64,
    /// Height (never negative).
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanning two opposite corners, in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self::new(
            a.x.min(b.x),
            a.y.min(b.y),
            (b.x - a.x).abs(),
            (b.y - a.y).abs(),
        )
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Highest x.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Highest y.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// True when the interiors intersect; touching edges do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }
}

/// Which axis carries the computed value.
///
/// `Vertical` charts put categories on x and values on y; `Horizontal`
/// swaps them. Statistics never depend on orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Values grow along y.
    #[default]
    Vertical,
    /// Values grow along x.
    Horizontal,
}

impl Orientation {
    /// Place a `(category, value)` pair on the `(x, y)` plane.
    #[must_use]
    pub const fn xy(self, category: f64, value: f64) -> (f64, f64) {
        match self {
            Self::Vertical => (category, value),
            Self::Horizontal => (value, category),
        }
    }

    /// Anchor at `(category, value)` shifted by `lateral` device units
    /// across the category axis.
    #[must_use]
    pub fn anchor(self, category: f64, value: f64, lateral: f64) -> Anchor {
        let (x, y) = self.xy(category, value);
        let (dx, dy) = self.xy(lateral, 0.0);
        Anchor { x, y, dx, dy }
    }
}

/// A data-space point with a device-space offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Anchor {
    /// Data x.
    pub x: f64,
    /// Data y.
    pub y: f64,
    /// Device offset along x.
    pub dx: f64,
    /// Device offset along y.
    pub dy: f64,
}

impl Anchor {
    /// Anchor exactly at a data point.
    #[must_use]
    pub const fn data(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            dx: 0.0,
            dy: 0.0,
        }
    }

    /// Shift by an additional device offset.
    #[must_use]
    pub fn nudge(self, dx: f64, dy: f64) -> Self {
        Self {
            dx: self.dx + dx,
            dy: self.dy + dy,
            ..self
        }
    }

    /// Device position of this anchor.
    #[must_use]
    pub fn resolve(&self, mapper: &dyn CoordinateMapper) -> Point {
        mapper.map(self.x, self.y).offset(self.dx, self.dy)
    }
}

/// Stroke attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineStyle {
    /// Stroke color.
    pub color: Rgba,
    /// Stroke width in device units.
    pub width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            width: 1.0,
        }
    }
}

/// Point glyph attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlyphStyle {
    /// Fill color.
    pub color: Rgba,
    /// Radius in device units.
    pub radius: f64,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            color: Rgba::BLACK,
            radius: 2.5,
        }
    }
}

/// A drawable primitive in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Box, bar or histogram bin.
    Rect {
        /// One corner.
        min: Anchor,
        /// The opposite corner.
        max: Anchor,
        /// Fill color, if filled.
        fill: Option<Rgba>,
        /// Outline, if stroked.
        line: Option<LineStyle>,
    },
    /// Whisker, cap or median line.
    Segment {
        /// Start.
        from: Anchor,
        /// End.
        to: Anchor,
        /// Stroke.
        line: LineStyle,
    },
    /// Outlier, median marker or bubble.
    Point {
        /// Center.
        at: Anchor,
        /// Radius in device units.
        radius: f64,
        /// Fill color.
        color: Rgba,
    },
    /// Heat-map grid cell.
    Cell {
        /// One corner.
        min: Anchor,
        /// The opposite corner.
        max: Anchor,
        /// Grid value of the cell.
        value: f64,
        /// Palette entry chosen for the cell; `None` for under/overflow.
        palette_index: Option<usize>,
        /// Fill color.
        color: Rgba,
    },
    /// Text placed near a glyph.
    Label {
        /// Text origin.
        at: Anchor,
        /// Text.
        text: String,
        /// Text color.
        color: Rgba,
    },
}

/// Bounding box of a chart in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataRange {
    /// Lowest x.
    pub x_min: f64,
    /// Highest x.
    pub x_max: f64,
    /// Lowest y.
    pub y_min: f64,
    /// Highest y.
    pub y_max: f64,
}

impl DataRange {
    /// Create a range from explicit bounds.
    #[must_use]
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// An empty range: the identity for [`DataRange::union`].
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        )
    }

    /// Range from category bounds and value bounds.
    #[must_use]
    pub fn oriented(orientation: Orientation, cat: (f64, f64), val: (f64, f64)) -> Self {
        match orientation {
            Orientation::Vertical => Self::new(cat.0, cat.1, val.0, val.1),
            Orientation::Horizontal => Self::new(val.0, val.1, cat.0, cat.1),
        }
    }

    /// Grow to include `(x, y)`.
    #[must_use]
    pub fn include(self, x: f64, y: f64) -> Self {
        Self::new(
            self.x_min.min(x),
            self.x_max.max(x),
            self.y_min.min(y),
            self.y_max.max(y),
        )
    }

    /// Smallest range covering both.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            self.x_min.min(other.x_min),
            self.x_max.max(other.x_max),
            self.y_min.min(other.y_min),
            self.y_max.max(other.y_max),
        )
    }

    /// True if nothing has been included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }
}

/// Device-space extent of a glyph drawn at a data point.
///
/// Layout code uses these to pad the plot area so bars, boxes and bubbles
/// near the data bounds are not clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphBox {
    /// Data x of the glyph.
    pub x: f64,
    /// Data y of the glyph.
    pub y: f64,
    /// Extent relative to the mapped point.
    pub rect: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_corners_normalizes() {
        let r = Rect::from_corners(Point::new(10.0, 5.0), Point::new(2.0, 9.0));
        assert_eq!(r, Rect::new(2.0, 5.0, 8.0, 4.0));
        assert_eq!(r.center(), Point::new(6.0, 7.0));
    }

    #[test]
    fn test_touching_rects_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(4.0, 0.0, 4.0, 4.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&Rect::new(3.0, 3.0, 4.0, 4.0)));
    }

    #[test]
    fn test_orientation_swaps_axes() {
        assert_eq!(Orientation::Vertical.xy(1.0, 5.0), (1.0, 5.0));
        assert_eq!(Orientation::Horizontal.xy(1.0, 5.0), (5.0, 1.0));

        let a = Orientation::Horizontal.anchor(2.0, 7.0, -3.0);
        assert_eq!((a.x, a.y, a.dx, a.dy), (7.0, 2.0, 0.0, -3.0));
    }

    #[test]
    fn test_data_range_union() {
        let r = DataRange::empty().include(1.0, 2.0).include(-1.0, 5.0);
        assert_eq!(r, DataRange::new(-1.0, 1.0, 2.0, 5.0));
        assert!(DataRange::empty().is_empty());
        let u = r.union(DataRange::new(0.0, 3.0, 0.0, 1.0));
        assert_eq!(u, DataRange::new(-1.0, 3.0, 0.0, 5.0));
    }

    #[test]
    fn test_anchor_nudge_accumulates() {
        let a = Anchor::data(1.0, 1.0).nudge(2.0, 0.0).nudge(1.0, -1.0);
        assert_eq!((a.dx, a.dy), (3.0, -1.0));
    }
}
