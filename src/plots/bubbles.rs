//! Bubble charts: points whose radius encodes a third value.

use tracing::debug;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Anchor, DataRange, GlyphBox, Rect, Shape};
use crate::render::{Canvas, Thumbnailer};
use crate::scale::{scale, Range};
use crate::values::Xyzs;

use super::Plotter;

/// Circles at `(x, y)` with radius scaled linearly from `z`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bubbles {
    points: Xyzs,
    z_range: Range,
    min_radius: f64,
    max_radius: f64,
    color: Rgba,
}

impl Bubbles {
    /// Bubbles between `min_radius` and `max_radius` device units.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `min_radius > max_radius` or
    /// either radius is negative or not finite.
    pub fn new(points: Xyzs, min_radius: f64, max_radius: f64) -> Result<Self> {
        if !(min_radius.is_finite() && max_radius.is_finite())
            || min_radius < 0.0
            || min_radius > max_radius
        {
            return Err(Error::config(format!(
                "bubble radii must satisfy 0 <= min <= max, got [{min_radius}, {max_radius}]"
            )));
        }
        let zs: Vec<f64> = points.iter().map(|p| p.z).collect();
        let z_range = Range::from_data(&zs).unwrap_or_default();
        debug!(bubbles = points.len(), min_radius, max_radius, "created bubbles");
        Ok(Self {
            points,
            z_range,
            min_radius,
            max_radius,
            color: Rgba::BLACK,
        })
    }

    /// Set the fill color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Radius of a bubble with value `z`. A constant z maps to the middle
    /// radius.
    #[must_use]
    pub fn radius(&self, z: f64) -> f64 {
        scale(
            z,
            self.z_range.min,
            self.z_range.max,
            self.min_radius,
            self.max_radius,
        )
    }
}

impl Plotter for Bubbles {
    fn data_range(&self) -> DataRange {
        self.points
            .iter()
            .fold(DataRange::empty(), |r, p| r.include(p.x, p.y))
    }

    fn shapes(&self) -> Vec<Shape> {
        self.points
            .iter()
            .map(|p| Shape::Point {
                at: Anchor::data(p.x, p.y),
                radius: self.radius(p.z),
                color: self.color,
            })
            .collect()
    }

    fn glyph_boxes(&self) -> Vec<GlyphBox> {
        self.points
            .iter()
            .map(|p| {
                let r = self.radius(p.z);
                GlyphBox {
                    x: p.x,
                    y: p.y,
                    rect: Rect::new(-r, -r, 2.0 * r, 2.0 * r),
                }
            })
            .collect()
    }
}

impl Thumbnailer for Bubbles {
    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
        let r = area.width.min(area.height) / 2.0;
        canvas.fill_circle(area.center(), r, self.color);
    }
}
