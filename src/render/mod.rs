//! Interfaces to the rendering and layout collaborators.
//!
//! The chart components never rasterize anything. They emit [`Shape`]s in
//! data space and hand them to two external collaborators:
//!
//! - a [`CoordinateMapper`], which converts data coordinates to device units;
//! - a [`Canvas`], which strokes and fills device-space primitives.
//!
//! [`Legend`] and [`NominalAxis`] are the hooks used by the composition layer
//! for legend entries and categorical axis labels.
//!
//! [`Recorder`] and [`AffineMapper`] are minimal implementations for callers
//! that want the resolved device geometry without a real backend.

mod recorder;

pub use recorder::{AffineMapper, DeviceShape, Recorder};

use tracing::trace;

use crate::color::Rgba;
use crate::geometry::{LineStyle, Point, Rect, Shape};

/// Maps data coordinates to device coordinates.
pub trait CoordinateMapper {
    /// Device position of the data point `(x, y)`.
    fn map(&self, x: f64, y: f64) -> Point;
}

/// A drawing surface accepting device-space primitives.
pub trait Canvas {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    /// Stroke a line segment.
    fn stroke_line(&mut self, from: Point, to: Point, style: LineStyle);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba);

    /// Draw text with its origin at `at`.
    fn fill_text(&mut self, at: Point, text: &str, color: Rgba);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, style: LineStyle) {
        let (x0, y0, x1, y1) = (rect.x, rect.y, rect.max_x(), rect.max_y());
        self.stroke_line(Point::new(x0, y0), Point::new(x1, y0), style);
        self.stroke_line(Point::new(x1, y0), Point::new(x1, y1), style);
        self.stroke_line(Point::new(x1, y1), Point::new(x0, y1), style);
        self.stroke_line(Point::new(x0, y1), Point::new(x0, y0), style);
    }
}

/// Something that can draw a small representative glyph for a legend.
pub trait Thumbnailer {
    /// Draw the legend glyph inside `area`.
    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect);
}

/// Legend registry of the composition layer.
pub trait Legend {
    /// Register an entry.
    fn add(&mut self, label: &str, thumb: &dyn Thumbnailer);
}

/// Categorical axis labeler of the composition layer.
pub trait NominalAxis {
    /// Label the axis at the given positions.
    fn set_ticks(&mut self, ticks: &[(f64, String)]);
}

/// Tick positions `0, 1, 2, ...` paired with `names`; empty names are
/// skipped so their category stays unlabelled.
#[must_use]
pub fn nominal_ticks(names: &[&str]) -> Vec<(f64, String)> {
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .map(|(i, name)| (i as f64, (*name).to_string()))
        .collect()
}

/// Label categories `0, 1, 2, ...` of `axis` with `names`.
pub fn label_categories(axis: &mut dyn NominalAxis, names: &[&str]) {
    axis.set_ticks(&nominal_ticks(names));
}

/// Resolve `shape` through `mapper` and draw it.
pub fn draw_shape(canvas: &mut dyn Canvas, mapper: &dyn CoordinateMapper, shape: &Shape) {
    match shape {
        Shape::Rect {
            min,
            max,
            fill,
            line,
        } => {
            let rect = Rect::from_corners(min.resolve(mapper), max.resolve(mapper));
            if let Some(color) = fill {
                canvas.fill_rect(rect, *color);
            }
            if let Some(style) = line {
                canvas.stroke_rect(rect, *style);
            }
        }
        Shape::Segment { from, to, line } => {
            canvas.stroke_line(from.resolve(mapper), to.resolve(mapper), *line);
        }
        Shape::Point { at, radius, color } => {
            canvas.fill_circle(at.resolve(mapper), *radius, *color);
        }
        Shape::Cell {
            min, max, color, ..
        } => {
            let rect = Rect::from_corners(min.resolve(mapper), max.resolve(mapper));
            canvas.fill_rect(rect, *color);
        }
        Shape::Label { at, text, color } => {
            canvas.fill_text(at.resolve(mapper), text, *color);
        }
    }
}

/// Draw every shape in order.
pub fn draw_shapes(canvas: &mut dyn Canvas, mapper: &dyn CoordinateMapper, shapes: &[Shape]) {
    trace!(count = shapes.len(), "drawing shapes");
    for shape in shapes {
        draw_shape(canvas, mapper, shape);
    }
}
