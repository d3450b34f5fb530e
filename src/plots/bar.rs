//! Bar charts.
//!
//! One bar per value, at consecutive categories starting from `x_min`. The
//! bar width and lateral offset are device lengths; bar heights are data
//! values. Stacking is resolved through a
//! [`SeriesRegistry`](crate::stacking::SeriesRegistry).

use tracing::debug;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{DataRange, GlyphBox, LineStyle, Orientation, Rect, Shape};
use crate::render::{Canvas, Thumbnailer};
use crate::stacking::{ResolvedBars, SeriesPosition};
use crate::values::Values;

use super::Plotter;

/// A series of bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    values: Values,
    width: f64,
    position: SeriesPosition,
    orientation: Orientation,
    color: Rgba,
    line: Option<LineStyle>,
}

impl BarChart {
    /// Create a bar chart `width` device units wide per bar.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if `width` is not positive;
    /// - [`Error::InvalidInput`] if a value is NaN or infinite.
    pub fn new(values: &[f64], width: f64) -> Result<Self> {
        if !(width > 0.0) {
            return Err(Error::config(format!("bar width must be positive, got {width}")));
        }
        let values = Values::new(values)?;
        debug!(bars = values.len(), width, "created bar chart");
        Ok(Self {
            values,
            width,
            position: SeriesPosition::at(0.0),
            orientation: Orientation::Vertical,
            color: Rgba::BLACK,
            line: Some(LineStyle::default()),
        })
    }

    /// Category of the first bar.
    #[must_use]
    pub fn x_min(mut self, category: f64) -> Self {
        self.position.category = category;
        self
    }

    /// Lateral device offset of every bar.
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.position.offset = offset;
        self
    }

    /// Set the orientation.
    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Draw bars growing along x.
    #[must_use]
    pub fn horizontal(self) -> Self {
        self.orientation(Orientation::Horizontal)
    }

    /// Set the fill color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Set or remove the outline.
    #[must_use]
    pub fn line_style(mut self, line: Option<LineStyle>) -> Self {
        self.line = line;
        self
    }

    /// Bar heights.
    #[must_use]
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Bar width in device units.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Categorical position.
    #[must_use]
    pub fn position(&self) -> SeriesPosition {
        self.position
    }

    pub(crate) fn position_mut(&mut self) -> &mut SeriesPosition {
        &mut self.position
    }

    /// Current orientation.
    #[must_use]
    pub fn orientation_of(&self) -> Orientation {
        self.orientation
    }

    pub(crate) fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Bars drawn from the given baselines.
    pub(crate) fn shapes_from(&self, bases: &[f64]) -> Vec<Shape> {
        let (lo, hi) = self.position.lateral_span(self.width);
        self.values
            .iter()
            .zip(bases)
            .enumerate()
            .map(|(i, (&v, &base))| {
                let cat = self.position.category_of(i);
                Shape::Rect {
                    min: self.orientation.anchor(cat, base, lo),
                    max: self.orientation.anchor(cat, base + v, hi),
                    fill: Some(self.color),
                    line: self.line,
                }
            })
            .collect()
    }

    pub(crate) fn data_range_from(&self, bases: &[f64]) -> DataRange {
        if self.values.is_empty() {
            return DataRange::empty();
        }
        let cat = (
            self.position.category,
            self.position.category_of(self.values.len() - 1),
        );
        let val = self
            .values
            .iter()
            .zip(bases)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (&v, &b)| {
                (lo.min(b).min(b + v), hi.max(b).max(b + v))
            });
        DataRange::oriented(self.orientation, cat, val)
    }

    pub(crate) fn glyph_boxes_of(&self) -> Vec<GlyphBox> {
        let (lo, _) = self.position.lateral_span(self.width);
        let rect = match self.orientation {
            Orientation::Vertical => Rect::new(lo, 0.0, self.width, 0.0),
            Orientation::Horizontal => Rect::new(0.0, lo, 0.0, self.width),
        };
        (0..self.values.len())
            .map(|i| {
                let (x, y) = self.orientation.xy(self.position.category_of(i), 0.0);
                GlyphBox { x, y, rect }
            })
            .collect()
    }
}

impl Thumbnailer for BarChart {
    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
        canvas.fill_rect(area, self.color);
        if let Some(line) = self.line {
            canvas.stroke_rect(area, line);
        }
    }
}

impl Plotter for BarChart {
    fn data_range(&self) -> DataRange {
        self.data_range_from(&vec![0.0; self.values.len()])
    }

    fn shapes(&self) -> Vec<Shape> {
        self.shapes_from(&vec![0.0; self.values.len()])
    }

    fn glyph_boxes(&self) -> Vec<GlyphBox> {
        self.glyph_boxes_of()
    }
}

impl Thumbnailer for ResolvedBars {
    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
        self.chart().thumbnail(canvas, area);
    }
}

impl Plotter for ResolvedBars {
    fn data_range(&self) -> DataRange {
        self.chart().data_range_from(self.bases())
    }

    fn shapes(&self) -> Vec<Shape> {
        self.chart().shapes_from(self.bases())
    }

    fn glyph_boxes(&self) -> Vec<GlyphBox> {
        self.chart().glyph_boxes_of()
    }
}
