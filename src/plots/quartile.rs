//! Tufte-style quartile plot.
//!
//! A minimal alternative to the box plot: a point at the median, whiskers
//! from the quartiles out to the adjacent values, and outlier points. The
//! interquartile range is left blank.

use tracing::debug;

use crate::error::Result;
use crate::geometry::{DataRange, GlyphBox, GlyphStyle, LineStyle, Orientation, Rect, Shape};
use crate::render::{Canvas, Thumbnailer};
use crate::stats::QuartileSummary;
use crate::values::ValueLabels;

use super::boxplot::{outlier_shapes, point_glyph_box};
use super::Plotter;

/// Quartile plot of a single sample.
#[derive(Debug, Clone, PartialEq)]
pub struct QuartPlot {
    summary: QuartileSummary,
    location: f64,
    offset: f64,
    orientation: Orientation,
    median_style: GlyphStyle,
    whisker_style: LineStyle,
    glyph: GlyphStyle,
}

impl QuartPlot {
    /// Summarize `values` at category `location`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`](crate::Error::InvalidInput) if
    /// `values` is empty or non-finite.
    pub fn new(location: f64, values: &[f64]) -> Result<Self> {
        Ok(Self::with_summary(location, QuartileSummary::from_values(values)?))
    }

    /// Like [`QuartPlot::new`] for labelled samples.
    ///
    /// # Errors
    ///
    /// See [`QuartPlot::new`].
    pub fn from_labelled(location: f64, values: &ValueLabels) -> Result<Self> {
        Ok(Self::with_summary(location, QuartileSummary::from_labelled(values)?))
    }

    fn with_summary(location: f64, summary: QuartileSummary) -> Self {
        debug!(location, median = summary.median, "created quartile plot");
        Self {
            summary,
            location,
            offset: 0.0,
            orientation: Orientation::Vertical,
            median_style: GlyphStyle::default(),
            whisker_style: LineStyle::default(),
            glyph: GlyphStyle::default(),
        }
    }

    /// Lateral device offset.
    #[must_use]
    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Draw across the y axis.
    #[must_use]
    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    /// Median marker.
    #[must_use]
    pub fn median_style(mut self, style: GlyphStyle) -> Self {
        self.median_style = style;
        self
    }

    /// Whisker stroke.
    #[must_use]
    pub fn whisker_style(mut self, style: LineStyle) -> Self {
        self.whisker_style = style;
        self
    }

    /// Outlier glyphs.
    #[must_use]
    pub fn glyph_style(mut self, glyph: GlyphStyle) -> Self {
        self.glyph = glyph;
        self
    }

    /// The computed statistics.
    #[must_use]
    pub fn summary(&self) -> &QuartileSummary {
        &self.summary
    }
}

impl Plotter for QuartPlot {
    fn data_range(&self) -> DataRange {
        DataRange::oriented(
            self.orientation,
            (self.location, self.location),
            self.summary.extent(),
        )
    }

    fn shapes(&self) -> Vec<Shape> {
        let s = &self.summary;
        let at = |v: f64| self.orientation.anchor(self.location, v, self.offset);
        let mut shapes = vec![
            Shape::Point {
                at: at(s.median),
                radius: self.median_style.radius,
                color: self.median_style.color,
            },
            Shape::Segment {
                from: at(s.adj_low),
                to: at(s.q1),
                line: self.whisker_style,
            },
            Shape::Segment {
                from: at(s.q3),
                to: at(s.adj_high),
                line: self.whisker_style,
            },
        ];
        shapes.extend(outlier_shapes(
            s,
            self.orientation,
            self.location,
            self.offset,
            self.glyph,
        ));
        shapes
    }

    fn glyph_boxes(&self) -> Vec<GlyphBox> {
        let median = point_glyph_box(
            self.orientation,
            self.location,
            self.summary.median,
            self.offset,
            self.median_style.radius,
        );
        std::iter::once(median)
            .chain(self.summary.outliers.iter().map(|o| {
                point_glyph_box(
                    self.orientation,
                    self.location,
                    o.value,
                    self.offset,
                    self.glyph.radius,
                )
            }))
            .collect()
    }
}

impl Thumbnailer for QuartPlot {
    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
        canvas.fill_circle(area.center(), self.median_style.radius, self.median_style.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_shapes_layout() {
        let qp = QuartPlot::new(2.0, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 40.0]).unwrap();
        let shapes = qp.shapes();
        assert_eq!(shapes.len(), 4);
        assert!(matches!(&shapes[0], Shape::Point { at, .. } if at.y == 4.0 && at.x == 2.0));
        let Shape::Segment { from, to, .. } = &shapes[1] else {
            panic!("expected the lower whisker");
        };
        assert_eq!((from.y, to.y), (1.0, 2.0));
        let Shape::Segment { from, to, .. } = &shapes[2] else {
            panic!("expected the upper whisker");
        };
        assert_eq!((from.y, to.y), (6.0, 6.0));
        assert!(matches!(&shapes[3], Shape::Point { at, .. } if at.y == 40.0));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(QuartPlot::new(0.0, &[]), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_horizontal_range() {
        let qp = QuartPlot::new(1.0, &[3.0, 5.0]).unwrap().horizontal();
        assert_eq!(qp.data_range(), DataRange::new(3.0, 5.0, 1.0, 1.0));
    }

    #[test]
    fn test_glyph_boxes_cover_outliers() {
        let qp = QuartPlot::new(0.0, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 40.0]).unwrap();
        let boxes = qp.glyph_boxes();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[1].y, 40.0);
        assert_eq!(boxes[0].rect, Rect::new(-2.5, -2.5, 5.0, 5.0));
    }
}
