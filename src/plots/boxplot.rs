//! Box plot implementation.
//!
//! A box spans Q1 to Q3 with a line at the median. Whiskers run from the
//! box to the adjacent values and end in caps; outliers are drawn as
//! individual glyphs. The statistics come from
//! [`QuartileSummary`](crate::stats::QuartileSummary).
//!
//! # References
//!
//! - McGill, R., Tukey, J. W., & Larsen, W. A. (1978). "Variations of Box Plots."
//!   *The American Statistician*, 32(1), 12-16.

use tracing::debug;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{
    Anchor, DataRange, GlyphBox, GlyphStyle, LineStyle, Orientation, Rect, Shape,
};
use crate::render::{Canvas, Thumbnailer};
use crate::stats::QuartileSummary;
use crate::values::ValueLabels;

use super::labels::Labels;
use super::Plotter;

/// Box plot of a single sample.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlot {
    summary: QuartileSummary,
    location: f64,
    width: f64,
    cap_width: f64,
    offset: f64,
    orientation: Orientation,
    fill: Option<Rgba>,
    box_style: LineStyle,
    median_style: LineStyle,
    whisker_style: LineStyle,
    glyph: GlyphStyle,
}

impl BoxPlot {
    /// Summarize `values` into a box `width` device units wide at category
    /// `location`. Caps default to three quarters of the box width.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if `width` is negative or not finite;
    /// - [`Error::InvalidInput`] if `values` is empty or non-finite.
    pub fn new(width: f64, location: f64, values: &[f64]) -> Result<Self> {
        Self::check_width(width)?;
        Ok(Self::with_summary(width, location, QuartileSummary::from_values(values)?))
    }

    /// Like [`BoxPlot::new`], keeping labels for outside labelling.
    ///
    /// # Errors
    ///
    /// See [`BoxPlot::new`].
    pub fn from_labelled(width: f64, location: f64, values: &ValueLabels) -> Result<Self> {
        Self::check_width(width)?;
        Ok(Self::with_summary(width, location, QuartileSummary::from_labelled(values)?))
    }

    fn check_width(width: f64) -> Result<()> {
        if !width.is_finite() || width < 0.0 {
            return Err(Error::config(format!("box width must be non-negative, got {width}")));
        }
        Ok(())
    }

    fn with_summary(width: f64, location: f64, summary: QuartileSummary) -> Self {
        debug!(location, width, median = summary.median, "created box plot");
        Self {
            summary,
            location,
            width,
            cap_width: 3.0 * width / 4.0,
            offset: 0.0,
            orientation: Orientation::Vertical,
            fill: None,
            box_style: LineStyle::default(),
            median_style: LineStyle::default(),
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

    /// Set the orientation.
    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Draw the box across the y axis.
    #[must_use]
    pub fn horizontal(self) -> Self {
        self.orientation(Orientation::Horizontal)
    }

    /// Width of the whisker caps in device units.
    #[must_use]
    pub fn cap_width(mut self, cap_width: f64) -> Self {
        self.cap_width = cap_width.max(0.0);
        self
    }

    /// Fill the box.
    #[must_use]
    pub fn fill(mut self, color: Option<Rgba>) -> Self {
        self.fill = color;
        self
    }

    /// Outline of the box.
    #[must_use]
    pub fn box_style(mut self, style: LineStyle) -> Self {
        self.box_style = style;
        self
    }

    /// Median line.
    #[must_use]
    pub fn median_style(mut self, style: LineStyle) -> Self {
        self.median_style = style;
        self
    }

    /// Whiskers and caps.
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

    /// Category of the box.
    #[must_use]
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Box width in device units.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Labels next to each outlier, offset by half a glyph radius.
    ///
    /// Outliers of a labelled sample use their own label; unlabelled ones
    /// show their value.
    #[must_use]
    pub fn outside_labels(&self) -> Labels {
        let half = self.glyph.radius / 2.0;
        let items = self
            .summary
            .outliers
            .iter()
            .map(|o| {
                let text = o.label.clone().unwrap_or_else(|| format!("{:.4}", o.value));
                let at = self
                    .orientation
                    .anchor(self.location, o.value, self.offset)
                    .nudge(half, half);
                (at, text)
            })
            .collect();
        Labels::from_anchors(items, self.orientation)
    }

    fn anchor(&self, value: f64, lateral: f64) -> Anchor {
        self.orientation
            .anchor(self.location, value, self.offset + lateral)
    }
}

/// Points for each outlier of `summary`.
pub(super) fn outlier_shapes(
    summary: &QuartileSummary,
    orientation: Orientation,
    location: f64,
    offset: f64,
    glyph: GlyphStyle,
) -> impl Iterator<Item = Shape> + '_ {
    summary.outliers.iter().map(move |o| Shape::Point {
        at: orientation.anchor(location, o.value, offset),
        radius: glyph.radius,
        color: glyph.color,
    })
}

/// Glyph box of a point glyph of `radius` at `(location, value)`.
pub(super) fn point_glyph_box(
    orientation: Orientation,
    location: f64,
    value: f64,
    offset: f64,
    radius: f64,
) -> GlyphBox {
    let (x, y) = orientation.xy(location, value);
    let (dx, dy) = orientation.xy(offset, 0.0);
    GlyphBox {
        x,
        y,
        rect: Rect::new(dx - radius, dy - radius, 2.0 * radius, 2.0 * radius),
    }
}

impl Plotter for BoxPlot {
    fn data_range(&self) -> DataRange {
        DataRange::oriented(
            self.orientation,
            (self.location, self.location),
            self.summary.extent(),
        )
    }

    fn shapes(&self) -> Vec<Shape> {
        let s = &self.summary;
        let (half, cap) = (self.width / 2.0, self.cap_width / 2.0);
        let mut shapes = vec![
            Shape::Rect {
                min: self.anchor(s.q1, -half),
                max: self.anchor(s.q3, half),
                fill: self.fill,
                line: Some(self.box_style),
            },
            Shape::Segment {
                from: self.anchor(s.median, -half),
                to: self.anchor(s.median, half),
                line: self.median_style,
            },
            Shape::Segment {
                from: self.anchor(s.q1, 0.0),
                to: self.anchor(s.adj_low, 0.0),
                line: self.whisker_style,
            },
            Shape::Segment {
                from: self.anchor(s.q3, 0.0),
                to: self.anchor(s.adj_high, 0.0),
                line: self.whisker_style,
            },
            Shape::Segment {
                from: self.anchor(s.adj_low, -cap),
                to: self.anchor(s.adj_low, cap),
                line: self.whisker_style,
            },
            Shape::Segment {
                from: self.anchor(s.adj_high, -cap),
                to: self.anchor(s.adj_high, cap),
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
        let half = self.width / 2.0;
        let (x, y) = self.orientation.xy(self.location, self.summary.median);
        let rect = match self.orientation {
            Orientation::Vertical => Rect::new(self.offset - half, 0.0, self.width, 0.0),
            Orientation::Horizontal => Rect::new(0.0, self.offset - half, 0.0, self.width),
        };
        let mut boxes = vec![GlyphBox { x, y, rect }];
        boxes.extend(self.summary.outliers.iter().map(|o| {
            point_glyph_box(
                self.orientation,
                self.location,
                o.value,
                self.offset,
                self.glyph.radius,
            )
        }));
        boxes
    }
}

impl Thumbnailer for BoxPlot {
    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
        if let Some(color) = self.fill {
            canvas.fill_rect(area, color);
        }
        canvas.stroke_rect(area, self.box_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoxPlot {
        BoxPlot::new(20.0, 1.0, &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap()
    }

    #[test]
    fn test_negative_width_rejected() {
        assert!(matches!(
            BoxPlot::new(-1.0, 0.0, &[1.0]),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            BoxPlot::new(10.0, 0.0, &[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_box_spans_quartiles() {
        let shapes = sample().shapes();
        let Shape::Rect { min, max, .. } = &shapes[0] else {
            panic!("expected the box first");
        };
        assert_eq!(*min, Anchor::data(1.0, 2.0).nudge(-10.0, 0.0));
        assert_eq!(*max, Anchor::data(1.0, 5.0).nudge(10.0, 0.0));
    }

    #[test]
    fn test_caps_use_cap_width() {
        let shapes = sample().shapes();
        let Shape::Segment { from, to, .. } = &shapes[5] else {
            panic!("expected the upper cap");
        };
        assert_eq!((from.y, from.dx), (5.0, -7.5));
        assert_eq!((to.y, to.dx), (5.0, 7.5));
    }

    #[test]
    fn test_outlier_point_emitted() {
        let shapes = sample().shapes();
        assert_eq!(shapes.len(), 7);
        assert!(matches!(&shapes[6], Shape::Point { at, .. } if at.y == 100.0));
    }

    #[test]
    fn test_data_range_includes_outliers() {
        assert_eq!(sample().data_range(), DataRange::new(1.0, 1.0, 1.0, 100.0));
        assert_eq!(
            sample().horizontal().data_range(),
            DataRange::new(1.0, 100.0, 1.0, 1.0)
        );
    }

    #[test]
    fn test_horizontal_swaps_axes_only() {
        let v = sample();
        let h = sample().horizontal();
        assert_eq!(v.summary(), h.summary());
        let Shape::Rect { min, .. } = &h.shapes()[0] else {
            panic!("expected the box first");
        };
        assert_eq!(*min, Anchor::data(2.0, 1.0).nudge(0.0, -10.0));
    }

    #[test]
    fn test_outside_labels_use_sample_labels() {
        let vl = ValueLabels::from_pairs([
            (1.0, "a"),
            (2.0, "b"),
            (3.0, "c"),
            (4.0, "d"),
            (5.0, "e"),
            (6.0, "f"),
            (90.0, "far"),
        ])
        .unwrap();
        let bp = BoxPlot::from_labelled(20.0, 0.0, &vl).unwrap();
        let labels = bp.outside_labels();
        assert_eq!(labels.texts(), vec!["far"]);
    }

    #[test]
    fn test_outside_labels_fallback_to_value() {
        let labels = sample().outside_labels();
        assert_eq!(labels.texts(), vec!["100.0000"]);
    }

    #[test]
    fn test_glyph_boxes() {
        let boxes = sample().offset(5.0).glyph_boxes();
        assert_eq!(boxes.len(), 2);
        assert_eq!(boxes[0].rect, Rect::new(-5.0, 0.0, 20.0, 0.0));
    }
}
