//! Error bars along x or y.
//!
//! Each point gets a whisker from `value - low` to `value + high` along the
//! error axis with a cap across each end. `YErrorBars` run vertically,
//! `XErrorBars` horizontally; both share the same layout with the axes
//! swapped.

use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{DataRange, GlyphBox, LineStyle, Orientation, Rect, Shape};
use crate::render::{Canvas, Thumbnailer};
use crate::values::{check_finite, Xys};

use super::Plotter;

/// Default cap width in device units.
pub const DEFAULT_CAP_WIDTH: f64 = 5.0;

/// Low and high error of one point; both non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorPair {
    /// Distance below the value.
    pub low: f64,
    /// Distance above the value.
    pub high: f64,
}

impl ErrorPair {
    /// Asymmetric error.
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// The same error on both sides.
    #[must_use]
    pub const fn symmetric(err: f64) -> Self {
        Self::new(err, err)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ErrorBars {
    points: Xys,
    errors: Vec<ErrorPair>,
    orientation: Orientation,
    cap_width: f64,
    line: LineStyle,
}

impl ErrorBars {
    fn new(points: &Xys, errors: &[ErrorPair], orientation: Orientation) -> Result<Self> {
        Error::check_len(points.len(), errors.len())?;
        check_finite(errors.iter().flat_map(|e| [e.low, e.high]))?;
        if let Some(i) = errors.iter().position(|e| e.low < 0.0 || e.high < 0.0) {
            return Err(Error::invalid(format!("negative error at index {i}")));
        }
        debug!(bars = errors.len(), ?orientation, "created error bars");
        Ok(Self {
            points: points.clone(),
            errors: errors.to_vec(),
            orientation,
            cap_width: DEFAULT_CAP_WIDTH,
            line: LineStyle::default(),
        })
    }

    /// `(category, value, error)` per point.
    fn bars(&self) -> impl Iterator<Item = (f64, f64, ErrorPair)> + '_ {
        self.points.iter().zip(&self.errors).map(|(p, e)| match self.orientation {
            Orientation::Vertical => (p.x, p.y, *e),
            Orientation::Horizontal => (p.y, p.x, *e),
        })
    }

    fn data_range(&self) -> DataRange {
        self.bars().fold(DataRange::empty(), |r, (cat, val, e)| {
            r.union(DataRange::oriented(
                self.orientation,
                (cat, cat),
                (val - e.low, val + e.high),
            ))
        })
    }

    fn shapes(&self) -> Vec<Shape> {
        let o = self.orientation;
        let half = self.cap_width / 2.0;
        let mut shapes = Vec::with_capacity(3 * self.errors.len());
        for (cat, val, e) in self.bars() {
            let (lo, hi) = (val - e.low, val + e.high);
            shapes.push(Shape::Segment {
                from: o.anchor(cat, lo, 0.0),
                to: o.anchor(cat, hi, 0.0),
                line: self.line,
            });
            for end in [lo, hi] {
                shapes.push(Shape::Segment {
                    from: o.anchor(cat, end, -half),
                    to: o.anchor(cat, end, half),
                    line: self.line,
                });
            }
        }
        shapes
    }

    fn glyph_boxes(&self) -> Vec<GlyphBox> {
        let half = self.cap_width / 2.0;
        let rect = match self.orientation {
            Orientation::Vertical => Rect::new(-half, 0.0, self.cap_width, 0.0),
            Orientation::Horizontal => Rect::new(0.0, -half, 0.0, self.cap_width),
        };
        self.bars()
            .flat_map(|(cat, val, e)| [(cat, val - e.low), (cat, val + e.high)])
            .map(|(cat, end)| {
                let (x, y) = self.orientation.xy(cat, end);
                GlyphBox { x, y, rect }
            })
            .collect()
    }

    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
        let c = area.center();
        let half = self.cap_width / 2.0;
        let (from, to) = match self.orientation {
            Orientation::Vertical => (c.offset(0.0, -area.height / 2.0), c.offset(0.0, area.height / 2.0)),
            Orientation::Horizontal => (c.offset(-area.width / 2.0, 0.0), c.offset(area.width / 2.0, 0.0)),
        };
        canvas.stroke_line(from, to, self.line);
        for end in [from, to] {
            let (a, b) = match self.orientation {
                Orientation::Vertical => (end.offset(-half, 0.0), end.offset(half, 0.0)),
                Orientation::Horizontal => (end.offset(0.0, -half), end.offset(0.0, half)),
            };
            canvas.stroke_line(a, b, self.line);
        }
    }
}

macro_rules! error_bars {
    ($(#[$doc:meta])* $name:ident, $orientation:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(ErrorBars);

        impl $name {
            /// One error pair per point.
            ///
            /// # Errors
            ///
            /// - [`Error::DimensionMismatch`] if `errors` and `points` differ
            ///   in length;
            /// - [`Error::InvalidInput`] if an error is negative or not finite.
            pub fn new(points: &Xys, errors: &[ErrorPair]) -> Result<Self> {
                ErrorBars::new(points, errors, $orientation).map(Self)
            }

            /// Width of the caps in device units.
            #[must_use]
            pub fn cap_width(mut self, width: f64) -> Self {
                self.0.cap_width = width.max(0.0);
                self
            }

            /// Stroke of whiskers and caps.
            #[must_use]
            pub fn line_style(mut self, line: LineStyle) -> Self {
                self.0.line = line;
                self
            }

            /// Error of each point.
            #[must_use]
            pub fn errors(&self) -> &[ErrorPair] {
                &self.0.errors
            }
        }

        impl Plotter for $name {
            fn data_range(&self) -> DataRange {
                self.0.data_range()
            }

            fn shapes(&self) -> Vec<Shape> {
                self.0.shapes()
            }

            fn glyph_boxes(&self) -> Vec<GlyphBox> {
                self.0.glyph_boxes()
            }
        }

        impl Thumbnailer for $name {
            fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
                self.0.thumbnail(canvas, area);
            }
        }
    };
}

error_bars!(
    /// Vertical error bars: errors apply to y.
    YErrorBars,
    Orientation::Vertical
);

error_bars!(
    /// Horizontal error bars: errors apply to x.
    XErrorBars,
    Orientation::Horizontal
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Anchor;

    fn points() -> Xys {
        Xys::new(&[(1.0, 10.0), (2.0, 20.0)]).unwrap()
    }

    #[test]
    fn test_length_mismatch() {
        assert_eq!(
            YErrorBars::new(&points(), &[ErrorPair::symmetric(1.0)]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_negative_error_rejected() {
        let errs = [ErrorPair::symmetric(1.0), ErrorPair::new(-0.5, 1.0)];
        assert!(matches!(
            XErrorBars::new(&points(), &errs),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_y_whisker_and_caps() {
        let errs = [ErrorPair::new(1.0, 2.0), ErrorPair::symmetric(0.0)];
        let bars = YErrorBars::new(&points(), &errs).unwrap().cap_width(4.0);
        let shapes = bars.shapes();
        assert_eq!(shapes.len(), 6);
        assert_eq!(
            shapes[0],
            Shape::Segment {
                from: Anchor::data(1.0, 9.0),
                to: Anchor::data(1.0, 12.0),
                line: LineStyle::default(),
            }
        );
        let Shape::Segment { from, to, .. } = &shapes[2] else {
            panic!("expected the upper cap");
        };
        assert_eq!(*from, Anchor::data(1.0, 12.0).nudge(-2.0, 0.0));
        assert_eq!(*to, Anchor::data(1.0, 12.0).nudge(2.0, 0.0));
    }

    #[test]
    fn test_x_whisker_runs_horizontally() {
        let errs = [ErrorPair::symmetric(0.5), ErrorPair::symmetric(0.5)];
        let bars = XErrorBars::new(&points(), &errs).unwrap();
        let Shape::Segment { from, to, .. } = &bars.shapes()[0] else {
            panic!("expected a whisker");
        };
        assert_eq!((from.x, from.y), (0.5, 10.0));
        assert_eq!((to.x, to.y), (1.5, 10.0));
        assert_eq!(bars.data_range(), DataRange::new(0.5, 2.5, 10.0, 20.0));
    }

    #[test]
    fn test_y_data_range_includes_errors() {
        let errs = [ErrorPair::new(1.0, 2.0), ErrorPair::new(3.0, 0.0)];
        let bars = YErrorBars::new(&points(), &errs).unwrap();
        assert_eq!(bars.data_range(), DataRange::new(1.0, 2.0, 9.0, 20.0));
        assert_eq!(bars.glyph_boxes().len(), 4);
    }
}
