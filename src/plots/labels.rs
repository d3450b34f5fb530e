//! Text labels anchored at data points.
//!
//! Used standalone or produced by [`BoxPlot::outside_labels`](super::BoxPlot::outside_labels)
//! to name outliers.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::{Anchor, DataRange, GlyphBox, Orientation, Rect, Shape};
use crate::render::{Canvas, Thumbnailer};
use crate::values::Xys;

use super::Plotter;

/// A set of text labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    items: Vec<(Anchor, String)>,
    orientation: Orientation,
    color: Rgba,
}

impl Labels {
    /// One label per point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if `texts` and `points` differ in
    /// length.
    pub fn new<S: Into<String>>(points: &Xys, texts: Vec<S>) -> Result<Self> {
        Error::check_len(points.len(), texts.len())?;
        let items = points
            .iter()
            .zip(texts)
            .map(|(p, t)| (Anchor::data(p.x, p.y), t.into()))
            .collect();
        Ok(Self::from_anchors(items, Orientation::Vertical))
    }

    pub(crate) fn from_anchors(items: Vec<(Anchor, String)>, orientation: Orientation) -> Self {
        Self {
            items,
            orientation,
            color: Rgba::BLACK,
        }
    }

    /// Set the text color.
    #[must_use]
    pub fn color(mut self, color: Rgba) -> Self {
        self.color = color;
        self
    }

    /// Shift every label by a device offset.
    #[must_use]
    pub fn offset(mut self, dx: f64, dy: f64) -> Self {
        for (at, _) in &mut self.items {
            *at = at.nudge(dx, dy);
        }
        self
    }

    /// Stagger labels whose value coordinates lie closer than `min_sep`.
    ///
    /// Labels are visited in value order. Each label within `min_sep` of
    /// the previous one is pushed `step` device units further across the
    /// category axis than that one; a gap resets the stagger.
    #[must_use]
    pub fn nudge_overlapping(mut self, min_sep: f64, step: f64) -> Self {
        let orientation = self.orientation;
        let value_of = |a: &Anchor| match orientation {
            Orientation::Vertical => a.y,
            Orientation::Horizontal => a.x,
        };
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by(|&i, &j| value_of(&self.items[i].0).total_cmp(&value_of(&self.items[j].0)));

        let mut previous: Option<f64> = None;
        let mut stagger = 0u32;
        for i in order {
            let v = value_of(&self.items[i].0);
            stagger = match previous {
                Some(p) if (v - p).abs() < min_sep => stagger + 1,
                _ => 0,
            };
            previous = Some(v);
            let shift = f64::from(stagger) * step;
            let (dx, dy) = orientation.xy(shift, 0.0);
            self.items[i].0 = self.items[i].0.nudge(dx, dy);
        }
        self
    }

    /// Label texts in order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|(_, t)| t.as_str()).collect()
    }

    /// Label anchors in order.
    #[must_use]
    pub fn anchors(&self) -> Vec<Anchor> {
        self.items.iter().map(|(a, _)| *a).collect()
    }

    /// Number of labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there are no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Plotter for Labels {
    fn data_range(&self) -> DataRange {
        self.items
            .iter()
            .fold(DataRange::empty(), |r, (a, _)| r.include(a.x, a.y))
    }

    fn shapes(&self) -> Vec<Shape> {
        self.items
            .iter()
            .map(|(at, text)| Shape::Label {
                at: *at,
                text: text.clone(),
                color: self.color,
            })
            .collect()
    }

    fn glyph_boxes(&self) -> Vec<GlyphBox> {
        self.items
            .iter()
            .map(|(a, _)| GlyphBox {
                x: a.x,
                y: a.y,
                rect: Rect::new(a.dx, a.dy, 0.0, 0.0),
            })
            .collect()
    }
}

impl Thumbnailer for Labels {
    fn thumbnail(&self, _canvas: &mut dyn Canvas, _area: Rect) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(points: &[(f64, f64)]) -> Labels {
        let xys = Xys::new(points).unwrap();
        let texts: Vec<String> = (0..points.len()).map(|i| format!("p{i}")).collect();
        Labels::new(&xys, texts).unwrap()
    }

    #[test]
    fn test_length_mismatch() {
        let xys = Xys::new(&[(0.0, 0.0)]).unwrap();
        assert_eq!(
            Labels::new(&xys, vec!["a", "b"]),
            Err(Error::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_shapes_in_order() {
        let l = labels(&[(1.0, 2.0), (3.0, 4.0)]);
        let shapes = l.shapes();
        assert_eq!(shapes.len(), 2);
        assert!(matches!(&shapes[1], Shape::Label { text, .. } if text == "p1"));
        assert_eq!(l.data_range(), DataRange::new(1.0, 3.0, 2.0, 4.0));
    }

    #[test]
    fn test_nudge_staggers_close_labels() {
        let l = labels(&[(0.0, 10.0), (0.0, 10.1), (0.0, 50.0), (0.0, 10.2)])
            .nudge_overlapping(0.5, 6.0);
        let dx: Vec<f64> = l.anchors().iter().map(|a| a.dx).collect();
        assert_eq!(dx, vec![0.0, 6.0, 0.0, 12.0]);
    }

    #[test]
    fn test_nudge_identical_values() {
        let l = labels(&[(0.0, 1.0); 3]).nudge_overlapping(1.0, 2.0);
        let mut dx: Vec<f64> = l.anchors().iter().map(|a| a.dx).collect();
        dx.sort_by(f64::total_cmp);
        assert_eq!(dx, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn test_nudge_empty() {
        assert!(labels(&[]).nudge_overlapping(1.0, 1.0).is_empty());
    }
}
