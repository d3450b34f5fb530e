//! Histogram plot.
//!
//! One rectangle per bin, from zero to the bin weight. Binning itself lives
//! in [`crate::binning`]; this module only turns [`Bins`] into shapes.
//!
//! # References
//!
//! - Scott, D. W. (1979). "On optimal and data-based histograms."
//!   *Biometrika*, 66(3), 605-610.

use crate::binning::{BinSpec, Binner, Bins};
use crate::color::Rgba;
use crate::error::Result;
use crate::geometry::{Anchor, DataRange, LineStyle, Rect, Shape};
use crate::render::{Canvas, Thumbnailer};
use crate::values::Xys;

use super::Plotter;

/// A binned histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Bins,
    fill: Option<Rgba>,
    line: Option<LineStyle>,
}

impl Histogram {
    /// Bin unweighted samples.
    ///
    /// # Errors
    ///
    /// See [`Binner::bin_weighted`].
    pub fn new(samples: &[f64], spec: BinSpec) -> Result<Self> {
        Binner::new(spec).bin(samples).map(Self::from_bins)
    }

    /// Bin weighted samples (`x` sample, `y` weight).
    ///
    /// # Errors
    ///
    /// See [`Binner::bin_weighted`].
    pub fn weighted(samples: &Xys, spec: BinSpec) -> Result<Self> {
        Binner::new(spec).bin_weighted(samples).map(Self::from_bins)
    }

    /// Wrap pre-computed bins, e.g. from a [`Binner`] with an explicit range.
    #[must_use]
    pub fn from_bins(bins: Bins) -> Self {
        Self {
            bins,
            fill: Some(Rgba::rgb(128, 128, 128)),
            line: Some(LineStyle::default()),
        }
    }

    /// Scale weights so the total area equals `total`.
    #[must_use]
    pub fn normalize(mut self, total: f64) -> Self {
        self.bins.normalize(total);
        self
    }

    /// Fill color of the bins; `None` leaves them hollow.
    #[must_use]
    pub fn fill(mut self, color: Option<Rgba>) -> Self {
        self.fill = color;
        self
    }

    /// Outline of the bins.
    #[must_use]
    pub fn line_style(mut self, line: Option<LineStyle>) -> Self {
        self.line = line;
        self
    }

    /// The underlying bins.
    #[must_use]
    pub fn bins(&self) -> &Bins {
        &self.bins
    }
}

impl Plotter for Histogram {
    fn data_range(&self) -> DataRange {
        let (x_min, x_max) = self.bins.edges();
        self.bins
            .bins()
            .iter()
            .fold(DataRange::new(x_min, x_max, 0.0, 0.0), |r, b| {
                r.include(b.min, b.weight)
            })
    }

    fn shapes(&self) -> Vec<Shape> {
        self.bins
            .bins()
            .iter()
            .map(|b| Shape::Rect {
                min: Anchor::data(b.min, 0.0),
                max: Anchor::data(b.max, b.weight),
                fill: self.fill,
                line: self.line,
            })
            .collect()
    }
}

impl Thumbnailer for Histogram {
    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
        if let Some(color) = self.fill {
            canvas.fill_rect(area, color);
        }
        if let Some(line) = self.line {
            canvas.stroke_rect(area, line);
        }
    }
}
