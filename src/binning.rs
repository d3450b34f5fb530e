//! Equal-width binning.
//!
//! Bins are half-open `[min, max)` intervals laid edge to edge; the last bin
//! is closed so the maximum sample is always counted. Edges are computed as
//! `range.min + i * width` so neighbouring bins share bit-identical edges.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::scale::Range;
use crate::values::{check_finite, min_max, Xys};

/// Largest number of bins a layout may produce.
pub const MAX_BINS: usize = 1 << 20;

/// How the bin layout is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinSpec {
    /// Exactly this many bins spanning the range.
    Count(usize),
    /// Bins of this width starting at the range minimum; the last bin ends
    /// at or beyond the range maximum. Samples past the range maximum are
    /// still dropped.
    Width(f64),
}

impl Default for BinSpec {
    fn default() -> Self {
        Self::Count(16)
    }
}

/// A single bin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bin {
    /// Inclusive low edge.
    pub min: f64,
    /// High edge; exclusive except for the last bin.
    pub max: f64,
    /// Accumulated weight (a count for unweighted samples).
    pub weight: f64,
}

/// Binning configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Binner {
    spec: BinSpec,
    range: Option<Range>,
}

impl Binner {
    /// Create a binner with the given layout.
    #[must_use]
    pub fn new(spec: BinSpec) -> Self {
        Self { spec, range: None }
    }

    /// Bin over `[min, max]` instead of the data extent. Samples outside the
    /// range are ignored.
    #[must_use]
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some(Range::new(min, max));
        self
    }

    /// Bin unweighted samples (weight 1 each).
    ///
    /// # Errors
    ///
    /// See [`Binner::bin_weighted`].
    pub fn bin(&self, samples: &[f64]) -> Result<Bins> {
        check_finite(samples.iter().copied())?;
        self.accumulate(samples.iter().map(|&v| (v, 1.0)), min_max(samples))
    }

    /// Bin weighted samples: `x` is the sample, `y` its weight.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] for a zero bin count, a non-positive or
    ///   non-finite width, no samples without an explicit range, or all
    ///   samples identical without an explicit range;
    /// - [`Error::Configuration`] for an explicit range with `min >= max`, a
    ///   span too wide to represent, or a layout of more than [`MAX_BINS`]
    ///   bins.
    pub fn bin_weighted(&self, samples: &Xys) -> Result<Bins> {
        let xs = samples.xs();
        self.accumulate(samples.iter().map(|p| (p.x, p.y)), min_max(&xs))
    }

    fn layout(&self, extent: Option<(f64, f64)>) -> Result<(Range, usize, f64)> {
        let range = match (self.range, extent) {
            (Some(r), _) => {
                if !(r.min.is_finite() && r.max.is_finite()) || r.min >= r.max {
                    return Err(Error::config(format!(
                        "bin range [{}, {}] is empty or not finite",
                        r.min, r.max
                    )));
                }
                r
            }
            (None, Some((min, max))) => {
                if min >= max {
                    return Err(Error::invalid(
                        "all samples are identical; supply an explicit bin range",
                    ));
                }
                Range::new(min, max)
            }
            (None, None) => return Err(Error::invalid("cannot bin an empty sample")),
        };
        if !range.span().is_finite() {
            return Err(Error::config(format!(
                "bin range [{}, {}] is too wide",
                range.min, range.max
            )));
        }

        match self.spec {
            BinSpec::Count(0) => Err(Error::invalid("bin count must be at least 1")),
            BinSpec::Count(n) if n > MAX_BINS => Err(too_many_bins(n as f64)),
            BinSpec::Count(n) => Ok((range, n, range.span() / n as f64)),
            BinSpec::Width(w) if !(w.is_finite() && w > 0.0) => {
                Err(Error::invalid(format!("bin width must be positive, got {w}")))
            }
            BinSpec::Width(w) => {
                let n = (range.span() / w).ceil();
                if n > MAX_BINS as f64 {
                    return Err(too_many_bins(n));
                }
                Ok((range, (n as usize).max(1), w))
            }
        }
    }

    fn accumulate<I>(&self, samples: I, extent: Option<(f64, f64)>) -> Result<Bins>
    where
        I: Iterator<Item = (f64, f64)>,
    {
        let (range, n, width) = self.layout(extent)?;
        let fixed_count = matches!(self.spec, BinSpec::Count(_));
        let edge = |i: usize| {
            if fixed_count && i == n {
                range.max
            } else {
                range.min + i as f64 * width
            }
        };

        let mut bins: Vec<Bin> = (0..n)
            .map(|i| Bin {
                min: edge(i),
                max: edge(i + 1),
                weight: 0.0,
            })
            .collect();

        let mut dropped = 0usize;
        for (v, w) in samples {
            if v < range.min || v > range.max {
                dropped += 1;
                continue;
            }
            let mut i = (((v - range.min) / width).floor() as usize).min(n - 1);
            // Correct for rounding so that edge(i) <= v < edge(i + 1).
            while i + 1 < n && v >= bins[i].max {
                i += 1;
            }
            while i > 0 && v < bins[i].min {
                i -= 1;
            }
            bins[i].weight += w;
        }

        debug!(
            bins = n,
            width,
            min = range.min,
            max = edge(n),
            dropped,
            "binned samples"
        );
        Ok(Bins { bins, width })
    }
}

fn too_many_bins(n: f64) -> Error {
    Error::config(format!("layout needs {n} bins, more than the {MAX_BINS} allowed"))
}

/// The result of binning: contiguous equal-width bins.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bins {
    bins: Vec<Bin>,
    width: f64,
}

impl Bins {
    /// Bins in ascending order.
    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    /// Common bin width (the last bin of a fixed-count layout may differ in
    /// the last ulp).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Sum of all bin weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.bins.iter().map(|b| b.weight).sum()
    }

    /// Lowest and highest edge.
    #[must_use]
    pub fn edges(&self) -> (f64, f64) {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => (first.min, last.max),
            _ => (0.0, 0.0),
        }
    }

    /// Largest bin weight.
    #[must_use]
    pub fn max_weight(&self) -> f64 {
        self.bins.iter().map(|b| b.weight).fold(0.0, f64::max)
    }

    /// Rescale weights so the histogram area (`width * Σweight`) equals
    /// `total`. With `total = 1` the bins form a probability density.
    ///
    /// Applied to the current weights, so calling it twice rescales twice.
    /// A histogram with zero total weight is left unchanged.
    pub fn normalize(&mut self, total: f64) {
        let mass = self.total_weight();
        if mass == 0.0 {
            warn!("normalizing a histogram with zero total weight; left unchanged");
            return;
        }
        let factor = total / (self.width * mass);
        for bin in &mut self.bins {
            bin.weight *= factor;
        }
    }
}
