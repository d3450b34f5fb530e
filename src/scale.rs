//! Scalar interpolators for data-to-attribute mappings.
//!
//! Maps a z-like attribute (bubble radius, heat-map palette index) from a
//! source range onto a destination range. The mapping is strictly linear;
//! a degenerate source range (`min == max`) maps every value to the middle
//! of the destination range.

use crate::error::{Error, Result};
use crate::values::min_max;

/// Linearly map `value` from `[src_min, src_max]` onto `[dst_min, dst_max]`.
///
/// Values outside the source range extrapolate. When the source range is
/// degenerate the midpoint of the destination range is returned.
#[must_use]
pub fn scale(value: f64, src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> f64 {
    if src_min == src_max {
        return (dst_min + dst_max) / 2.0;
    }
    dst_min + (value - src_min) / (src_max - src_min) * (dst_max - dst_min)
}

/// Like [`scale`], but values outside `[src_min, src_max]` clamp to the
/// nearest destination bound.
#[must_use]
pub fn scale_clamped(value: f64, src_min: f64, src_max: f64, dst_min: f64, dst_max: f64) -> f64 {
    let (lo, hi) = if src_min <= src_max {
        (src_min, src_max)
    } else {
        (src_max, src_min)
    };
    let v = if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    };
    scale(v, src_min, src_max, dst_min, dst_max)
}

/// A closed `[min, max]` interval; `min` may equal `max`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl Range {
    /// Create a range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Extent of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `data` is empty.
    pub fn from_data(data: &[f64]) -> Result<Self> {
        let (min, max) =
            min_max(data).ok_or_else(|| Error::invalid("cannot derive a range from no data"))?;
        Ok(Self { min, max })
    }

    /// True when `min == max`.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Middle of the range.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Length of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `value` lies inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Trait for scale functions that map domain values to range values.
pub trait Scale {
    /// Transform a domain value to a range value.
    fn scale(&self, value: f64) -> f64;

    /// Get the domain extent.
    fn domain(&self) -> Range;

    /// Get the range extent.
    fn range(&self) -> Range;
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearScale {
    domain: Range,
    range: Range,
    clamp: bool,
}

impl LinearScale {
    /// Create a new linear scale. A degenerate domain is allowed.
    #[must_use]
    pub const fn new(domain: Range, range: Range) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// Create a scale whose domain is the extent of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `data` is empty.
    pub fn from_data(data: &[f64], range: Range) -> Result<Self> {
        Ok(Self::new(Range::from_data(data)?, range))
    }

    /// Clamp out-of-domain values instead of extrapolating.
    #[must_use]
    pub fn clamped(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }
}

impl Scale for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let Range { min: s0, max: s1 } = self.domain;
        let Range { min: d0, max: d1 } = self.range;
        if self.clamp {
            scale_clamped(value, s0, s1, d0, d1)
        } else {
            scale(value, s0, s1, d0, d1)
        }
    }

    fn domain(&self) -> Range {
        self.domain
    }

    fn range(&self) -> Range {
        self.range
    }
}
