//! Quartile and outlier statistics.
//!
//! Implements the Tukey box-plot summary:
//!
//! - the median of an even-length sample is the mean of the two central values;
//! - Q1 and Q3 are medians of the lower and upper halves, with the median
//!   element excluded from both halves when the sample length is odd;
//! - whiskers end at the most extreme *actual* samples within
//!   `1.5 * IQR` of the quartiles (the adjacent values);
//! - anything strictly beyond the adjacent values is an outlier.
//!
//! # References
//!
//! - Tukey, J. W. (1977). *Exploratory Data Analysis*. Addison-Wesley.

use tracing::debug;

use crate::error::{Error, Result};
use crate::values::{check_finite, ValueLabels};

/// Multiplier applied to the IQR to place the whisker fences.
pub const FENCE_FACTOR: f64 = 1.5;

/// A sample lying beyond the adjacent values.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outlier {
    /// Position of the sample in the original input.
    pub index: usize,
    /// Sample value.
    pub value: f64,
    /// Label of the sample, when the input was labelled.
    pub label: Option<String>,
}

/// Five-number summary plus outliers.
///
/// A snapshot of the sample it was computed from; recompute it explicitly if
/// the sample changes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuartileSummary {
    /// Median (50th percentile).
    pub median: f64,
    /// First quartile.
    pub q1: f64,
    /// Third quartile.
    pub q3: f64,
    /// Interquartile range (Q3 - Q1).
    pub iqr: f64,
    /// Lowest sample at or above `q1 - 1.5 * iqr`.
    pub adj_low: f64,
    /// Highest sample at or below `q3 + 1.5 * iqr`.
    pub adj_high: f64,
    /// Samples beyond the adjacent values, in original input order.
    pub outliers: Vec<Outlier>,
}

impl QuartileSummary {
    /// Summarize unlabelled samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `values` is empty or contains a
    /// non-finite value.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        check_finite(values.iter().copied())?;
        Self::compute(values, None)
    }

    /// Summarize labelled samples; outliers carry their labels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `values` is empty.
    pub fn from_labelled(values: &ValueLabels) -> Result<Self> {
        Self::compute(&values.values(), Some(values))
    }

    fn compute(values: &[f64], labels: Option<&ValueLabels>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::invalid("cannot summarize an empty sample"));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let median = median_of_sorted(&sorted).unwrap_or(sorted[0]);
        let (lower, upper) = halves(&sorted);
        let q1 = median_of_sorted(lower).unwrap_or(median);
        let q3 = median_of_sorted(upper).unwrap_or(median);
        let iqr = q3 - q1;

        let low_fence = q1 - FENCE_FACTOR * iqr;
        let high_fence = q3 + FENCE_FACTOR * iqr;

        let mut adj_low = f64::INFINITY;
        let mut adj_high = f64::NEG_INFINITY;
        let mut outliers = Vec::new();
        for (index, &value) in values.iter().enumerate() {
            if value < low_fence || value > high_fence {
                outliers.push(Outlier {
                    index,
                    value,
                    label: labels.and_then(|l| l.label(index)).map(str::to_owned),
                });
                continue;
            }
            adj_low = adj_low.min(value);
            adj_high = adj_high.max(value);
        }

        // The central samples always sit inside the fences, so the adjacent
        // values are finite whenever n >= 1.
        debug!(n, median, q1, q3, outliers = outliers.len(), "computed quartile summary");

        Ok(Self {
            median,
            q1,
            q3,
            iqr,
            adj_low,
            adj_high,
            outliers,
        })
    }

    /// Lowest and highest value drawn for this summary, outliers included.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        self.outliers
            .iter()
            .fold((self.adj_low, self.adj_high), |(lo, hi), o| {
                (lo.min(o.value), hi.max(o.value))
            })
    }

    /// Outlier values in original input order.
    #[must_use]
    pub fn outlier_values(&self) -> Vec<f64> {
        self.outliers.iter().map(|o| o.value).collect()
    }
}

/// Median of an already sorted slice, or `None` when empty.
///
/// The two central values are halved before adding so the mean stays finite
/// near `f64::MAX`, then clamped between them.
#[must_use]
pub fn median_of_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 1 => Some(sorted[n / 2]),
        _ => {
            let (a, b) = (sorted[n / 2 - 1], sorted[n / 2]);
            Some((a / 2.0 + b / 2.0).max(a).min(b))
        }
    }
}

/// Lower and upper halves, excluding the middle element for odd lengths.
fn halves(sorted: &[f64]) -> (&[f64], &[f64]) {
    let n = sorted.len();
    let upper_start = if n % 2 == 1 { n / 2 + 1 } else { n / 2 };
    (&sorted[..n / 2], &sorted[upper_start..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_odd_sample() {
        let s = QuartileSummary::from_values(&[9.0, 1.0, 5.0, 3.0, 7.0, 2.0, 8.0, 4.0, 6.0]).unwrap();
        assert_eq!(s.median, 5.0);
        // halves [1,2,3,4] and [6,7,8,9]
        assert_eq!(s.q1, 2.5);
        assert_eq!(s.q3, 7.5);
        assert_eq!(s.iqr, 5.0);
        assert_eq!(s.adj_low, 1.0);
        assert_eq!(s.adj_high, 9.0);
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn test_even_sample_with_outlier() {
        let s = QuartileSummary::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(s.median, 3.5);
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.q3, 5.0);
        assert_eq!(s.adj_low, 1.0);
        assert_eq!(s.adj_high, 5.0);
        assert_eq!(s.outlier_values(), vec![100.0]);
        assert_eq!(s.outliers[0].index, 5);
    }

    #[test]
    fn test_single_sample() {
        let s = QuartileSummary::from_values(&[42.0]).unwrap();
        assert_eq!(s.median, 42.0);
        assert_eq!(s.q1, 42.0);
        assert_eq!(s.q3, 42.0);
        assert_eq!(s.iqr, 0.0);
        assert_eq!(s.adj_low, 42.0);
        assert_eq!(s.adj_high, 42.0);
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn test_two_samples() {
        let s = QuartileSummary::from_values(&[4.0, 2.0]).unwrap();
        assert_eq!(s.median, 3.0);
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.q3, 4.0);
    }

    #[test]
    fn test_three_samples_exclude_median() {
        let s = QuartileSummary::from_values(&[1.0, 2.0, 10.0]).unwrap();
        assert_eq!(s.median, 2.0);
        assert_eq!(s.q1, 1.0);
        assert_eq!(s.q3, 10.0);
    }

    #[test]
    fn test_whisker_snaps_to_actual_sample() {
        // q1 = 2, q3 = 4, fences at -1 and 7; nearest inside samples are 1 and 6
        let s = QuartileSummary::from_values(&[1.0, 2.0, 2.0, 3.0, 4.0, 4.0, 6.0]).unwrap();
        assert_eq!(s.q1, 2.0);
        assert_eq!(s.q3, 4.0);
        assert_eq!(s.adj_low, 1.0);
        assert_eq!(s.adj_high, 6.0);
        assert_relative_eq!(s.q3 + FENCE_FACTOR * s.iqr, 7.0);
    }

    #[test]
    fn test_outliers_keep_input_order_and_labels() {
        let vl = ValueLabels::from_pairs([
            (50.0, "hi"),
            (1.0, "a"),
            (2.0, "b"),
            (3.0, "c"),
            (4.0, "d"),
            (-40.0, "lo"),
        ])
        .unwrap();
        let s = QuartileSummary::from_labelled(&vl).unwrap();
        let labels: Vec<_> = s.outliers.iter().map(|o| o.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("hi"), Some("lo")]);
        assert_eq!(s.outliers[0].index, 0);
        assert_eq!(s.outliers[1].index, 5);
        assert_eq!(s.extent(), (-40.0, 50.0));
    }

    #[test]
    fn test_empty_is_invalid() {
        assert!(matches!(
            QuartileSummary::from_values(&[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_nan_is_invalid() {
        assert!(QuartileSummary::from_values(&[1.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_all_identical() {
        let s = QuartileSummary::from_values(&[3.0; 7]).unwrap();
        assert_eq!((s.q1, s.median, s.q3), (3.0, 3.0, 3.0));
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn test_extreme_magnitudes_stay_ordered() {
        let s = QuartileSummary::from_values(&[f64::MAX, f64::MAX]).unwrap();
        assert_eq!((s.q1, s.median, s.q3), (f64::MAX, f64::MAX, f64::MAX));

        let s = QuartileSummary::from_values(&[-f64::MAX, f64::MAX]).unwrap();
        assert_eq!(s.median, 0.0);
        assert!(s.q1 <= s.median && s.median <= s.q3);
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn test_median_of_sorted() {
        assert_eq!(median_of_sorted(&[]), None);
        assert_eq!(median_of_sorted(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }
}
