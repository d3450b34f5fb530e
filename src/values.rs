//! Sample containers.
//!
//! Every container copies its input and rejects NaN and infinite values, so
//! downstream statistics never have to reason about non-finite samples.
//! Insertion order is preserved and duplicates are allowed.

use std::ops::Deref;

use crate::error::{Error, Result};

/// Fails with [`Error::InvalidInput`] on the first NaN or infinite value.
pub fn check_finite<I>(values: I) -> Result<()>
where
    I: IntoIterator<Item = f64>,
{
    for (i, v) in values.into_iter().enumerate() {
        if v.is_nan() {
            return Err(Error::invalid(format!("NaN value at index {i}")));
        }
        if v.is_infinite() {
            return Err(Error::invalid(format!("infinite value at index {i}")));
        }
    }
    Ok(())
}

/// Minimum and maximum of a slice, or `None` when empty.
#[must_use]
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
}

/// An ordered sequence of finite samples.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>"))]
pub struct Values(Vec<f64>);

impl Values {
    /// Copy `values`, rejecting non-finite entries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if any value is NaN or infinite.
    pub fn new(values: &[f64]) -> Result<Self> {
        check_finite(values.iter().copied())?;
        Ok(Self(values.to_vec()))
    }

    /// Underlying samples.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Minimum and maximum sample, or `None` when empty.
    #[must_use]
    pub fn min_max(&self) -> Option<(f64, f64)> {
        min_max(&self.0)
    }
}

impl Deref for Values {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl TryFrom<Vec<f64>> for Values {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        check_finite(values.iter().copied())?;
        Ok(Self(values))
    }
}

/// A sample paired with a display label.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueLabel {
    /// Sample value.
    pub value: f64,
    /// Label shown when the sample is drawn individually.
    pub label: String,
}

impl ValueLabel {
    /// Create a labelled sample.
    #[must_use]
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// An ordered sequence of labelled samples.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<ValueLabel>"))]
pub struct ValueLabels(Vec<ValueLabel>);

impl ValueLabels {
    /// Take ownership of labelled samples, rejecting non-finite values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if any value is NaN or infinite.
    pub fn new(items: Vec<ValueLabel>) -> Result<Self> {
        check_finite(items.iter().map(|vl| vl.value))?;
        Ok(Self(items))
    }

    /// Build from `(value, label)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if any value is NaN or infinite.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (f64, S)>) -> Result<Self> {
        Self::new(
            pairs
                .into_iter()
                .map(|(value, label)| ValueLabel::new(value, label))
                .collect(),
        )
    }

    /// Values only, in insertion order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(|vl| vl.value).collect()
    }

    /// Label of the sample at `index`.
    #[must_use]
    pub fn label(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(|vl| vl.label.as_str())
    }
}

impl TryFrom<Vec<ValueLabel>> for ValueLabels {
    type Error = Error;

    fn try_from(items: Vec<ValueLabel>) -> Result<Self> {
        Self::new(items)
    }
}

impl Deref for ValueLabels {
    type Target = [ValueLabel];

    fn deref(&self) -> &[ValueLabel] {
        &self.0
    }
}

/// A point in data space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xy {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

/// An ordered sequence of finite points.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Xy>"))]
pub struct Xys(Vec<Xy>);

impl Xys {
    /// Copy `(x, y)` pairs, rejecting non-finite coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if any coordinate is NaN or infinite.
    pub fn new(points: &[(f64, f64)]) -> Result<Self> {
        check_finite(points.iter().flat_map(|&(x, y)| [x, y]))?;
        Ok(Self(points.iter().map(|&(x, y)| Xy { x, y }).collect()))
    }

    /// Pair two equal-length coordinate slices.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the slices differ in length and
    /// [`Error::InvalidInput`] on non-finite coordinates.
    pub fn from_columns(xs: &[f64], ys: &[f64]) -> Result<Self> {
        Error::check_len(xs.len(), ys.len())?;
        let pairs: Vec<(f64, f64)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        Self::new(&pairs)
    }

    /// X coordinates in order.
    #[must_use]
    pub fn xs(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.x).collect()
    }

    /// Y coordinates in order.
    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.0.iter().map(|p| p.y).collect()
    }
}

impl TryFrom<Vec<Xy>> for Xys {
    type Error = Error;

    fn try_from(points: Vec<Xy>) -> Result<Self> {
        check_finite(points.iter().flat_map(|p| [p.x, p.y]))?;
        Ok(Self(points))
    }
}

impl Deref for Xys {
    type Target = [Xy];

    fn deref(&self) -> &[Xy] {
        &self.0
    }
}

/// A point with a third scalar attribute (e.g. bubble size).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Xyz {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Scalar attribute.
    pub z: f64,
}

/// An ordered sequence of finite triples.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Xyz>"))]
pub struct Xyzs(Vec<Xyz>);

impl Xyzs {
    /// Copy `(x, y, z)` triples, rejecting non-finite components.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if any component is NaN or infinite.
    pub fn new(triples: &[(f64, f64, f64)]) -> Result<Self> {
        check_finite(triples.iter().flat_map(|&(x, y, z)| [x, y, z]))?;
        Ok(Self(triples.iter().map(|&(x, y, z)| Xyz { x, y, z }).collect()))
    }
}

impl TryFrom<Vec<Xyz>> for Xyzs {
    type Error = Error;

    fn try_from(triples: Vec<Xyz>) -> Result<Self> {
        check_finite(triples.iter().flat_map(|t| [t.x, t.y, t.z]))?;
        Ok(Self(triples))
    }
}

impl Deref for Xyzs {
    type Target = [Xyz];

    fn deref(&self) -> &[Xyz] {
        &self.0
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_values_round_trip() {
        let v = Values::new(&[3.0, 1.0, 3.0]).unwrap();
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[3.0,1.0,3.0]");
        assert_eq!(serde_json::from_str::<Values>(&json).unwrap(), v);
    }

    #[test]
    fn test_deserialize_rejects_non_finite() {
        use serde::de::value::{Error as DeError, SeqDeserializer};
        use serde::Deserialize;

        let seq = SeqDeserializer::<_, DeError>::new(vec![1.0, f64::INFINITY].into_iter());
        let err = Values::deserialize(seq).unwrap_err();
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn test_xys_round_trip() {
        let xys = Xys::new(&[(0.0, 1.0), (2.0, 3.0)]).unwrap();
        let json = serde_json::to_string(&xys).unwrap();
        assert_eq!(serde_json::from_str::<Xys>(&json).unwrap(), xys);
    }
}
