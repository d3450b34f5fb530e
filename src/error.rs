//! Error types for trueno-plotter operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing a chart component.
///
/// Every chart validates its input eagerly, so these are only ever returned
/// from constructors and `build` methods, never from drawing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Empty or degenerate samples, non-finite values, non-positive bin counts.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two paired sequences have different lengths.
    #[error("Dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch {
        /// Length of the reference sequence.
        expected: usize,
        /// Length of the offending sequence.
        actual: usize,
    },

    /// Nonsensical parameter combination (negative width, stacking cycle, ...).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Returns `Ok(())` when `actual == expected`.
    pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::DimensionMismatch { expected, actual })
        }
    }
}
