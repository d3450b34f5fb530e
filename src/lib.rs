//! # Trueno-Plotter
//!
//! Statistical chart components that turn numeric datasets into drawable
//! geometry: box plots, quartile plots, bar charts (grouped and stacked),
//! histograms, bubble charts, heat maps, error bars and outlier labels.
//!
//! The crate computes; it never rasterizes. Every chart emits [`Shape`]s in
//! data coordinates which a caller-supplied
//! [`CoordinateMapper`](render::CoordinateMapper) and
//! [`Canvas`](render::Canvas) turn into pixels, vectors or anything else.
//!
//! ## Quick Start
//!
//! ```rust
//! use trueno_plotter::prelude::*;
//!
//! let bp = BoxPlot::new(20.0, 0.0, &[1.0, 2.0, 3.0, 4.0, 5.0, 100.0])?;
//! assert_eq!(bp.summary().median, 3.5);
//! assert_eq!(bp.summary().outlier_values(), vec![100.0]);
//!
//! let mut canvas = Recorder::default();
//! let mapper = AffineMapper::fit(bp.data_range(), Rect::new(0.0, 0.0, 200.0, 100.0));
//! bp.draw(&mut canvas, &mapper);
//! assert!(!canvas.shapes().is_empty());
//! # Ok::<(), trueno_plotter::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for data, summary and style types
//!
//! ## Academic References
//!
//! - Tukey, J. W. (1977). *Exploratory Data Analysis*. Addison-Wesley.
//! - McGill, R., Tukey, J. W., & Larsen, W. A. (1978). "Variations of Box Plots."
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// unwrap()/expect() are denied outside tests by the workspace lint table
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::float_cmp)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and palettes.
pub mod color;

/// Data-space shapes, device-space rectangles and ranges.
pub mod geometry;

/// Scalar interpolation for data-to-attribute mappings.
pub mod scale;

/// Validated numeric sequences.
pub mod values;

// ============================================================================
// Statistics Modules
// ============================================================================

/// Quartile and outlier statistics.
pub mod stats;

/// Equal-width histogram binning.
pub mod binning;

/// Bar grouping and stacking.
pub mod stacking;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Chart components (box, bar, histogram, heat map, ...).
pub mod plots;

/// Canvas, coordinate mapping and legend interfaces.
pub mod render;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for trueno-plotter operations.
pub mod error;

pub use error::{Error, Result};
pub use geometry::Shape;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use trueno_plotter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::binning::{BinSpec, Binner, Bins};
    pub use crate::color::{Hsla, Palette, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{
        Anchor, DataRange, GlyphBox, GlyphStyle, LineStyle, Orientation, Point, Rect, Shape,
    };
    pub use crate::plots::{
        BarChart, BoxPlot, Bubbles, Chart, ErrorPair, GridXyz, HeatMap, Histogram, Labels,
        Plotter, QuartPlot, UnitGrid, XErrorBars, YErrorBars,
    };
    pub use crate::render::{
        AffineMapper, Canvas, CoordinateMapper, Legend, NominalAxis, Recorder, Thumbnailer,
    };
    pub use crate::scale::{scale, LinearScale, Range, Scale};
    pub use crate::stacking::{ResolvedBars, SeriesId, SeriesRegistry};
    pub use crate::stats::QuartileSummary;
    pub use crate::values::{ValueLabels, Values, Xys, Xyzs};
}

// ============================================================================
// Tests
// ============================================================================
