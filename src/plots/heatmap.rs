//! Heat maps over regular grids.
//!
//! Each grid node becomes a cell reaching half-way to its neighbours; a lone
//! row or column spans one unit. Cell colors come from a [`Palette`] indexed
//! by the node's z value scaled linearly onto `[0, n-1]` and rounded.
//!
//! # References
//!
//! - Wilkinson, L. (2005). *The Grammar of Graphics*. Springer.

use tracing::{debug, trace};

use crate::color::{Palette, Rgba};
use crate::error::{Error, Result};
use crate::geometry::{Anchor, DataRange, Rect, Shape};
use crate::render::{Canvas, Thumbnailer};
use crate::scale::{scale, Range};
use crate::values::check_finite;

use super::Plotter;

/// A regular grid of z values.
///
/// Column `c` sits at `x(c)` and row `r` at `y(r)`; both must be finite and
/// should increase with the index. `z` may be NaN for missing nodes.
pub trait GridXyz {
    /// `(columns, rows)`.
    fn dims(&self) -> (usize, usize);
    /// Z value at column `c`, row `r`.
    fn z(&self, c: usize, r: usize) -> f64;
    /// X coordinate of column `c`.
    fn x(&self, c: usize) -> f64;
    /// Y coordinate of row `r`.
    fn y(&self, r: usize) -> f64;
}

/// Row-major matrix placed at integer coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")
)]
pub struct UnitGrid {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl UnitGrid {
    /// Build from rows of equal length; row `r` sits at `y = r`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the rows are ragged.
    pub fn new(rows: &[Vec<f64>]) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        for row in rows {
            Error::check_len(cols, row.len())?;
        }
        Ok(Self {
            data: rows.iter().flatten().copied().collect(),
            rows: rows.len(),
            cols,
        })
    }
}

impl TryFrom<Vec<Vec<f64>>> for UnitGrid {
    type Error = Error;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::new(&rows)
    }
}

impl From<UnitGrid> for Vec<Vec<f64>> {
    fn from(grid: UnitGrid) -> Self {
        (0..grid.rows)
            .map(|r| grid.data[r * grid.cols..(r + 1) * grid.cols].to_vec())
            .collect()
    }
}

impl GridXyz for UnitGrid {
    fn dims(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn z(&self, c: usize, r: usize) -> f64 {
        self.data[r * self.cols + c]
    }

    fn x(&self, c: usize) -> f64 {
        c as f64
    }

    fn y(&self, r: usize) -> f64 {
        r as f64
    }
}

/// Low and high edge of every node along one axis.
fn cell_edges(coords: &[f64]) -> Vec<(f64, f64)> {
    match coords {
        [] => return Vec::new(),
        [c] => return vec![(c - 0.5, c + 0.5)],
        _ => {}
    }
    let last = coords.len() - 1;
    (0..coords.len())
        .map(|i| {
            let c = coords[i];
            let lo = if i == 0 {
                c - (coords[1] - c) / 2.0
            } else {
                (coords[i - 1] + c) / 2.0
            };
            let hi = if i == last {
                c + (c - coords[last - 1]) / 2.0
            } else {
                (c + coords[i + 1]) / 2.0
            };
            (lo, hi)
        })
        .collect()
}

/// A heat map snapshot of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatMap {
    xs: Vec<f64>,
    ys: Vec<f64>,
    zs: Vec<f64>,
    palette: Palette,
    z_range: Range,
    underflow: Option<Rgba>,
    overflow: Option<Rgba>,
}

impl HeatMap {
    /// Copy `grid` and color it with `palette`. The z range defaults to the
    /// extent of the non-NaN values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the grid is empty, a coordinate or
    /// z value is infinite, or every z value is NaN.
    pub fn new(grid: &dyn GridXyz, palette: Palette) -> Result<Self> {
        let (cols, rows) = grid.dims();
        if cols == 0 || rows == 0 {
            return Err(Error::invalid("heat map grid is empty"));
        }
        let xs: Vec<f64> = (0..cols).map(|c| grid.x(c)).collect();
        let ys: Vec<f64> = (0..rows).map(|r| grid.y(r)).collect();
        check_finite(xs.iter().chain(&ys).copied())?;

        let zs: Vec<f64> = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (c, r)))
            .map(|(c, r)| grid.z(c, r))
            .collect();
        if zs.iter().any(|z| z.is_infinite()) {
            return Err(Error::invalid("infinite value in heat map grid"));
        }
        let z_range = zs
            .iter()
            .filter(|z| !z.is_nan())
            .fold(None, |acc: Option<Range>, &z| {
                Some(acc.map_or(Range::new(z, z), |r| {
                    Range::new(r.min.min(z), r.max.max(z))
                }))
            })
            .ok_or_else(|| Error::invalid("heat map grid has no values"))?;

        debug!(cols, rows, z_min = z_range.min, z_max = z_range.max, "created heat map");
        Ok(Self {
            xs,
            ys,
            zs,
            palette,
            z_range,
            underflow: None,
            overflow: None,
        })
    }

    /// Map `[min, max]` onto the palette instead of the data extent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if `min > max` or either bound is
    /// not finite.
    pub fn z_range(mut self, min: f64, max: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min > max {
            return Err(Error::config(format!("invalid heat map range [{min}, {max}]")));
        }
        self.z_range = Range::new(min, max);
        Ok(self)
    }

    /// Color for values below the z range.
    #[must_use]
    pub fn underflow(mut self, color: Rgba) -> Self {
        self.underflow = Some(color);
        self
    }

    /// Color for values above the z range.
    #[must_use]
    pub fn overflow(mut self, color: Rgba) -> Self {
        self.overflow = Some(color);
        self
    }

    /// Current z range.
    #[must_use]
    pub fn range(&self) -> Range {
        self.z_range
    }

    /// Palette entry for `z`; `None` outside the z range or for NaN.
    #[must_use]
    pub fn palette_index(&self, z: f64) -> Option<usize> {
        if !self.z_range.contains(z) {
            return None;
        }
        let top = (self.palette.len() - 1) as f64;
        let s = scale(z, self.z_range.min, self.z_range.max, 0.0, top);
        Some((s + 0.5).floor() as usize)
    }

    fn cell_color(&self, z: f64) -> Option<(Option<usize>, Rgba)> {
        if z.is_nan() {
            return None;
        }
        if z < self.z_range.min {
            return self.underflow.map(|c| (None, c));
        }
        if z > self.z_range.max {
            return self.overflow.map(|c| (None, c));
        }
        self.palette_index(z).map(|i| (Some(i), self.palette.get(i)))
    }
}

impl Plotter for HeatMap {
    fn data_range(&self) -> DataRange {
        let xe = cell_edges(&self.xs);
        let ye = cell_edges(&self.ys);
        match (xe.first(), xe.last(), ye.first(), ye.last()) {
            (Some(x0), Some(x1), Some(y0), Some(y1)) => DataRange::new(x0.0, x1.1, y0.0, y1.1),
            _ => DataRange::empty(),
        }
    }

    fn shapes(&self) -> Vec<Shape> {
        let xe = cell_edges(&self.xs);
        let ye = cell_edges(&self.ys);
        let cols = self.xs.len();
        let mut shapes = Vec::with_capacity(self.zs.len());
        for (r, &(y0, y1)) in ye.iter().enumerate() {
            for (c, &(x0, x1)) in xe.iter().enumerate() {
                let z = self.zs[r * cols + c];
                let Some((palette_index, color)) = self.cell_color(z) else {
                    trace!(c, r, z, "skipping heat map cell");
                    continue;
                };
                shapes.push(Shape::Cell {
                    min: Anchor::data(x0, y0),
                    max: Anchor::data(x1, y1),
                    value: z,
                    palette_index,
                    color,
                });
            }
        }
        shapes
    }
}

impl Thumbnailer for HeatMap {
    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
        canvas.fill_rect(area, self.palette.get(self.palette.len() / 2));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[Vec<f64>]) -> UnitGrid {
        UnitGrid::new(rows).unwrap()
    }

    fn indices(hm: &HeatMap) -> Vec<Option<usize>> {
        hm.shapes()
            .iter()
            .map(|s| match s {
                Shape::Cell { palette_index, .. } => *palette_index,
                _ => panic!("expected cells"),
            })
            .collect()
    }

    #[test]
    fn test_ragged_rows_rejected() {
        assert!(matches!(
            UnitGrid::new(&[vec![1.0, 2.0], vec![3.0]]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(UnitGrid::try_from(vec![vec![1.0], vec![]]).is_err());
    }

    #[test]
    fn test_grid_rows_round_trip() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]];
        let grid = UnitGrid::try_from(rows.clone()).unwrap();
        assert_eq!(grid.dims(), (2, 3));
        assert_eq!(grid.z(1, 2), 6.0);
        assert_eq!(Vec::<Vec<f64>>::from(grid), rows);
    }

    #[test]
    fn test_cell_edges_half_way() {
        assert_eq!(cell_edges(&[0.0, 1.0, 3.0]), vec![(-0.5, 0.5), (0.5, 2.0), (2.0, 4.0)]);
        assert_eq!(cell_edges(&[5.0]), vec![(4.5, 5.5)]);
    }

    #[test]
    fn test_palette_indices_linear() {
        let g = grid(&[vec![0.0, 1.0, 2.0, 3.0, 4.0]]);
        let hm = HeatMap::new(&g, Palette::heat(5, 1.0)).unwrap();
        assert_eq!(
            indices(&hm),
            vec![Some(0), Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn test_degenerate_range_uses_middle_entry() {
        let g = grid(&[vec![7.0, 7.0], vec![7.0, 7.0]]);
        let hm = HeatMap::new(&g, Palette::heat(4, 1.0)).unwrap();
        assert!(indices(&hm).iter().all(|i| *i == Some(2)));
        let hm = HeatMap::new(&g, Palette::heat(5, 1.0)).unwrap();
        assert!(indices(&hm).iter().all(|i| *i == Some(2)));
    }

    #[test]
    fn test_nan_cells_skipped() {
        let g = grid(&[vec![0.0, f64::NAN, 2.0]]);
        let hm = HeatMap::new(&g, Palette::heat(3, 1.0)).unwrap();
        assert_eq!(hm.shapes().len(), 2);
    }

    #[test]
    fn test_all_nan_rejected() {
        let g = grid(&[vec![f64::NAN]]);
        assert!(matches!(
            HeatMap::new(&g, Palette::heat(3, 1.0)),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_out_of_range_without_colors_skipped() {
        let g = grid(&[vec![-1.0, 0.5, 2.0]]);
        let hm = HeatMap::new(&g, Palette::heat(3, 1.0))
            .unwrap()
            .z_range(0.0, 1.0)
            .unwrap();
        assert_eq!(indices(&hm), vec![Some(1)]);
    }

    #[test]
    fn test_underflow_and_overflow_colors() {
        let g = grid(&[vec![-1.0, 0.5, 2.0]]);
        let hm = HeatMap::new(&g, Palette::heat(3, 1.0))
            .unwrap()
            .z_range(0.0, 1.0)
            .unwrap()
            .underflow(Rgba::BLUE)
            .overflow(Rgba::RED);
        let shapes = hm.shapes();
        assert_eq!(shapes.len(), 3);
        assert!(matches!(shapes[0], Shape::Cell { color, palette_index: None, .. } if color == Rgba::BLUE));
        assert!(matches!(shapes[2], Shape::Cell { color, palette_index: None, .. } if color == Rgba::RED));
    }

    #[test]
    fn test_inverted_override_rejected() {
        let g = grid(&[vec![0.0, 1.0]]);
        let hm = HeatMap::new(&g, Palette::heat(3, 1.0)).unwrap();
        assert!(matches!(hm.z_range(2.0, 1.0), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_data_range_covers_cells() {
        let g = grid(&[vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]]);
        let hm = HeatMap::new(&g, Palette::heat(3, 1.0)).unwrap();
        assert_eq!(hm.data_range(), DataRange::new(-0.5, 1.5, -0.5, 2.5));
    }
}
