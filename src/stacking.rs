//! Grouping and stacking of bar series.
//!
//! Grouping is positional: each series sits at a run of categorical
//! positions and may be shifted sideways by a caller-chosen device offset.
//! Nothing is auto-packed; two series at the same category only avoid each
//! other if their offsets and widths say so.
//!
//! Stacking is a parent-pointer relation held by index in a
//! [`SeriesRegistry`]. A stacked series starts each bar where its parent's
//! bar ends, so chains `A <- B <- C` accumulate. Cycles are rejected when
//! the relation is declared.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Error, Result};
use crate::plots::BarChart;

/// Index of a series inside a [`SeriesRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesId(usize);

impl SeriesId {
    /// Position in the registry.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Where a series sits on the categorical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesPosition {
    /// Category of the first value; value `i` sits at `category + i`.
    pub category: f64,
    /// Lateral device offset; positive moves right (vertical charts) or up
    /// (horizontal charts).
    pub offset: f64,
    /// Series this one is stacked on, if any.
    pub stack_base: Option<SeriesId>,
}

impl SeriesPosition {
    /// Position at `category` with no offset and no stacking.
    #[must_use]
    pub const fn at(category: f64) -> Self {
        Self {
            category,
            offset: 0.0,
            stack_base: None,
        }
    }

    /// Device center of a glyph whose category maps to `mapped_category`.
    #[must_use]
    pub fn center(&self, mapped_category: f64) -> f64 {
        mapped_category + self.offset
    }

    /// Lateral device extent `(low, high)` of a glyph `width` wide,
    /// relative to the mapped category.
    #[must_use]
    pub fn lateral_span(&self, width: f64) -> (f64, f64) {
        (self.offset - width / 2.0, self.offset + width / 2.0)
    }

    /// Category of the value at `index`.
    #[must_use]
    pub fn category_of(&self, index: usize) -> f64 {
        self.category + index as f64
    }
}

/// Owns bar series and the "stacked on" relation between them.
#[derive(Debug, Clone, Default)]
pub struct SeriesRegistry {
    series: Vec<BarChart>,
}

impl SeriesRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a series and return its id. Any stacking declared on the chart
    /// before registration is discarded.
    pub fn push(&mut self, mut chart: BarChart) -> SeriesId {
        chart.position_mut().stack_base = None;
        self.series.push(chart);
        SeriesId(self.series.len() - 1)
    }

    /// Number of registered series.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True when no series are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Series by id.
    #[must_use]
    pub fn get(&self, id: SeriesId) -> Option<&BarChart> {
        self.series.get(id.0)
    }

    fn lookup(&self, id: SeriesId) -> Result<&BarChart> {
        self.get(id)
            .ok_or_else(|| Error::config(format!("unknown series {}", id.0)))
    }

    /// Stack `child` on top of `parent`.
    ///
    /// The child takes over the parent's first category, lateral offset and
    /// orientation so the bars line up.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if either id is unknown, the ids are equal,
    ///   or the relation would form a cycle;
    /// - [`Error::DimensionMismatch`] if the series differ in length.
    pub fn stack_on(&mut self, child: SeriesId, parent: SeriesId) -> Result<()> {
        if child == parent {
            return Err(Error::config("a series cannot be stacked on itself"));
        }
        let parent_chart = self.lookup(parent)?;
        let child_chart = self.lookup(child)?;
        Error::check_len(parent_chart.values().len(), child_chart.values().len())?;

        if self.chain(parent)?.contains(&child) {
            return Err(Error::config(format!(
                "stacking series {} on {} would form a cycle",
                child.0, parent.0
            )));
        }

        let position = parent_chart.position();
        let orientation = parent_chart.orientation_of();
        let chart = &mut self.series[child.0];
        chart.set_orientation(orientation);
        let pos = chart.position_mut();
        pos.category = position.category;
        pos.offset = position.offset;
        pos.stack_base = Some(parent);

        debug!(child = child.0, parent = parent.0, "stacked series");
        Ok(())
    }

    /// `id` followed by every series below it, nearest first.
    fn chain(&self, id: SeriesId) -> Result<Vec<SeriesId>> {
        let mut visited = HashSet::new();
        let mut chain = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            if !visited.insert(cur) {
                return Err(Error::config(format!(
                    "stacking cycle through series {}",
                    cur.0
                )));
            }
            chain.push(cur);
            current = self.lookup(cur)?.position().stack_base;
        }
        Ok(chain)
    }

    /// Height at which bar `index` of `id` starts: the cumulative top of
    /// every series beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unknown id.
    pub fn stack_base(&self, id: SeriesId, index: usize) -> Result<f64> {
        let chain = self.chain(id)?;
        Ok(chain[1..]
            .iter()
            .filter_map(|s| self.series[s.0].values().get(index))
            .sum())
    }

    /// Snapshot `id` together with its resolved baselines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an unknown id.
    pub fn resolve(&self, id: SeriesId) -> Result<ResolvedBars> {
        let chart = self.lookup(id)?;
        let bases = (0..chart.values().len())
            .map(|i| self.stack_base(id, i))
            .collect::<Result<Vec<_>>>()?;
        Ok(ResolvedBars {
            chart: chart.clone(),
            bases,
        })
    }

    /// Resolve every series in registration order.
    ///
    /// # Errors
    ///
    /// See [`SeriesRegistry::resolve`].
    pub fn resolve_all(&self) -> Result<Vec<ResolvedBars>> {
        (0..self.series.len())
            .map(|i| self.resolve(SeriesId(i)))
            .collect()
    }
}

/// A bar series with its baselines fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBars {
    chart: BarChart,
    bases: Vec<f64>,
}

impl ResolvedBars {
    /// A series drawn from zero.
    #[must_use]
    pub fn unstacked(chart: BarChart) -> Self {
        let bases = vec![0.0; chart.values().len()];
        Self { chart, bases }
    }

    /// The underlying series.
    #[must_use]
    pub fn chart(&self) -> &BarChart {
        &self.chart
    }

    /// Baseline of each bar.
    #[must_use]
    pub fn bases(&self) -> &[f64] {
        &self.bases
    }

    /// Top of each bar (`base + value`).
    #[must_use]
    pub fn tops(&self) -> Vec<f64> {
        self.bases
            .iter()
            .zip(self.chart.values().iter())
            .map(|(b, v)| b + v)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bars(values: &[f64]) -> BarChart {
        BarChart::new(values, 10.0).unwrap()
    }

    #[test]
    fn test_lateral_span() {
        let pos = SeriesPosition {
            offset: -4.0,
            ..SeriesPosition::at(2.0)
        };
        assert_eq!(pos.lateral_span(8.0), (-8.0, 0.0));
        assert_eq!(pos.center(100.0), 96.0);
        assert_eq!(pos.category_of(3), 5.0);
    }

    #[test]
    fn test_stack_two_series() {
        let mut reg = SeriesRegistry::new();
        let a = reg.push(bars(&[20.0, 35.0, 30.0]));
        let b = reg.push(bars(&[25.0, 32.0, 34.0]));
        reg.stack_on(b, a).unwrap();

        let rb = reg.resolve(b).unwrap();
        assert_eq!(rb.bases(), &[20.0, 35.0, 30.0]);
        assert_eq!(rb.tops(), vec![45.0, 67.0, 64.0]);
        assert_eq!(reg.resolve(a).unwrap().bases(), &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_stack_chain_accumulates() {
        let mut reg = SeriesRegistry::new();
        let a = reg.push(bars(&[1.0, 2.0]));
        let b = reg.push(bars(&[10.0, 20.0]));
        let c = reg.push(bars(&[100.0, 200.0]));
        reg.stack_on(b, a).unwrap();
        reg.stack_on(c, b).unwrap();
        assert_eq!(reg.stack_base(c, 1).unwrap(), 22.0);
        assert_eq!(reg.resolve(c).unwrap().tops(), vec![111.0, 222.0]);
    }

    #[test]
    fn test_stack_inherits_position() {
        let mut reg = SeriesRegistry::new();
        let a = reg.push(bars(&[1.0]).offset(-5.0).x_min(6.0));
        let b = reg.push(bars(&[1.0]).offset(7.0));
        reg.stack_on(b, a).unwrap();
        let pos = reg.get(b).unwrap().position();
        assert_eq!((pos.category, pos.offset), (6.0, -5.0));
        assert_eq!(pos.stack_base, Some(a));
    }

    #[test]
    fn test_length_mismatch() {
        let mut reg = SeriesRegistry::new();
        let a = reg.push(bars(&[1.0, 2.0]));
        let b = reg.push(bars(&[1.0]));
        assert_eq!(
            reg.stack_on(b, a),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_cycle_rejected() {
        let mut reg = SeriesRegistry::new();
        let a = reg.push(bars(&[1.0]));
        let b = reg.push(bars(&[1.0]));
        reg.stack_on(b, a).unwrap();
        assert!(matches!(reg.stack_on(a, b), Err(Error::Configuration(_))));
        assert!(matches!(reg.stack_on(a, a), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_unknown_series() {
        let mut reg = SeriesRegistry::new();
        let a = reg.push(bars(&[1.0]));
        assert!(reg.stack_on(a, SeriesId(9)).is_err());
        assert!(reg.resolve(SeriesId(3)).is_err());
    }

    #[test]
    fn test_resolve_all_in_order() {
        let mut reg = SeriesRegistry::new();
        reg.push(bars(&[1.0]));
        reg.push(bars(&[2.0]));
        let all = reg.resolve_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].chart().values()[0], 2.0);
    }
}
