//! Chart components.
//!
//! Every chart validates its input when constructed and from then on only
//! answers queries: its [`DataRange`], the [`Shape`]s it would draw, the
//! [`GlyphBox`]es layout needs for padding, and a legend thumbnail.

mod bar;
mod boxplot;
mod bubbles;
mod error_bars;
mod heatmap;
mod histogram;
mod labels;
mod quartile;

pub use bar::BarChart;
pub use boxplot::BoxPlot;
pub use bubbles::Bubbles;
pub use error_bars::{ErrorPair, XErrorBars, YErrorBars, DEFAULT_CAP_WIDTH};
pub use heatmap::{GridXyz, HeatMap, UnitGrid};
pub use histogram::Histogram;
pub use labels::Labels;
pub use quartile::QuartPlot;

use crate::geometry::{DataRange, GlyphBox, Rect, Shape};
use crate::render::{draw_shapes, Canvas, CoordinateMapper, Legend, Thumbnailer};
use crate::stacking::ResolvedBars;

/// Common interface of all chart components.
pub trait Plotter: Thumbnailer {
    /// Bounding box of the chart in data coordinates.
    fn data_range(&self) -> DataRange;

    /// Primitives in drawing order.
    fn shapes(&self) -> Vec<Shape>;

    /// Device extents of glyphs drawn at data points.
    fn glyph_boxes(&self) -> Vec<GlyphBox> {
        Vec::new()
    }

    /// Resolve the shapes through `mapper` and draw them.
    fn draw(&self, canvas: &mut dyn Canvas, mapper: &dyn CoordinateMapper) {
        draw_shapes(canvas, mapper, &self.shapes());
    }
}

/// Closed set of chart kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    /// Box plot.
    Box(BoxPlot),
    /// Quartile plot.
    Quartile(QuartPlot),
    /// Bar series with resolved stacking.
    Bars(ResolvedBars),
    /// Histogram.
    Histogram(Histogram),
    /// Heat map.
    HeatMap(HeatMap),
    /// Bubble chart.
    Bubbles(Bubbles),
    /// Horizontal error bars.
    XErrors(XErrorBars),
    /// Vertical error bars.
    YErrors(YErrorBars),
    /// Text labels.
    Labels(Labels),
}

impl Chart {
    fn as_plotter(&self) -> &dyn Plotter {
        match self {
            Self::Box(c) => c,
            Self::Quartile(c) => c,
            Self::Bars(c) => c,
            Self::Histogram(c) => c,
            Self::HeatMap(c) => c,
            Self::Bubbles(c) => c,
            Self::XErrors(c) => c,
            Self::YErrors(c) => c,
            Self::Labels(c) => c,
        }
    }
}

impl Thumbnailer for Chart {
    fn thumbnail(&self, canvas: &mut dyn Canvas, area: Rect) {
        self.as_plotter().thumbnail(canvas, area);
    }
}

impl Plotter for Chart {
    fn data_range(&self) -> DataRange {
        self.as_plotter().data_range()
    }

    fn shapes(&self) -> Vec<Shape> {
        self.as_plotter().shapes()
    }

    fn glyph_boxes(&self) -> Vec<GlyphBox> {
        self.as_plotter().glyph_boxes()
    }
}

macro_rules! chart_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for Chart {
                fn from(c: $ty) -> Self {
                    Self::$variant(c)
                }
            }
        )*
    };
}

chart_from!(
    Box(BoxPlot),
    Quartile(QuartPlot),
    Bars(ResolvedBars),
    Histogram(Histogram),
    HeatMap(HeatMap),
    Bubbles(Bubbles),
    XErrors(XErrorBars),
    YErrors(YErrorBars),
    Labels(Labels),
);

impl From<BarChart> for Chart {
    fn from(c: BarChart) -> Self {
        Self::Bars(ResolvedBars::unstacked(c))
    }
}

/// Smallest range covering every chart.
#[must_use]
pub fn combined_range(charts: &[Chart]) -> DataRange {
    charts
        .iter()
        .fold(DataRange::empty(), |r, c| r.union(c.data_range()))
}

/// Draw every chart in order.
pub fn draw_all(charts: &[Chart], canvas: &mut dyn Canvas, mapper: &dyn CoordinateMapper) {
    for chart in charts {
        chart.draw(canvas, mapper);
    }
}

/// Register each `(label, chart)` pair with `legend`.
pub fn add_legend_entries(legend: &mut dyn Legend, entries: &[(&str, &Chart)]) {
    for (label, chart) in entries {
        legend.add(label, *chart);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{AffineMapper, Recorder};
    use crate::values::Xys;

    #[derive(Default)]
    struct NamesOnly(Vec<String>);

    impl Legend for NamesOnly {
        fn add(&mut self, label: &str, _thumb: &dyn Thumbnailer) {
            self.0.push(label.to_string());
        }
    }

    #[test]
    fn test_combined_range() {
        let charts: Vec<Chart> = vec![
            BarChart::new(&[1.0, 4.0], 1.0).unwrap().into(),
            BoxPlot::new(10.0, 5.0, &[-2.0, 0.0, 1.0]).unwrap().into(),
        ];
        assert_eq!(combined_range(&charts), DataRange::new(0.0, 5.0, -2.0, 4.0));
        assert!(combined_range(&[]).is_empty());
    }

    #[test]
    fn test_chart_dispatch_matches_component() {
        let hist = Histogram::new(&[0.0, 1.0, 2.0], crate::binning::BinSpec::Count(2)).unwrap();
        let chart = Chart::from(hist.clone());
        assert_eq!(chart.shapes(), hist.shapes());
        assert_eq!(chart.data_range(), hist.data_range());
    }

    #[test]
    fn test_draw_all_records_every_chart() {
        let labels = Labels::new(&Xys::new(&[(0.0, 0.0)]).unwrap(), vec!["x"]).unwrap();
        let charts: Vec<Chart> = vec![
            BarChart::new(&[1.0], 2.0).unwrap().into(),
            labels.into(),
        ];
        let mut rec = Recorder::default();
        draw_all(&charts, &mut rec, &AffineMapper::identity());
        // bar fill + 4 outline edges + text
        assert_eq!(rec.shapes().len(), 6);
    }

    #[test]
    fn test_legend_entries() {
        let chart: Chart = BarChart::new(&[1.0], 1.0).unwrap().into();
        let mut legend = NamesOnly::default();
        add_legend_entries(&mut legend, &[("bars", &chart)]);
        assert_eq!(legend.0, vec!["bars"]);
    }
}
