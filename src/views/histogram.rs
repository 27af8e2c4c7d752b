use std::collections::BTreeMap;

use crate::controls::ControlState;
use crate::data::filter::FilteredView;
use crate::data::model::{Attribute, Species};

// ---------------------------------------------------------------------------
// Histogram artifact
// ---------------------------------------------------------------------------

/// How the per-species series share a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    /// Side by side within each bin.
    Grouped,
    /// On top of each other.
    Stacked,
}

/// Bin counts for one species.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub species: Species,
    /// One count per bin, aligned with [`Histogram::edges`].
    pub counts: Vec<usize>,
}

impl HistogramSeries {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Everything the chart layer needs to draw one histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub title: &'static str,
    pub attribute: Attribute,
    /// Requested bin count, passed through from the controls untouched.
    pub bin_count: u32,
    pub mode: BarMode,
    /// `bins + 1` ascending edges; empty when no value survived.
    pub edges: Vec<f64>,
    /// Series in species order, only for species with at least one value.
    pub series: Vec<HistogramSeries>,
    /// Records left out because the attribute was missing.
    pub dropped: usize,
}

impl Histogram {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Number of bins actually laid out.
    pub fn bins(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(lo), Some(hi)) if self.bins() > 0 => (hi - lo) / self.bins() as f64,
            _ => 0.0,
        }
    }

    /// Center of bin `i`.
    pub fn bin_center(&self, i: usize) -> f64 {
        match (self.edges.get(i), self.edges.get(i + 1)) {
            (Some(lo), Some(hi)) => (lo + hi) / 2.0,
            _ => f64::NAN,
        }
    }

    /// Number of values placed in bins across all series.
    pub fn total(&self) -> usize {
        self.series.iter().map(HistogramSeries::total).sum()
    }
}

/// Histogram drawn with the Plotly-style settings: grouped by species,
/// `plotly_bin_count` bins.
pub fn plotly_histogram(view: &FilteredView, controls: &ControlState) -> Histogram {
    build_histogram(
        "Plotly Histogram",
        view,
        controls.selected_attribute(),
        controls.plotly_bin_count(),
        BarMode::Grouped,
    )
}

/// Histogram drawn with the Seaborn-style settings: stacked by species,
/// `seaborn_bin_count` bins.
pub fn seaborn_histogram(view: &FilteredView, controls: &ControlState) -> Histogram {
    build_histogram(
        "Seaborn Histogram",
        view,
        controls.selected_attribute(),
        controls.seaborn_bin_count(),
        BarMode::Stacked,
    )
}

/// Bucket `attribute` values of the view into `bin_count` equal-width bins
/// spanning the observed [min, max]. The last bin is closed on the right.
pub fn build_histogram(
    title: &'static str,
    view: &FilteredView,
    attribute: Attribute,
    bin_count: u32,
    mode: BarMode,
) -> Histogram {
    let mut dropped = 0;
    let mut values: BTreeMap<Species, Vec<f64>> = BTreeMap::new();
    for rec in view.records() {
        match attribute.value(rec) {
            Some(v) => values.entry(rec.species).or_default().push(v),
            None => dropped += 1,
        }
    }

    let mut hist = Histogram {
        title,
        attribute,
        bin_count,
        mode,
        edges: Vec::new(),
        series: Vec::new(),
        dropped,
    };

    let (min, max) = values
        .values()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return hist;
    }

    hist.edges = bin_edges(min, max, bin_count.max(1) as usize);
    let bins = hist.bins();
    let width = hist.bin_width();
    let lo = hist.edges[0];

    hist.series = values
        .into_iter()
        .map(|(species, vals)| {
            let mut counts = vec![0usize; bins];
            for v in vals {
                let idx = ((v - lo) / width).floor() as usize;
                counts[idx.min(bins - 1)] += 1;
            }
            HistogramSeries { species, counts }
        })
        .collect();
    hist
}

/// Equal-width edges over [min, max]; a degenerate range is widened by 0.5
/// on each side so a single value still gets a bin.
fn bin_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let (lo, hi) = if max > min { (min, max) } else { (min - 0.5, max + 0.5) };
    let width = (hi - lo) / bins as f64;
    (0..=bins)
        .map(|i| if i == bins { hi } else { lo + i as f64 * width })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use super::*;
    use crate::data::model::Dataset;
    use crate::data::test_support::{record, sample_dataset};

    fn full_view(ds: Dataset) -> FilteredView {
        FilteredView::new(Arc::new(ds), &Species::ALL.into_iter().collect())
    }

    #[test]
    fn edges_span_observed_range() {
        let edges = bin_edges(0.0, 10.0, 4);
        assert_eq!(edges, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(bin_edges(3.0, 3.0, 2), vec![2.5, 3.0, 3.5]);
    }

    #[test]
    fn max_value_lands_in_last_bin() {
        let ds = Dataset::from_records(vec![
            record(Species::Adelie, Some(30.0), None),
            record(Species::Adelie, Some(40.0), None),
            record(Species::Adelie, Some(50.0), None),
        ]);
        let h = build_histogram("t", &full_view(ds), Attribute::BillLengthMm, 2, BarMode::Grouped);
        assert_eq!(h.bins(), 2);
        assert_eq!(h.series[0].counts, vec![1, 2]);
    }

    #[test]
    fn missing_values_are_dropped_not_counted() {
        let view = full_view(sample_dataset());
        let h = build_histogram("t", &view, Attribute::BillLengthMm, 10, BarMode::Stacked);
        assert_eq!(h.dropped, 1);
        assert_eq!(h.total(), view.len() - 1);
        assert!(h.series.iter().all(|s| s.counts.len() == 10));
    }

    #[test]
    fn series_follow_species_order_and_skip_absent_species() {
        let ds = Dataset::from_records(vec![
            record(Species::Chinstrap, Some(48.0), None),
            record(Species::Adelie, Some(38.0), None),
            record(Species::Gentoo, None, None),
        ]);
        let h = build_histogram("t", &full_view(ds), Attribute::BillLengthMm, 5, BarMode::Grouped);
        let species: Vec<Species> = h.series.iter().map(|s| s.species).collect();
        assert_eq!(species, vec![Species::Adelie, Species::Chinstrap]);
    }

    #[test]
    fn empty_view_gives_empty_histogram() {
        let view = FilteredView::new(Arc::new(sample_dataset()), &BTreeSet::new());
        let h = plotly_histogram(&view, &ControlState::default());
        assert!(h.is_empty());
        assert!(h.edges.is_empty());
        assert_eq!(h.bin_count, 20);
    }

    #[test]
    fn plotly_bins_pass_through_independently_of_seaborn_bins() {
        let view = full_view(sample_dataset());
        let mut controls = ControlState::default();
        controls.set_selected_attribute(Attribute::FlipperLengthMm);
        controls.set_plotly_bin_count(20);
        let before = plotly_histogram(&view, &controls);
        assert_eq!(before.bin_count, 20);
        assert_eq!(before.bins(), 20);
        assert_eq!(before.attribute, Attribute::FlipperLengthMm);

        controls.set_seaborn_bin_count(6);
        let after = plotly_histogram(&view, &controls);
        assert_eq!(before, after);

        let seaborn = seaborn_histogram(&view, &controls);
        assert_eq!(seaborn.bin_count, 6);
        assert_eq!(seaborn.mode, BarMode::Stacked);
    }

    #[test]
    fn adelie_scenario_keeps_all_present_values() {
        let ds = Dataset::from_records(vec![
            record(Species::Adelie, Some(39.1), None),
            record(Species::Gentoo, None, None),
        ]);
        let view = FilteredView::new(Arc::new(ds), &[Species::Adelie].into_iter().collect());
        let h = plotly_histogram(&view, &ControlState::default());
        assert_eq!(h.dropped, 0);
        assert_eq!(h.total(), 1);
    }
}
