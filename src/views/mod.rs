/// Presentation nodes: pure functions from the filtered view (plus the
/// controls each one reads) to an artifact the `ui` layer draws.
///
/// ```text
///   FilteredView ──┬─▶ data_table          → DataTable
///                  ├─▶ data_grid  (grid)   → DataGrid
///   ControlState ──┼─▶ plotly_histogram    → Histogram (grouped)
///                  ├─▶ seaborn_histogram   → Histogram (stacked)
///                  └─▶ scatter_plot        → Scatter
/// ```

pub mod histogram;
pub mod scatter;
pub mod table;

use crate::controls::ControlState;
use crate::data::filter::FilteredView;

use histogram::Histogram;
use scatter::Scatter;
use table::{DataGrid, DataTable, GridState};

/// All five artifacts for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub table: DataTable,
    pub grid: DataGrid,
    pub plotly: Histogram,
    pub seaborn: Histogram,
    pub scatter: Scatter,
}

impl Artifacts {
    pub fn build(view: &FilteredView, controls: &ControlState, grid: &GridState) -> Self {
        Self {
            table: table::data_table(view),
            grid: table::data_grid(view, grid),
            plotly: histogram::plotly_histogram(view, controls),
            seaborn: histogram::seaborn_histogram(view, controls),
            scatter: scatter::scatter_plot(view),
        }
    }

    pub fn all_empty(&self) -> bool {
        self.table.is_empty()
            && self.grid.is_empty()
            && self.plotly.is_empty()
            && self.seaborn.is_empty()
            && self.scatter.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::data::model::Species;
    use crate::data::test_support::sample_dataset;

    #[test]
    fn empty_selection_empties_every_artifact() {
        let ds = Arc::new(sample_dataset());
        let mut controls = ControlState::default();
        controls.set_selected_species([]);
        for bins in [1, 20, 500] {
            controls.set_plotly_bin_count(bins);
            let view = FilteredView::new(Arc::clone(&ds), controls.selected_species());
            let artifacts = Artifacts::build(&view, &controls, &GridState::default());
            assert!(artifacts.all_empty());
        }
    }

    #[test]
    fn single_species_feeds_every_artifact() {
        let ds = Arc::new(sample_dataset());
        let mut controls = ControlState::default();
        controls.set_selected_species([Species::Chinstrap]);
        let view = FilteredView::new(ds, controls.selected_species());
        let a = Artifacts::build(&view, &controls, &GridState::default());
        assert_eq!(a.table.len(), 1);
        assert_eq!(a.grid.len(), 1);
        assert_eq!(a.plotly.series.len(), 1);
        assert_eq!(a.seaborn.series[0].species, Species::Chinstrap);
        assert_eq!(a.scatter.points.len(), 1);
        assert!(!a.all_empty());
    }
}
