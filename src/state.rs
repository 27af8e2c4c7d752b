use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::color::SpeciesColors;
use crate::controls::ControlState;
use crate::data::filter::{FilteredView, FilteredViewNode};
use crate::data::model::Dataset;
use crate::views::Artifacts;
use crate::views::table::GridState;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset; empty until a file is loaded.
    pub dataset: Arc<Dataset>,

    /// Bumped on every dataset replacement; part of the filter signature.
    pub dataset_generation: u64,

    /// Where the current dataset came from.
    pub source: Option<PathBuf>,

    /// Sidebar control values.
    pub controls: ControlState,

    /// Memoized species filter over `dataset`.
    filtered: FilteredViewNode,

    /// Column filters / sort of the data grid.
    pub grid: GridState,

    /// Species colours shared by all charts.
    pub colors: SpeciesColors,

    /// Target of the sidebar link.
    pub repo_url: String,

    /// Whether the scatter card is expanded to the whole central panel.
    pub scatter_fullscreen: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: Arc::default(),
            dataset_generation: 0,
            source: None,
            controls: ControlState::default(),
            filtered: FilteredViewNode::default(),
            grid: GridState::default(),
            colors: SpeciesColors::default(),
            repo_url: crate::config::DEFAULT_REPO_URL.to_string(),
            scatter_fullscreen: false,
            status_message: None,
        }
    }
}

impl AppState {
    pub fn new(controls: ControlState, repo_url: String) -> Self {
        Self {
            controls,
            repo_url,
            ..Self::default()
        }
    }

    /// Ingest a newly loaded dataset. Controls are kept; grid filters reset.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>, source: Option<PathBuf>) {
        self.dataset = dataset;
        self.dataset_generation += 1;
        self.source = source;
        self.grid.clear();
        self.filtered.invalidate();
        self.status_message = None;
    }

    /// Load `path` and swap it in. On failure the current dataset stays and
    /// the error is shown in the top bar.
    pub fn open_path(&mut self, path: &Path) {
        match crate::data::loader::load_shared(path) {
            Ok(dataset) => self.set_dataset(dataset, Some(path.to_path_buf())),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Current filtered view; recomputed only when its inputs changed.
    pub fn filtered_view(&mut self) -> FilteredView {
        self.filtered
            .compute(&self.dataset, self.dataset_generation, &self.controls)
    }

    /// How often the filtered view has been recomputed.
    pub fn filter_recomputations(&self) -> u64 {
        self.filtered.recomputations()
    }

    /// Derive every presentation artifact for this frame.
    pub fn artifacts(&mut self) -> Artifacts {
        let view = self.filtered_view();
        Artifacts::build(&view, &self.controls, &self.grid)
    }

    pub fn has_data(&self) -> bool {
        !self.dataset.is_empty() || self.source.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Attribute, Species};
    use crate::data::test_support::sample_dataset;

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.set_dataset(Arc::new(sample_dataset()), None);
        state
    }

    #[test]
    fn repeated_reads_share_one_computation() {
        let mut state = loaded();
        let a = state.filtered_view();
        let b = state.filtered_view();
        let _ = state.artifacts();
        assert_eq!(a, b);
        assert_eq!(state.filter_recomputations(), 1);
    }

    #[test]
    fn chart_controls_do_not_refilter() {
        let mut state = loaded();
        state.filtered_view();
        state.controls.set_selected_attribute(Attribute::BillDepthMm);
        state.controls.set_seaborn_bin_count(25);
        let artifacts = state.artifacts();
        assert_eq!(state.filter_recomputations(), 1);
        assert_eq!(artifacts.seaborn.bin_count, 25);
        assert_eq!(artifacts.plotly.attribute, Attribute::BillDepthMm);
    }

    #[test]
    fn species_change_refilters_once() {
        let mut state = loaded();
        state.filtered_view();
        state.controls.set_species_selected(Species::Gentoo, false);
        let view = state.filtered_view();
        state.filtered_view();
        assert_eq!(state.filter_recomputations(), 2);
        assert!(view.records().all(|r| r.species != Species::Gentoo));
    }

    #[test]
    fn replacing_dataset_refilters_and_resets_grid() {
        let mut state = loaded();
        state.filtered_view();
        state.grid.cycle_sort(crate::views::table::Column::Island);
        state.set_dataset(Arc::new(Dataset::default()), None);
        assert!(state.filtered_view().is_empty());
        assert_eq!(state.filter_recomputations(), 2);
        assert_eq!(state.grid, GridState::default());
    }

    #[test]
    fn failed_open_keeps_current_dataset() {
        let mut state = loaded();
        let generation = state.dataset_generation;
        state.open_path(Path::new("/nonexistent/penguins.csv"));
        assert_eq!(state.dataset_generation, generation);
        assert_eq!(state.dataset.len(), 6);
        assert!(state.status_message.as_deref().unwrap_or("").starts_with("Error"));
    }
}
