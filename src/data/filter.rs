use std::collections::BTreeSet;
use std::sync::Arc;

use super::model::{Dataset, Record, Species};
use crate::controls::ControlState;
use crate::reactive::Memo;

// ---------------------------------------------------------------------------
// Species filter
// ---------------------------------------------------------------------------

/// Return indices of records whose species is in `selected`, in dataset order.
/// An empty selection yields no indices.
pub fn filtered_indices(dataset: &Dataset, selected: &BTreeSet<Species>) -> Vec<usize> {
    if selected.is_empty() {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selected.contains(&rec.species))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – the derived, read-only subset
// ---------------------------------------------------------------------------

/// Records passing the species filter. Cloning is cheap: both the dataset
/// and the index list are shared.
#[derive(Debug, Clone)]
pub struct FilteredView {
    dataset: Arc<Dataset>,
    indices: Arc<[usize]>,
}

impl Default for FilteredView {
    fn default() -> Self {
        Self {
            dataset: Arc::default(),
            indices: Arc::from(Vec::new()),
        }
    }
}

impl FilteredView {
    pub fn new(dataset: Arc<Dataset>, selected: &BTreeSet<Species>) -> Self {
        let indices = filtered_indices(&dataset, selected).into();
        Self { dataset, indices }
    }

    /// Records in dataset order.
    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.indices.iter().filter_map(|&i| self.dataset.get(i))
    }

    /// Positions of the visible records in the source dataset.
    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.indices.get(position).and_then(|&i| self.dataset.get(i))
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Value equality: same visible records in the same order.
impl PartialEq for FilteredView {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.dataset, &other.dataset) {
            return self.indices == other.indices;
        }
        self.len() == other.len() && self.records().eq(other.records())
    }
}

// ---------------------------------------------------------------------------
// FilteredViewNode – memoized derivation from control state
// ---------------------------------------------------------------------------

/// Everything the filtered view reads. The dataset is identified by its
/// generation number since it is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSignature {
    pub dataset_generation: u64,
    pub selected_species: BTreeSet<Species>,
}

/// The reactive node: recomputes the filtered view only when the dataset
/// generation or the species selection differ from the last read.
#[derive(Debug, Default)]
pub struct FilteredViewNode {
    memo: Memo<FilterSignature, FilteredView>,
}

impl FilteredViewNode {
    pub fn compute(
        &mut self,
        dataset: &Arc<Dataset>,
        dataset_generation: u64,
        controls: &ControlState,
    ) -> FilteredView {
        let signature = FilterSignature {
            dataset_generation,
            selected_species: controls.selected_species().clone(),
        };
        if self.memo.is_fresh(&signature) {
            log::trace!("filtered view served from cache");
        }
        self.memo
            .get_or_compute(&signature, |sig| {
                let view = FilteredView::new(Arc::clone(dataset), &sig.selected_species);
                log::debug!(
                    "recomputed filtered view: {} of {} records ({:?})",
                    view.len(),
                    dataset.len(),
                    sig.selected_species
                );
                view
            })
            .clone()
    }

    pub fn invalidate(&mut self) {
        self.memo.invalidate();
    }

    pub fn recomputations(&self) -> u64 {
        self.memo.recomputations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Attribute;
    use crate::data::test_support::{record, sample_dataset};

    fn selection(species: &[Species]) -> BTreeSet<Species> {
        species.iter().copied().collect()
    }

    #[test]
    fn empty_selection_yields_empty_view() {
        let view = FilteredView::new(Arc::new(sample_dataset()), &BTreeSet::new());
        assert!(view.is_empty());
        assert_eq!(view.records().count(), 0);
    }

    #[test]
    fn only_selected_species_appear() {
        let ds = Arc::new(sample_dataset());
        for sel in [
            selection(&[Species::Adelie]),
            selection(&[Species::Gentoo, Species::Chinstrap]),
            selection(&Species::ALL),
        ] {
            let view = FilteredView::new(Arc::clone(&ds), &sel);
            assert!(view.records().all(|r| sel.contains(&r.species)));
            let expected = ds.records().iter().filter(|r| sel.contains(&r.species)).count();
            assert_eq!(view.len(), expected);
        }
    }

    #[test]
    fn view_keeps_dataset_order() {
        let ds = Arc::new(sample_dataset());
        let view = FilteredView::new(ds, &selection(&[Species::Adelie]));
        assert_eq!(view.indices(), &[0, 1, 5]);
        assert_eq!(view.get(2).map(|r| r.island.as_str()), Some("Biscoe"));
    }

    #[test]
    fn removing_a_species_only_shrinks_the_view() {
        let ds = Arc::new(sample_dataset());
        let mut sel = selection(&Species::ALL);
        let mut previous: BTreeSet<usize> =
            FilteredView::new(Arc::clone(&ds), &sel).indices().iter().copied().collect();
        for species in Species::ALL {
            sel.remove(&species);
            let current: BTreeSet<usize> =
                FilteredView::new(Arc::clone(&ds), &sel).indices().iter().copied().collect();
            assert!(current.is_subset(&previous));
            previous = current;
        }
        assert!(previous.is_empty());
    }

    #[test]
    fn node_memoizes_until_selection_changes() {
        let ds = Arc::new(sample_dataset());
        let mut controls = ControlState::default();
        let mut node = FilteredViewNode::default();

        let first = node.compute(&ds, 1, &controls);
        let second = node.compute(&ds, 1, &controls);
        assert_eq!(first, second);
        assert_eq!(node.recomputations(), 1);

        // Inputs the view does not read leave the cache alone.
        controls.set_selected_attribute(Attribute::BodyMassG);
        controls.set_plotly_bin_count(7);
        controls.set_seaborn_bin_count(30);
        node.compute(&ds, 1, &controls);
        assert_eq!(node.recomputations(), 1);

        controls.set_species_selected(Species::Adelie, false);
        let narrowed = node.compute(&ds, 1, &controls);
        assert_eq!(node.recomputations(), 2);
        assert!(narrowed.records().all(|r| r.species != Species::Adelie));
    }

    #[test]
    fn toggling_back_and_forth_recomputes_to_an_equal_view() {
        let ds = Arc::new(sample_dataset());
        let mut controls = ControlState::default();
        let mut node = FilteredViewNode::default();
        let before = node.compute(&ds, 1, &controls);
        controls.set_species_selected(Species::Gentoo, false);
        node.compute(&ds, 1, &controls);
        controls.set_species_selected(Species::Gentoo, true);
        let after = node.compute(&ds, 1, &controls);
        assert_eq!(before, after);
        assert_eq!(node.recomputations(), 3);
    }

    #[test]
    fn new_dataset_generation_invalidates() {
        let controls = ControlState::default();
        let mut node = FilteredViewNode::default();
        node.compute(&Arc::new(sample_dataset()), 1, &controls);
        let replacement = Arc::new(Dataset::from_records(vec![record(
            Species::Chinstrap,
            Some(50.0),
            None,
        )]));
        let view = node.compute(&replacement, 2, &controls);
        assert_eq!(node.recomputations(), 2);
        assert_eq!(view.len(), 1);
    }

    #[test]
    fn scenario_adelie_only() {
        let ds = Arc::new(Dataset::from_records(vec![
            record(Species::Adelie, Some(39.1), Some("male")),
            record(Species::Gentoo, None, Some("female")),
        ]));
        let view = FilteredView::new(ds, &selection(&[Species::Adelie]));
        let records: Vec<&Record> = view.records().collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].species, Species::Adelie);
        assert_eq!(records[0].bill_length_mm, Some(39.1));
    }
}
