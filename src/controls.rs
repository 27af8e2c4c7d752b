use std::collections::BTreeSet;

use crate::data::model::{Attribute, Species};

pub const DEFAULT_PLOTLY_BINS: u32 = 20;
pub const DEFAULT_SEABORN_BINS: u32 = 15;
/// Upper bound of the Plotly bin count input.
pub const MAX_PLOTLY_BINS: u32 = 500;
/// Range of the Seaborn bin slider.
pub const SEABORN_BIN_RANGE: std::ops::RangeInclusive<u32> = 5..=30;

// ---------------------------------------------------------------------------
// Control state – the user-settable dashboard parameters
// ---------------------------------------------------------------------------

/// Current value of every sidebar control.
///
/// Values are stored as the widgets hand them over; range checks are the
/// widget's job. Each setter returns `true` when the stored value changed so
/// callers can log or react to real edits only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    selected_attribute: Attribute,
    plotly_bin_count: u32,
    seaborn_bin_count: u32,
    selected_species: BTreeSet<Species>,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            selected_attribute: Attribute::default(),
            plotly_bin_count: DEFAULT_PLOTLY_BINS,
            seaborn_bin_count: DEFAULT_SEABORN_BINS,
            selected_species: Species::ALL.into_iter().collect(),
        }
    }
}

impl ControlState {
    pub fn selected_attribute(&self) -> Attribute {
        self.selected_attribute
    }

    pub fn plotly_bin_count(&self) -> u32 {
        self.plotly_bin_count
    }

    pub fn seaborn_bin_count(&self) -> u32 {
        self.seaborn_bin_count
    }

    pub fn selected_species(&self) -> &BTreeSet<Species> {
        &self.selected_species
    }

    pub fn is_species_selected(&self, species: Species) -> bool {
        self.selected_species.contains(&species)
    }

    pub fn set_selected_attribute(&mut self, attribute: Attribute) -> bool {
        replace_if_changed(&mut self.selected_attribute, attribute)
    }

    pub fn set_plotly_bin_count(&mut self, bins: u32) -> bool {
        replace_if_changed(&mut self.plotly_bin_count, bins)
    }

    pub fn set_seaborn_bin_count(&mut self, bins: u32) -> bool {
        replace_if_changed(&mut self.seaborn_bin_count, bins)
    }

    /// Check or uncheck one species box.
    pub fn set_species_selected(&mut self, species: Species, selected: bool) -> bool {
        if selected {
            self.selected_species.insert(species)
        } else {
            self.selected_species.remove(&species)
        }
    }

    /// Replace the whole species selection.
    pub fn set_selected_species(&mut self, species: impl IntoIterator<Item = Species>) -> bool {
        replace_if_changed(&mut self.selected_species, species.into_iter().collect())
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
