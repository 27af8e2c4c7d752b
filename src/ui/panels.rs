use eframe::egui::{self, Color32, RichText, Ui};

use crate::controls::{MAX_PLOTLY_BINS, SEABORN_BIN_RANGE};
use crate::data::model::{Attribute, Species};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dashboard controls
// ---------------------------------------------------------------------------

/// Render the sidebar. Widget values are copied out of the control state,
/// edited, and written back through the setters.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Sidebar");
    ui.separator();

    // ---- Attribute selector ----
    ui.strong("Select Attribute:");
    let mut attribute = state.controls.selected_attribute();
    egui::ComboBox::from_id_salt("selected_attribute")
        .selected_text(attribute.column())
        .show_ui(ui, |ui: &mut Ui| {
            for candidate in Attribute::ALL {
                ui.selectable_value(&mut attribute, candidate, candidate.column());
            }
        });
    if state.controls.set_selected_attribute(attribute) {
        log::debug!("selected_attribute → {attribute}");
    }
    ui.add_space(6.0);

    // ---- Plotly bins (numeric input) ----
    ui.strong("Plotly Bin Count:");
    let mut plotly_bins = state.controls.plotly_bin_count();
    ui.add(egui::DragValue::new(&mut plotly_bins).range(1..=MAX_PLOTLY_BINS));
    if state.controls.set_plotly_bin_count(plotly_bins) {
        log::debug!("plotly_bin_count → {plotly_bins}");
    }
    ui.add_space(6.0);

    // ---- Seaborn bins (slider) ----
    ui.strong("Seaborn Bin Count:");
    let mut seaborn_bins = state.controls.seaborn_bin_count();
    ui.add(egui::Slider::new(&mut seaborn_bins, SEABORN_BIN_RANGE));
    if state.controls.set_seaborn_bin_count(seaborn_bins) {
        log::debug!("seaborn_bin_count → {seaborn_bins}");
    }
    ui.add_space(6.0);

    // ---- Species checkboxes (inline) ----
    ui.horizontal(|ui: &mut Ui| {
        ui.strong("Filter Species:");
        if ui.small_button("All").clicked() {
            state.controls.set_selected_species(Species::ALL);
        }
        if ui.small_button("None").clicked() {
            state.controls.set_selected_species([]);
        }
    });
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for species in Species::ALL {
            let mut checked = state.controls.is_species_selected(species);
            let count = state.dataset.species_count(species);
            let text = RichText::new(format!("{species} ({count})"))
                .color(state.colors.color_for(species));
            if ui.checkbox(&mut checked, text).changed() {
                state.controls.set_species_selected(species, checked);
                log::debug!("species {species} selected: {checked}");
            }
        }
    });

    ui.separator();

    ui.add(egui::Hyperlink::from_label_and_url("GitHub", &state.repo_url).open_in_new_tab(true));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.has_data() {
            let visible = state.filtered_view().len();
            ui.label(format!(
                "{} penguins loaded, {} visible",
                state.dataset.len(),
                visible
            ))
            .on_hover_text(format!(
                "species filter computed {} times",
                state.filter_recomputations()
            ));
            if let Some(path) = &state.source {
                ui.label(RichText::new(path.display().to_string()).weak());
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open penguins data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}
