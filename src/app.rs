use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};
use crate::views::scatter::Scatter;

const TABLE_HEIGHT: f32 = 260.0;
const HISTOGRAM_HEIGHT: f32 = 280.0;
const SCATTER_HEIGHT: f32 = 420.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PenguinDashApp {
    pub state: AppState,
}

impl PenguinDashApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for PenguinDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("sidebar")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables, histograms, scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &mut self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &mut AppState) {
    if !state.has_data() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a penguins file to explore  (File → Open…)");
        });
        return;
    }

    // Every node reads the same memoized view for this frame.
    let artifacts = state.artifacts();

    if state.scatter_fullscreen {
        let height = ui.available_height() - 60.0;
        scatter_card(ui, state, &artifacts.scatter, height);
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Palmer Penguins Dashboard");
            if artifacts.all_empty() {
                ui.label("No penguins match the current species selection.");
            }
            ui.add_space(4.0);

            // ---- Row 1: data table + data grid ----
            ui.columns(2, |cols| {
                cols[0].strong("Data Table");
                table::data_table(&mut cols[0], &artifacts.table, TABLE_HEIGHT);
                cols[1].strong("Data Grid");
                table::data_grid(&mut cols[1], &artifacts.grid, &mut state.grid, TABLE_HEIGHT);
            });
            ui.separator();

            // ---- Row 2: histograms ----
            ui.columns(2, |cols| {
                plot::histogram_plot(
                    &mut cols[0],
                    "plotly_histogram",
                    &artifacts.plotly,
                    &state.colors,
                    HISTOGRAM_HEIGHT,
                );
                plot::histogram_plot(
                    &mut cols[1],
                    "seaborn_histogram",
                    &artifacts.seaborn,
                    &state.colors,
                    HISTOGRAM_HEIGHT,
                );
            });
            ui.separator();

            // ---- Row 3: scatter card ----
            scatter_card(ui, state, &artifacts.scatter, SCATTER_HEIGHT);
        });
}

fn scatter_card(ui: &mut Ui, state: &mut AppState, scatter: &Scatter, height: f32) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.horizontal(|ui: &mut Ui| {
            ui.strong("Plotly Scatterplot: Species");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                let label = if state.scatter_fullscreen { "Exit full screen" } else { "Full screen" };
                if ui.small_button(label).clicked() {
                    state.scatter_fullscreen = !state.scatter_fullscreen;
                }
            });
        });
        ui.label(scatter.title);
        plot::scatter_plot(ui, scatter, &state.colors, height.max(200.0));
    });
}
