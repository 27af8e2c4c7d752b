use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::model::Record;
use crate::views::table::{Column, DataGrid, DataTable, GridState};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Data table
// ---------------------------------------------------------------------------

pub fn data_table(ui: &mut Ui, table: &DataTable, height: f32) {
    ui.push_id("penguins_datatable", |ui: &mut Ui| {
        record_table(ui, height, table.len(), |i| table.row(i), |header, col| {
            header.col(|ui: &mut Ui| {
                ui.strong(col.header());
            });
        });
    });
}

// ---------------------------------------------------------------------------
// Data grid – filter boxes plus sortable headers
// ---------------------------------------------------------------------------

pub fn data_grid(ui: &mut Ui, grid: &DataGrid, state: &mut GridState, height: f32) {
    ui.push_id("penguins_datagrid", |ui: &mut Ui| {
        egui::CollapsingHeader::new("Column filters")
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                egui::Grid::new("grid_filters").num_columns(2).show(ui, |ui: &mut Ui| {
                    for col in Column::ALL {
                        ui.label(col.header());
                        let mut text = state.input(col).to_string();
                        let hint = if col.is_numeric() { "min..max" } else { "contains" };
                        if ui
                            .add(egui::TextEdit::singleline(&mut text).hint_text(hint))
                            .changed()
                        {
                            state.set_input(col, text);
                        }
                        ui.end_row();
                    }
                });
                if ui.small_button("Clear").clicked() {
                    state.clear();
                }
            });

        ui.label(RichText::new(format!("{} of {} rows", grid.len(), grid.view.len())).weak());

        let sort = state.sort;
        let mut clicked = None;
        record_table(ui, height, grid.len(), |i| grid.row(i), |header, col| {
            let arrow = match sort {
                Some(key) if key.column == col && key.descending => " ⏷",
                Some(key) if key.column == col => " ⏶",
                _ => "",
            };
            header.col(|ui: &mut Ui| {
                if ui
                    .button(RichText::new(format!("{}{arrow}", col.header())).strong())
                    .clicked()
                {
                    clicked = Some(col);
                }
            });
        });
        if let Some(col) = clicked {
            state.cycle_sort(col);
        }
    });
}

// ---------------------------------------------------------------------------
// Shared table body
// ---------------------------------------------------------------------------

fn record_table<'a>(
    ui: &mut Ui,
    height: f32,
    rows: usize,
    row_at: impl Fn(usize) -> Option<&'a Record>,
    mut header_cell: impl FnMut(&mut egui_extras::TableRow<'_, '_>, Column),
) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(height)
        .columns(TableColumn::auto().at_least(60.0), Column::ALL.len())
        .header(HEADER_HEIGHT, |mut header| {
            for col in Column::ALL {
                header_cell(&mut header, col);
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows, |mut row| {
                let record = row_at(row.index());
                for col in Column::ALL {
                    row.col(|ui: &mut Ui| {
                        if let Some(rec) = record {
                            ui.label(col.cell(rec));
                        }
                    });
                }
            });
        });
}
