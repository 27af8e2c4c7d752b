mod app;
mod color;
mod config;
mod controls;
mod data;
mod reactive;
mod state;
mod ui;
mod views;

use anyhow::{Context, Result, anyhow};
use app::PenguinDashApp;
use clap::Parser;
use eframe::egui;

use config::Cli;
use state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut state = AppState::new(cli.initial_controls(), cli.repo_url.clone());

    // A dataset named on the command line must load; there is nothing to
    // show otherwise.
    if let Some(path) = &cli.data {
        let dataset = data::loader::load_shared(path)
            .with_context(|| format!("could not load dataset {}", path.display()))?;
        state.set_dataset(dataset, Some(path.clone()));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cli.width, cli.height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Penguin Dash – Palmer Penguins",
        options,
        Box::new(|_cc| Ok(Box::new(PenguinDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("eframe error: {e}"))
}
