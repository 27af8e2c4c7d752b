use std::path::PathBuf;

use clap::Parser;

use crate::controls::{ControlState, DEFAULT_PLOTLY_BINS, DEFAULT_SEABORN_BINS, MAX_PLOTLY_BINS};
use crate::data::model::Attribute;

pub const DEFAULT_REPO_URL: &str = "https://github.com/yourusername/cintel-02-data";

/// Palmer Penguins exploration dashboard.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Cli {
    /// Penguins dataset (.csv, .json or .parquet). Without it the dashboard
    /// starts empty and a file can be opened from the menu.
    #[arg(env = "PENGUINS_DATA")]
    pub data: Option<PathBuf>,

    /// Column the histograms start on (bill_length_mm, bill_depth_mm,
    /// flipper_length_mm or body_mass_g).
    #[arg(long, default_value_t = Attribute::default())]
    pub attribute: Attribute,

    /// Initial bin count of the Plotly histogram.
    #[arg(long, default_value_t = DEFAULT_PLOTLY_BINS, value_parser = clap::value_parser!(u32).range(1..=MAX_PLOTLY_BINS as i64))]
    pub plotly_bins: u32,

    /// Initial bin count of the Seaborn histogram.
    #[arg(long, default_value_t = DEFAULT_SEABORN_BINS, value_parser = clap::value_parser!(u32).range(5..=30))]
    pub seaborn_bins: u32,

    /// Target of the sidebar's GitHub link.
    #[arg(long, default_value = DEFAULT_REPO_URL)]
    pub repo_url: String,

    /// Initial window width in points.
    #[arg(long, default_value_t = 1400.0)]
    pub width: f32,

    /// Initial window height in points.
    #[arg(long, default_value_t = 900.0)]
    pub height: f32,
}

impl Cli {
    /// Control state seeded from the command line.
    pub fn initial_controls(&self) -> ControlState {
        let mut controls = ControlState::default();
        controls.set_selected_attribute(self.attribute);
        controls.set_plotly_bin_count(self.plotly_bins);
        controls.set_seaborn_bin_count(self.seaborn_bins);
        controls
    }
}
