use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Species;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize, saturation: f32, lightness: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, saturation, lightness);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Species colours
// ---------------------------------------------------------------------------

/// One colour per species, used by every chart and the species checkboxes.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesColors {
    colors: [Color32; 3],
}

impl Default for SpeciesColors {
    fn default() -> Self {
        Self::new(0.75, 0.55)
    }
}

impl SpeciesColors {
    pub fn new(saturation: f32, lightness: f32) -> Self {
        let palette = generate_palette(Species::ALL.len(), saturation, lightness);
        let mut colors = [Color32::GRAY; 3];
        for (slot, c) in colors.iter_mut().zip(palette) {
            *slot = c;
        }
        Self { colors }
    }

    /// Look up the colour for a species.
    pub fn color_for(&self, species: Species) -> Color32 {
        self.colors[species as usize]
    }

    /// Muted variant for the stacked (Seaborn-style) histogram.
    pub fn muted(&self, species: Species) -> Color32 {
        self.color_for(species).gamma_multiply(0.8)
    }
}
