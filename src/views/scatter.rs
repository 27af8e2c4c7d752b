use crate::data::filter::FilteredView;
use crate::data::model::{Attribute, Record, Species};

pub const SCATTER_TITLE: &str = "Bill Length vs Bill Depth";

/// One plotted penguin.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Drives marker size.
    pub body_mass_g: f64,
    pub species: Species,
    pub island: String,
    pub sex: String,
}

impl ScatterPoint {
    /// Build a point if every plotted and hover field is present.
    pub fn from_record(rec: &Record) -> Option<Self> {
        Some(Self {
            x: rec.bill_length_mm?,
            y: rec.bill_depth_mm?,
            body_mass_g: rec.body_mass_g?,
            species: rec.species,
            island: Some(rec.island.as_str())
                .filter(|s| !s.is_empty())?
                .to_string(),
            sex: rec.sex.clone()?,
        })
    }

    /// Hover text: coordinates plus the auxiliary attributes.
    pub fn hover_text(&self) -> String {
        format!(
            "{}\n{}: {:.1}\n{}: {:.1}\nbody_mass_g: {:.0}\nisland: {}\nsex: {}",
            self.species,
            Attribute::BillLengthMm.label(),
            self.x,
            Attribute::BillDepthMm.label(),
            self.y,
            self.body_mass_g,
            self.island,
            self.sex
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ScatterPoint>,
    /// Range of body mass among the points, for marker scaling.
    pub mass_range: Option<(f64, f64)>,
    /// Records left out for missing fields.
    pub dropped: usize,
}

impl Scatter {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Marker radius in `[min_radius, max_radius]`, linear in body mass.
    pub fn marker_radius(&self, point: &ScatterPoint, min_radius: f32, max_radius: f32) -> f32 {
        match self.mass_range {
            Some((lo, hi)) if hi > lo => {
                let t = ((point.body_mass_g - lo) / (hi - lo)).clamp(0.0, 1.0) as f32;
                min_radius + t * (max_radius - min_radius)
            }
            _ => (min_radius + max_radius) / 2.0,
        }
    }

    /// The point closest to `(x, y)` after scaling each axis by its span,
    /// so the hover lookup is not dominated by the wider axis.
    pub fn nearest(&self, x: f64, y: f64) -> Option<&ScatterPoint> {
        let span = |f: fn(&ScatterPoint) -> f64| {
            let (lo, hi) = self
                .points
                .iter()
                .map(f)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                });
            if hi > lo { hi - lo } else { 1.0 }
        };
        let (sx, sy) = (span(|p| p.x), span(|p| p.y));
        self.points.iter().min_by(|a, b| {
            let da = ((a.x - x) / sx).powi(2) + ((a.y - y) / sy).powi(2);
            let db = ((b.x - x) / sx).powi(2) + ((b.y - y) / sy).powi(2);
            da.total_cmp(&db)
        })
    }

    /// Tooltip for the plot cursor. `series` is the name of the hovered
    /// series and is empty when the cursor is not over a marker.
    pub fn hover_label(&self, series: &str, x: f64, y: f64) -> String {
        if series.is_empty() {
            return String::new();
        }
        self.nearest(x, y).map(|p| p.hover_text()).unwrap_or_default()
    }
}

/// Bill length against bill depth, sized by body mass and colored by species.
pub fn scatter_plot(view: &FilteredView) -> Scatter {
    let mut dropped = 0;
    let points: Vec<ScatterPoint> = view
        .records()
        .filter_map(|rec| {
            let point = ScatterPoint::from_record(rec);
            if point.is_none() {
                dropped += 1;
            }
            point
        })
        .collect();

    let mass_range = points.iter().map(|p| p.body_mass_g).fold(None, |acc, m| match acc {
        None => Some((m, m)),
        Some((lo, hi)) => Some((f64::min(lo, m), f64::max(hi, m))),
    });

    Scatter {
        title: SCATTER_TITLE,
        x_label: Attribute::BillLengthMm.label(),
        y_label: Attribute::BillDepthMm.label(),
        points,
        mass_range,
        dropped,
    }
}
