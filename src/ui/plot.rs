use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Points};

use crate::color::SpeciesColors;
use crate::views::histogram::{BarMode, Histogram};
use crate::views::scatter::Scatter;

const MIN_MARKER_RADIUS: f32 = 2.0;
const MAX_MARKER_RADIUS: f32 = 9.0;

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Render a histogram artifact. Grouped histograms put the species side by
/// side inside each bin; stacked ones pile them up.
pub fn histogram_plot(ui: &mut Ui, id: &str, hist: &Histogram, colors: &SpeciesColors, height: f32) {
    ui.strong(hist.title);

    let plot = Plot::new(id)
        .legend(Legend::default())
        .height(height)
        .x_axis_label(hist.attribute.label())
        .y_axis_label("count")
        .include_y(0.0)
        .allow_scroll(false);

    if hist.is_empty() {
        plot.show(ui, |_plot_ui| {});
        return;
    }
    ui.label(
        RichText::new(format!(
            "{} values in {} bins, {} missing",
            hist.total(),
            hist.bins(),
            hist.dropped
        ))
        .weak(),
    );

    let bin_width = hist.bin_width();
    let n_series = hist.series.len().max(1);
    let mut charts: Vec<BarChart> = Vec::with_capacity(hist.series.len());

    for (k, series) in hist.series.iter().enumerate() {
        let color = match hist.mode {
            BarMode::Grouped => colors.color_for(series.species),
            BarMode::Stacked => colors.muted(series.species),
        };
        let bars: Vec<Bar> = series
            .counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let (argument, width) = match hist.mode {
                    BarMode::Grouped => {
                        let slot = bin_width / n_series as f64;
                        (hist.edges[i] + (k as f64 + 0.5) * slot, slot)
                    }
                    BarMode::Stacked => (hist.bin_center(i), bin_width),
                };
                Bar::new(argument, count as f64).width(width).fill(color)
            })
            .collect();

        let mut chart = BarChart::new(bars)
            .name(series.species.as_str())
            .color(color);
        if hist.mode == BarMode::Stacked {
            let below: Vec<&BarChart> = charts.iter().collect();
            chart = chart.stack_on(&below);
        }
        charts.push(chart);
    }

    plot.show(ui, |plot_ui| {
        for chart in charts {
            plot_ui.bar_chart(chart);
        }
    });
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// Render the bill length / bill depth scatter. Marker radius follows body
/// mass; hovering shows the nearest penguin's island and sex.
pub fn scatter_plot(ui: &mut Ui, scatter: &Scatter, colors: &SpeciesColors, height: f32) {
    let hover = scatter.clone();
    if scatter.dropped > 0 {
        ui.label(RichText::new(format!("{} penguins with missing fields not shown", scatter.dropped)).weak());
    }

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(scatter.x_label)
        .y_axis_label(scatter.y_label)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(move |name, value: &PlotPoint| hover.hover_label(name, value.x, value.y))
        .show(ui, |plot_ui| {
            for point in &scatter.points {
                let color: Color32 = colors.color_for(point.species);
                let radius = scatter.marker_radius(point, MIN_MARKER_RADIUS, MAX_MARKER_RADIUS);
                plot_ui.points(
                    Points::new(PlotPoints::new(vec![[point.x, point.y]]))
                        .name(point.species.as_str())
                        .color(color)
                        .radius(radius)
                        .filled(true),
                );
            }
        });
}
