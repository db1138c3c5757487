//! Figure rendering
//!
//! Renders the computed histograms and summary statistics to PNG files with
//! `plotters`. Aggregation lives in [`crate::histogram`] and [`crate::stats`];
//! nothing in here computes, it only draws.

use crate::errors::{IwpHistError, Result};
use crate::histogram::{monthly_histograms, BinScheme, Histogram, Normalization};
use crate::loader::AnnualDataset;
use crate::stats::SummaryStats;
use palette::{LinSrgb, Mix, Srgb};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Bar fill used by the per-year bar charts
const BAR_GREY: RGBColor = RGBColor(128, 128, 128);

/// Axis limits of the monthly log-log panels
const IWP_RANGE: (f64, f64) = (1e-5, 1e2);
const DENSITY_RANGE: (f64, f64) = (1e-4, 1e3);

fn draw_err<E: std::fmt::Display>(e: E) -> IwpHistError {
    IwpHistError::PlotError(e.to_string())
}

/// Viridis-style color for a parameter in [0, 1]
///
/// Piecewise linear interpolation between viridis anchor colors, mixed in
/// linear RGB.
#[must_use]
pub fn viridis(t: f64) -> RGBColor {
    const STOPS: [(u8, u8, u8); 5] = [
        (68, 1, 84),
        (59, 82, 139),
        (33, 145, 140),
        (94, 201, 98),
        (253, 231, 37),
    ];

    let scaled = t.clamp(0.0, 1.0) as f32 * (STOPS.len() - 1) as f32;
    let i = (scaled.floor() as usize).min(STOPS.len() - 2);
    let frac = scaled - i as f32;

    let lo: LinSrgb = Srgb::new(STOPS[i].0, STOPS[i].1, STOPS[i].2)
        .into_format::<f32>()
        .into_linear();
    let hi: LinSrgb = Srgb::new(STOPS[i + 1].0, STOPS[i + 1].1, STOPS[i + 1].2)
        .into_format::<f32>()
        .into_linear();
    let mixed: Srgb<f32> = Srgb::from_linear(lo.mix(hi, frac));
    let rgb = mixed.into_format::<u8>();

    RGBColor(rgb.red, rgb.green, rgb.blue)
}

/// Stairs polyline for a histogram, heights clamped to `floor`
///
/// On a log axis a zero bin cannot be drawn; clamping to the lower axis
/// limit puts it on the axis line instead, like a stairs plot dropping to
/// the baseline.
fn step_points(hist: &Histogram, floor: f64) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(hist.num_bins() * 2);
    for ((lo, hi), height) in hist.steps() {
        let height = height.max(floor);
        points.push((lo, height));
        points.push((hi, height));
    }
    points
}

/// Renders the 2x2 grid of per-month density histograms, one panel per year
///
/// Each panel holds twelve log-log step series colored by month on the
/// viridis scale.
pub fn render_monthly_panels(
    datasets: &BTreeMap<i32, AnnualDataset>,
    years: &[i32],
    bins: &BinScheme,
    path: &Path,
) -> Result<()> {
    let root = BitMapBackend::new(path, (1000, 700)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    let panels = root.split_evenly((2, 2));

    for (panel, &year) in panels.iter().zip(years.iter()) {
        let dataset = datasets
            .get(&year)
            .ok_or(IwpHistError::YearNotLoaded { year })?;

        let mut chart = ChartBuilder::on(panel)
            .caption(year.to_string(), ("sans-serif", 18))
            .margin(8)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(
                (IWP_RANGE.0..IWP_RANGE.1).log_scale(),
                (DENSITY_RANGE.0..DENSITY_RANGE.1).log_scale(),
            )
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc("IWP / kg m^-2")
            .y_desc("Probability Density / (kg m^-2)^-1")
            .draw()
            .map_err(draw_err)?;

        for (month, hist) in monthly_histograms(dataset, bins) {
            let color = viridis(f64::from(month) / 12.0);
            chart
                .draw_series(LineSeries::new(
                    step_points(&hist, DENSITY_RANGE.0),
                    color.stroke_width(1),
                ))
                .map_err(draw_err)?
                .label(month.to_string())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .border_style(&BLACK)
            .background_style(&WHITE.mix(0.8))
            .draw()
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Renders the overlay of count-normalized annual histograms on a log x axis
pub fn render_interannual(
    datasets: &BTreeMap<i32, AnnualDataset>,
    bins: &BinScheme,
    path: &Path,
) -> Result<()> {
    let histograms: Vec<(i32, Histogram)> = datasets
        .iter()
        .map(|(&year, dataset)| {
            (
                year,
                Histogram::compute(dataset.iwp.view(), bins, Normalization::Count),
            )
        })
        .collect();

    if histograms.is_empty() {
        return Err(IwpHistError::PlotError("no years to plot".to_string()));
    }

    let y_max = histograms
        .iter()
        .flat_map(|(_, h)| h.heights().iter().copied())
        .fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let root = BitMapBackend::new(path, (800, 500)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d((IWP_RANGE.0..IWP_RANGE.1).log_scale(), 0.0..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_desc("IWP / kg m^-2")
        .y_desc("Probability Mass")
        .draw()
        .map_err(draw_err)?;

    let num_years = histograms.len();
    for (i, (year, hist)) in histograms.iter().enumerate() {
        let color = viridis(i as f64 / num_years as f64);
        let label = year.to_string();
        chart
            .draw_series(LineSeries::new(step_points(hist, 0.0), color.stroke_width(1)))
            .map_err(draw_err)?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Renders the per-year zero-fraction bar chart
pub fn render_zero_fraction_bars(
    stats: &BTreeMap<i32, SummaryStats>,
    path: &Path,
) -> Result<()> {
    render_year_bars(
        stats.iter().map(|(&y, s)| (y, s.zero_fraction)),
        "Share of Zeros",
        path,
    )
}

/// Renders the per-year profile-count bar chart
pub fn render_profile_count_bars(
    stats: &BTreeMap<i32, SummaryStats>,
    path: &Path,
) -> Result<()> {
    render_year_bars(
        stats.iter().map(|(&y, s)| (y, s.profile_count as f64)),
        "Number of Profiles",
        path,
    )
}

/// One grey bar per year, shared by the zeros and profile-count figures
fn render_year_bars(
    values: impl Iterator<Item = (i32, f64)>,
    y_label: &str,
    path: &Path,
) -> Result<()> {
    let data: Vec<(i32, f64)> = values.collect();
    let (first, last) = match (data.first(), data.last()) {
        (Some(&(first, _)), Some(&(last, _))) => (first, last),
        _ => return Err(IwpHistError::PlotError("no years to plot".to_string())),
    };

    let y_max = data.iter().map(|&(_, v)| v).fold(0.0f64, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let root = BitMapBackend::new(path, (500, 300)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(55)
        .build_cartesian_2d(f64::from(first) - 0.6..f64::from(last) + 0.6, 0.0..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_desc(y_label)
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(data.iter().map(|&(year, v)| {
            Rectangle::new(
                [(f64::from(year) - 0.4, 0.0), (f64::from(year) + 0.4, v)],
                BAR_GREY.filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}
