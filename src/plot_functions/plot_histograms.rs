// src/plot_functions/plot_histograms.rs

use std::error::Error;
use std::path::Path;

use plotters::style::RGBColor;

use crate::config::PlotConfig;
use crate::constants::{COLOR_DISTRIBUTION, COLOR_HIST_AXES, COLOR_HIST_VELOCITY, POSITION_COLUMNS};
use crate::data_analysis::statistics::ScalarStats;
use crate::plot_framework::{draw_histogram_panel, draw_panel_grid, HistogramPanel};
use crate::types::Point3;

/// One pooled quantity shown in the distribution grid.
#[derive(Debug, Clone)]
pub struct DistributionSeries {
    pub name: String,
    pub unit: &'static str,
    pub values: Vec<f64>,
    pub stats: ScalarStats,
}

fn column(points: &[Point3], axis: usize) -> Vec<f64> {
    points.iter().map(|p| p[axis]).collect()
}

fn render_histograms(
    panels: &[HistogramPanel],
    shape: (usize, usize),
    main_title: &str,
    output_path: &Path,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    draw_panel_grid(
        output_path,
        main_title,
        (config.width, config.height),
        shape,
        panels.len(),
        |area, i| draw_histogram_panel(area, &panels[i]),
    )?;
    println!("  Histogram plot saved as '{}'.", output_path.display());
    Ok(())
}

/// 2x2 grid: pooled tx, ty, tz and velocity magnitude.
pub fn plot_stats_histograms(
    positions: &[Point3],
    speeds: &[f64],
    output_path: &Path,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let mut panels: Vec<HistogramPanel> = POSITION_COLUMNS
        .iter()
        .enumerate()
        .map(|(axis, name)| HistogramPanel {
            title: format!("Histogram of {name}"),
            x_label: format!("{name} (m)"),
            values: column(positions, axis),
            color: *COLOR_HIST_AXES[axis],
            bins: config.histogram_bins,
        })
        .collect();
    panels.push(HistogramPanel {
        title: "Histogram of Velocity Magnitude".to_string(),
        x_label: "|v| (m/s)".to_string(),
        values: speeds.to_vec(),
        color: *COLOR_HIST_VELOCITY,
        bins: config.histogram_bins,
    });
    render_histograms(&panels, (2, 2), "Position and Velocity Statistics", output_path, config)
}

/// 2x3 grid: positions on the first row, velocity components on the second.
pub fn plot_axis_distribution(
    series: &[DistributionSeries],
    title: &str,
    output_path: &Path,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let panels: Vec<HistogramPanel> = series
        .iter()
        .zip(COLOR_DISTRIBUTION.iter())
        .map(|(s, color): (&DistributionSeries, &RGBColor)| HistogramPanel {
            title: format!(
                "{}  mean {:.2} {}, var {:.2} {}^2",
                s.name, s.stats.mean, s.unit, s.stats.variance, s.unit
            ),
            x_label: format!("{} values ({})", s.name, s.unit),
            values: s.values.clone(),
            color: *color,
            bins: config.distribution_bins,
        })
        .collect();
    render_histograms(&panels, (2, 3), title, output_path, config)
}

// src/plot_functions/plot_histograms.rs
