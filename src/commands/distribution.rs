// src/commands/distribution.rs

use std::path::Path;

use crate::config::Config;
use crate::constants::{DISTRIBUTION_PLOT_FILE, POSITION_COLUMNS, VELOCITY_COLUMNS};
use crate::data_analysis::derivative::derive_velocity;
use crate::data_analysis::statistics::scalar_stats;
use crate::data_input::file_discovery::output_parent;
use crate::error::Result;
use crate::plot_functions::plot_histograms::{plot_axis_distribution, DistributionSeries};
use crate::types::Point3;

use super::{for_each_trajectory, plot_failed};

const POSITION_UNIT: &str = "m";
const VELOCITY_UNIT: &str = "m/s";

fn axis_series(samples: &[Point3], names: [&str; 3], unit: &'static str) -> Result<Vec<DistributionSeries>> {
    names
        .iter()
        .enumerate()
        .map(|(axis, name)| {
            let values: Vec<f64> = samples.iter().map(|p| p[axis]).collect();
            Ok(DistributionSeries {
                name: name.to_string(),
                unit,
                stats: scalar_stats(&values)?,
                values,
            })
        })
        .collect()
}

/// `distribution`: pooled mean and variance of tx, ty, tz, vx, vy, vz plus a 2x3 histogram
/// grid written next to `directory`.
pub fn run_distribution(directory: &Path, title: &str, config: &Config) -> Result<Vec<DistributionSeries>> {
    let mut positions: Vec<Point3> = Vec::new();
    let mut velocities: Vec<Point3> = Vec::new();
    for_each_trajectory(directory, |_, _, trajectory| {
        let velocity = derive_velocity(trajectory)?;
        positions.extend_from_slice(trajectory.positions());
        velocities.extend_from_slice(velocity.velocities());
        Ok(())
    })?;

    let mut series = axis_series(&positions, POSITION_COLUMNS, POSITION_UNIT)?;
    series.extend(axis_series(&velocities, VELOCITY_COLUMNS, VELOCITY_UNIT)?);
    for s in &series {
        println!(
            "{}: Mean = {} {}, Variance = {} {}^2",
            s.name, s.stats.mean, s.unit, s.stats.variance, s.unit
        );
    }

    let output = output_parent(directory).join(DISTRIBUTION_PLOT_FILE);
    plot_axis_distribution(&series, title, &output, &config.plot).map_err(plot_failed)?;
    Ok(series)
}

// src/commands/distribution.rs
