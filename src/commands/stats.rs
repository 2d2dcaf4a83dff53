// src/commands/stats.rs

use std::path::{Path, PathBuf};

use tracing::info;

use crate::axis_names::format_per_axis;
use crate::config::Config;
use crate::constants::{NORMALIZED_SUFFIX, POS_STATS_FILE, STATS_HISTOGRAM_FILE, VEL_STATS_FILE};
use crate::data_analysis::derivative::derive_velocity;
use crate::data_analysis::normalization::Normalizer;
use crate::data_analysis::statistics::{compute_dataset_stats, PositionStats, VelocityStats};
use crate::data_input::file_discovery::output_parent;
use crate::data_input::trajectory::{norm3, Trajectory};
use crate::data_output::trajectory_writer::write_trajectory_csv;
use crate::dataset::bundle::{save_bundle, Bundle};
use crate::error::Result;
use crate::plot_functions::plot_histograms::plot_stats_histograms;
use crate::types::Point3;

use super::{for_each_trajectory, plot_failed};

/// `<parent>/<stem>_normalized.<ext>`
pub fn normalized_path(parent: &Path, source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match source.extension() {
        Some(ext) => format!("{stem}{NORMALIZED_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{NORMALIZED_SUFFIX}"),
    };
    parent.join(name)
}

fn print_report(pos: &PositionStats, vel: &VelocityStats) {
    println!("\nPosition Statistics ({} samples):", pos.position.sample_count);
    println!("  Mean: {}", format_per_axis(&pos.position.mean));
    println!("  Standard Deviation: {}", format_per_axis(&pos.position.std));
    println!("  Maximum Position Vector Length: {}", pos.max_length);
    println!("\nVelocity Magnitude Statistics ({} samples):", vel.sample_count);
    println!("  Mean: {}", vel.magnitude_mean);
    println!("  Standard Deviation: {}", vel.magnitude_std);
    println!("  Variance: {}", vel.magnitude_variance);
    println!("  Maximum Velocity Magnitude: {}", vel.max_velocity);
    if vel.axes.is_none() {
        println!("  Per-axis velocity covariance is singular; component statistics omitted.");
    }
}

/// `stats`: pooled position and velocity statistics, histograms and normalized copies of
/// every trajectory, all written next to `directory`.
pub fn run_stats(directory: &Path, config: &Config) -> Result<(PositionStats, VelocityStats)> {
    let mut sources: Vec<(PathBuf, Trajectory)> = Vec::new();
    let mut positions: Vec<Point3> = Vec::new();
    let mut velocities: Vec<Point3> = Vec::new();

    for_each_trajectory(directory, |path, _, trajectory| {
        let velocity = derive_velocity(trajectory)?;
        positions.extend_from_slice(trajectory.positions());
        velocities.extend_from_slice(velocity.velocities());
        sources.push((path.to_path_buf(), trajectory.clone()));
        Ok(())
    })?;
    info!(
        "Pooled {} positions and {} velocities from {} files",
        positions.len(),
        velocities.len(),
        sources.len()
    );

    let (pos_stats, vel_stats) = compute_dataset_stats(&positions, &velocities)?;
    let parent = output_parent(directory);
    let pos_path = parent.join(POS_STATS_FILE);
    let vel_path = parent.join(VEL_STATS_FILE);
    save_bundle(&pos_path, &Bundle::PositionStats(pos_stats.clone()))?;
    save_bundle(&vel_path, &Bundle::VelocityStats(vel_stats.clone()))?;
    println!("Files saved: {} and {}", pos_path.display(), vel_path.display());
    print_report(&pos_stats, &vel_stats);

    let speeds: Vec<f64> = velocities.iter().map(norm3).collect();
    plot_stats_histograms(&positions, &speeds, &parent.join(STATS_HISTOGRAM_FILE), &config.plot)
        .map_err(plot_failed)?;

    let normalizer = Normalizer::from_position_stats(&pos_stats);
    for (path, trajectory) in &sources {
        let output = normalized_path(&parent, path);
        write_trajectory_csv(&normalizer.normalize_trajectory(trajectory)?, &output)?;
        info!("Normalized {} -> {}", path.display(), output.display());
    }
    println!("\nNormalized {} trajectories into {}", sources.len(), parent.display());

    Ok((pos_stats, vel_stats))
}


// src/commands/stats.rs
