// src/commands/plot.rs

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::Config;
use crate::constants::{SEGMENT_PLOT_SUFFIX, TRAJECTORY_GRID_FILE, TRAJECTORY_PLOT_SUFFIX};
use crate::data_analysis::derivative::derive_velocity;
use crate::data_input::file_discovery::{file_label, trajectory_files};
use crate::data_input::trajectory::{Trajectory, VelocitySeries};
use crate::data_input::trajectory_parser::parse_trajectory_file;
use crate::dataset::bundle::{load_bundle, Bundle};
use crate::error::{DatasetError, Result};
use crate::plot_framework::Panel3d;
use crate::plot_functions::plot_segment_pairs::{evenly_spaced_indices, plot_segment_pairs};
use crate::plot_functions::plot_trajectory_3d::{plot_trajectory, plot_trajectory_grid, trajectory_panel};

use super::plot_failed;

/// `<stem><suffix>` in the working directory.
fn default_output(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plot".to_string());
    PathBuf::from(format!("{stem}{suffix}"))
}

fn velocity_for(label: &str, trajectory: &Trajectory, plot_velocity: bool) -> Option<VelocitySeries> {
    if !plot_velocity {
        return None;
    }
    match derive_velocity(trajectory) {
        Ok(velocity) => Some(velocity),
        Err(e) => {
            warn!("{label}: velocity arrows skipped: {e}");
            None
        }
    }
}

fn load_panel(path: &Path, plot_velocity: bool, config: &Config) -> Result<Panel3d> {
    let trajectory = parse_trajectory_file(path)?;
    let label = file_label(path);
    let velocity = velocity_for(&label, &trajectory, plot_velocity);
    Ok(trajectory_panel(
        &label,
        &trajectory,
        velocity.as_ref(),
        config.plot.velocity_arrow_scale,
    ))
}

/// `plot`: one trajectory (`--file`) or the first `count` trajectories of a directory.
pub fn run_plot(
    file: Option<&Path>,
    directory: Option<&Path>,
    count: usize,
    plot_velocity: bool,
    output: Option<&Path>,
    config: &Config,
) -> Result<()> {
    match (file, directory) {
        (Some(file), _) => {
            let panel = load_panel(file, plot_velocity, config)?;
            let output = output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| default_output(file, TRAJECTORY_PLOT_SUFFIX));
            plot_trajectory(&panel, &output, &config.plot).map_err(plot_failed)?;
            Ok(())
        }
        (None, Some(directory)) => {
            if count == 0 {
                return Err(DatasetError::invalid_parameter("--count must be at least 1"));
            }
            let files = trajectory_files(directory)?;
            if files.len() < count {
                println!(
                    "Requested {count} trajectories but only {} files are available. Plotting all available trajectories.",
                    files.len()
                );
            }

            let mut panels = Vec::new();
            for path in &files {
                if panels.len() == count {
                    break;
                }
                match load_panel(path, plot_velocity, config) {
                    Ok(panel) => panels.push(panel),
                    Err(e) if e.is_skippable() => warn!("Skipping {}: {e}", file_label(path)),
                    Err(e) => return Err(e),
                }
            }
            if panels.is_empty() {
                return Err(DatasetError::NoTrajectoryFiles(directory.to_path_buf()));
            }

            let output = output
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(TRAJECTORY_GRID_FILE));
            let title = format!("{} trajectories from {}", panels.len(), directory.display());
            plot_trajectory_grid(&panels, &output, &title, &config.plot).map_err(plot_failed)?;
            Ok(())
        }
        (None, None) => Err(DatasetError::MissingArgument(
            "either --file or --directory is required".to_string(),
        )),
    }
}

/// `plot-segments`: renders `count` evenly spaced input/output pairs of a segment bundle.
pub fn run_plot_segments(
    bundle_path: &Path,
    count: usize,
    per_row: Option<usize>,
    output: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let bundle = match load_bundle(bundle_path)? {
        Bundle::Segments(bundle) => bundle,
        other => {
            return Err(DatasetError::invalid_parameter(format!(
                "{} holds a {} bundle, expected segments",
                bundle_path.display(),
                other.kind()
            )))
        }
    };
    bundle.check_consistency()?;

    let per_row = per_row.unwrap_or(config.plot.grid_columns);
    if per_row == 0 {
        return Err(DatasetError::invalid_parameter("--per-row must be at least 1"));
    }
    let total = bundle.num_input_segments;
    if count > total {
        println!(
            "Requested {count} segments but the bundle holds {total}. Plotting all available segments."
        );
    }
    let indices = evenly_spaced_indices(total, count);
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(bundle_path, SEGMENT_PLOT_SUFFIX));
    plot_segment_pairs(&bundle, &indices, per_row, &output).map_err(plot_failed)?;
    Ok(())
}

// src/commands/plot.rs
