// src/commands/velocity.rs

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::constants::VELOCITY_OUTPUT_DIR;
use crate::data_analysis::derivative::derive_velocity;
use crate::data_analysis::resample::resample_trajectory;
use crate::data_input::file_discovery::output_parent;
use crate::data_output::trajectory_writer::{write_velocity_csv, VelocityColumns};
use crate::error::{DatasetError, Result};

use super::for_each_trajectory;

/// `velocity`: writes per-sample forward-difference velocity tables into
/// `<parent>/velocity_processed_csv_files/`, optionally resampling first.
pub fn run_velocity(
    directory: &Path,
    velocity_only: bool,
    resample: bool,
    sample_time: Option<f64>,
    config: &Config,
) -> Result<PathBuf> {
    let sample_time = sample_time.unwrap_or(config.resample.default_sample_time);
    if resample && (!sample_time.is_finite() || sample_time <= 0.0) {
        return Err(DatasetError::invalid_parameter(format!(
            "sample time must be a positive number of seconds, got {sample_time}"
        )));
    }
    let columns = if velocity_only {
        VelocityColumns::VelocityOnly
    } else {
        VelocityColumns::WithPosition
    };
    let output_dir = output_parent(directory).join(VELOCITY_OUTPUT_DIR);

    let processed = for_each_trajectory(directory, |_, label, trajectory| {
        let resampled;
        let source = if resample {
            resampled = resample_trajectory(trajectory, sample_time)?;
            &resampled
        } else {
            trajectory
        };
        let velocity = derive_velocity(source)?;
        write_velocity_csv(source, &velocity, columns, &output_dir.join(label))
    })?;

    println!("Total files processed: {processed}");
    println!("  Velocity tables written to {}", output_dir.display());
    Ok(output_dir)
}

// src/commands/velocity.rs
