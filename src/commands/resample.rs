// src/commands/resample.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::RESAMPLED_DIR_PREFIX;
use crate::data_analysis::resample::{resample_trajectory, sample_time_label_ms};
use crate::data_input::file_discovery::output_parent;
use crate::data_output::trajectory_writer::write_trajectory_csv;
use crate::error::{DatasetError, Result};

use super::for_each_trajectory;

/// `<parent of directory>/resampled_trajectories_<ms>ms`
pub fn resampled_output_dir(directory: &Path, sample_time: f64) -> PathBuf {
    output_parent(directory).join(format!(
        "{RESAMPLED_DIR_PREFIX}{}ms",
        sample_time_label_ms(sample_time)
    ))
}

/// `resample`: writes every trajectory of `directory` resampled at `sample_time` seconds,
/// keeping file names. Returns the output directory.
pub fn run_resample(directory: &Path, sample_time: f64) -> Result<PathBuf> {
    if !sample_time.is_finite() || sample_time <= 0.0 {
        return Err(DatasetError::invalid_parameter(format!(
            "sample time must be a positive number of seconds, got {sample_time}"
        )));
    }
    let output_dir = resampled_output_dir(directory, sample_time);

    let processed = for_each_trajectory(directory, |_, label, trajectory| {
        let resampled = resample_trajectory(trajectory, sample_time)?;
        debug!(
            "{label}: {} samples -> {} samples",
            trajectory.len(),
            resampled.len()
        );
        write_trajectory_csv(&resampled, &output_dir.join(label))
    })?;

    println!(
        "Resampled {processed} trajectories at {sample_time} s into {}",
        output_dir.display()
    );
    Ok(output_dir)
}

// src/commands/resample.rs
