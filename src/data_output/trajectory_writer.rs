// src/data_output/trajectory_writer.rs

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::constants::{POSITION_COLUMNS, TIMESTAMP_COLUMN, VELOCITY_COLUMNS};
use crate::data_input::trajectory::{Trajectory, VelocitySeries};
use crate::error::{DatasetError, Result};

/// Columns written alongside velocity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VelocityColumns {
    /// `timestamp,tx,ty,tz,vx,vy,vz`
    WithPosition,
    /// `timestamp,vx,vy,vz`
    VelocityOnly,
}

fn create_writer(path: &Path) -> Result<csv::Writer<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(csv::Writer::from_writer(File::create(path)?))
}

fn write_position_rows<W: Write>(trajectory: &Trajectory, writer: &mut csv::Writer<W>) -> Result<()> {
    let mut header = vec![TIMESTAMP_COLUMN];
    header.extend(POSITION_COLUMNS);
    writer.write_record(&header)?;
    for (t, p) in trajectory.samples() {
        writer.write_record([t.to_string(), p[0].to_string(), p[1].to_string(), p[2].to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `timestamp,tx,ty,tz` rows, creating parent directories as needed.
pub fn write_trajectory_csv(trajectory: &Trajectory, path: &Path) -> Result<()> {
    let mut writer = create_writer(path)?;
    write_position_rows(trajectory, &mut writer)
}

/// Writes velocity rows for `trajectory`.
///
/// Row `i` pairs sample `i` (timestamp and optionally position) with the forward-difference
/// velocity toward sample `i + 1`; the last sample has no velocity and is dropped.
pub fn write_velocity_csv(
    trajectory: &Trajectory,
    velocity: &VelocitySeries,
    columns: VelocityColumns,
    path: &Path,
) -> Result<()> {
    if velocity.len() + 1 != trajectory.len() {
        return Err(DatasetError::invalid_parameter(format!(
            "velocity has {} samples for a trajectory of {}",
            velocity.len(),
            trajectory.len()
        )));
    }
    let mut writer = create_writer(path)?;

    let mut header = vec![TIMESTAMP_COLUMN];
    if columns == VelocityColumns::WithPosition {
        header.extend(POSITION_COLUMNS);
    }
    header.extend(VELOCITY_COLUMNS);
    writer.write_record(&header)?;

    for ((t, p), v) in trajectory.samples().zip(velocity.velocities()) {
        let mut row = vec![t.to_string()];
        if columns == VelocityColumns::WithPosition {
            row.extend(p.iter().map(f64::to_string));
        }
        row.extend(v.iter().map(f64::to_string));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}


// src/data_output/trajectory_writer.rs
