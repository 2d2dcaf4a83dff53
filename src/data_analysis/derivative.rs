// src/data_analysis/derivative.rs

use crate::data_input::trajectory::{Trajectory, VelocitySeries};
use crate::error::{DatasetError, Result};

/// Calculates per-axis velocity by forward differences between consecutive samples:
/// `v[i] = (p[i+1] - p[i]) / (t[i+1] - t[i])`.
///
/// For a uniformly sampled trajectory the denominator is the sample step. The result is
/// one sample shorter than the input and velocity `i` is stamped with `t[i+1]`.
pub fn derive_velocity(trajectory: &Trajectory) -> Result<VelocitySeries> {
    if trajectory.len() < 2 {
        return Err(DatasetError::insufficient_samples(
            "velocity derivation",
            2,
            trajectory.len(),
        ));
    }

    let times = trajectory.timestamps();
    let positions = trajectory.positions();
    let mut velocities = Vec::with_capacity(positions.len() - 1);

    for (t, p) in times.windows(2).zip(positions.windows(2)) {
        let dt = t[1] - t[0];
        velocities.push([
            (p[1][0] - p[0][0]) / dt,
            (p[1][1] - p[0][1]) / dt,
            (p[1][2] - p[0][2]) / dt,
        ]);
    }

    Ok(VelocitySeries {
        timestamps: times[1..].to_vec(),
        velocities,
    })
}


// src/data_analysis/derivative.rs
