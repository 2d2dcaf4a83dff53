// src/data_analysis/resample.rs

use crate::constants::RESAMPLE_END_TOLERANCE;
use crate::data_input::trajectory::Trajectory;
use crate::error::{DatasetError, Result};
use crate::types::Point3;

/// Piecewise-linear interpolation of `values` (sampled at strictly increasing `times`) at `t`.
/// Queries outside the sampled range are clamped to the end values.
fn interpolate_linear(times: &[f64], values: &[Point3], t: f64) -> Point3 {
    let upper = times.partition_point(|&sample_t| sample_t <= t);
    if upper == 0 {
        return values[0];
    }
    if upper >= times.len() {
        return values[times.len() - 1];
    }
    let lower = upper - 1;
    let span = times[upper] - times[lower];
    let frac = (t - times[lower]) / span;
    let mut out = [0.0; 3];
    for axis in 0..3 {
        out[axis] = values[lower][axis] + frac * (values[upper][axis] - values[lower][axis]);
    }
    out
}

/// Resamples a trajectory onto the grid `t0, t0 + dt, t0 + 2dt, ...`.
///
/// The grid ends at the last multiple of `dt` that does not pass the original end time
/// (no extrapolation). Each axis is interpolated linearly between the bracketing samples.
pub fn resample_trajectory(trajectory: &Trajectory, dt: f64) -> Result<Trajectory> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(DatasetError::invalid_parameter(format!(
            "sample time must be a positive number, got {dt}"
        )));
    }
    if trajectory.len() < 2 {
        return Err(DatasetError::insufficient_samples(
            "resampling",
            2,
            trajectory.len(),
        ));
    }

    let times = trajectory.timestamps();
    let positions = trajectory.positions();
    let t0 = times[0];
    let t_end = times[times.len() - 1];

    let steps = ((t_end - t0) / dt + RESAMPLE_END_TOLERANCE).floor() as usize;
    let mut new_times = Vec::with_capacity(steps + 1);
    let mut new_positions = Vec::with_capacity(steps + 1);
    for k in 0..=steps {
        let t = (t0 + k as f64 * dt).min(t_end);
        new_times.push(t);
        new_positions.push(interpolate_linear(times, positions, t));
    }

    Trajectory::new(new_times, new_positions)
}

/// Grid spacing in milliseconds, used to name resampled output directories.
pub fn sample_time_label_ms(dt: f64) -> u64 {
    (dt * 1000.0).round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn uniform(n: usize, dt: f64) -> Trajectory {
        let times: Vec<f64> = (0..n).map(|i| i as f64 * dt).collect();
        let positions: Vec<Point3> = times
            .iter()
            .map(|&t| [t.sin(), 2.0 * t, t * t])
            .collect();
        Trajectory::new(times, positions).unwrap()
    }

    #[test]
    fn test_resample_at_own_step_is_identity() {
        let traj = uniform(50, 0.1);
        let resampled = resample_trajectory(&traj, 0.1).unwrap();
        assert_eq!(resampled.len(), traj.len());
        for (a, b) in traj.samples().zip(resampled.samples()) {
            assert_abs_diff_eq!(a.0, b.0, epsilon = 1e-9);
            for axis in 0..3 {
                assert_abs_diff_eq!(a.1[axis], b.1[axis], epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_linear_interpolation_midpoints() {
        let traj = Trajectory::new(
            vec![0.0, 1.0, 3.0],
            vec![[0.0, 0.0, 0.0], [2.0, -2.0, 10.0], [6.0, -6.0, 10.0]],
        )
        .unwrap();
        let resampled = resample_trajectory(&traj, 0.5).unwrap();
        assert_eq!(resampled.len(), 7);
        assert_abs_diff_eq!(resampled.positions()[1][0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(resampled.positions()[3][1], -4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(resampled.positions()[6][2], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_end_time_is_last_multiple_not_exceeding_original_end() {
        let traj = Trajectory::new(vec![0.0, 1.05], vec![[0.0; 3], [1.05, 0.0, 0.0]]).unwrap();
        let resampled = resample_trajectory(&traj, 0.1).unwrap();
        assert_eq!(resampled.len(), 11);
        assert_abs_diff_eq!(resampled.end_time().unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(resampled.positions()[10][0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_last_timestamp_never_passes_end() {
        // 0.3 / 0.1 lands just below 3 in floating point; the slack still admits k = 3.
        let traj = Trajectory::new(vec![0.0, 0.3], vec![[0.0; 3], [3.0, 0.0, 0.0]]).unwrap();
        let resampled = resample_trajectory(&traj, 0.1).unwrap();
        assert_eq!(resampled.len(), 4);
        assert_eq!(resampled.end_time(), Some(0.3));
        assert!(resampled.timestamps().iter().all(|&t| t <= 0.3));
        assert_abs_diff_eq!(resampled.positions()[3][0], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_insufficient_samples() {
        let traj = Trajectory::new(vec![0.0], vec![[0.0; 3]]).unwrap();
        assert!(matches!(
            resample_trajectory(&traj, 0.1),
            Err(DatasetError::InsufficientSamples { min: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_step() {
        let traj = uniform(5, 0.1);
        assert!(resample_trajectory(&traj, 0.0).is_err());
        assert!(resample_trajectory(&traj, -0.1).is_err());
        assert!(resample_trajectory(&traj, f64::NAN).is_err());
    }

    #[test]
    fn test_sample_time_label() {
        assert_eq!(sample_time_label_ms(0.1), 100);
        assert_eq!(sample_time_label_ms(0.05), 50);
    }
}

// src/data_analysis/resample.rs
