// src/data_analysis/statistics.rs

use nalgebra::{Matrix3, SymmetricEigen};
use ndarray::{Array1, Array2, Axis};
use ndarray_stats::{CorrelationExt, QuantileExt};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::axis_names::AXIS_COUNT;
use crate::data_input::trajectory::norm3;
use crate::error::{DatasetError, Result};
use crate::types::{Matrix3Rows, Point3};

// Eigenvalues below this fraction of the largest one are treated as zero.
const EIGENVALUE_RELATIVE_TOLERANCE: f64 = 1e-12;

/// Pooled statistics of a 3-axis quantity. Standard deviation and covariance use ddof = 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub mean: Point3,
    pub std: Point3,
    pub covariance: Matrix3Rows,
    pub inverse_covariance: Matrix3Rows,
    /// Symmetric inverse square root of the covariance (ZCA whitening).
    pub whitening: Matrix3Rows,
    pub sample_count: usize,
}

/// Mean, standard deviation and variance (ddof = 1) of a scalar quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarStats {
    pub mean: f64,
    pub std: f64,
    pub variance: f64,
    pub count: usize,
}

/// Contents of the `pos_stats` bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStats {
    pub position: StatsRecord,
    /// Largest position-vector norm across the corpus.
    pub max_length: f64,
}

/// Contents of the `vel_stats` bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VelocityStats {
    pub magnitude_mean: f64,
    pub magnitude_std: f64,
    pub magnitude_variance: f64,
    /// Number of pooled velocity samples.
    pub sample_count: usize,
    /// Statistics of the (vx, vy, vz) components. None when their covariance is singular,
    /// e.g. a corpus climbing at one constant rate.
    #[serde(default)]
    pub axes: Option<StatsRecord>,
    /// Largest velocity magnitude across the corpus.
    pub max_velocity: f64,
}

pub fn to_nalgebra(m: &Matrix3Rows) -> Matrix3<f64> {
    Matrix3::from_fn(|i, j| m[i][j])
}

pub fn from_nalgebra(m: &Matrix3<f64>) -> Matrix3Rows {
    let mut rows = [[0.0; AXIS_COUNT]; AXIS_COUNT];
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, value) in row.iter_mut().enumerate() {
            *value = m[(i, j)];
        }
    }
    rows
}

/// Applies a row-major 3x3 matrix to a vector.
pub fn apply_matrix(m: &Matrix3Rows, v: &Point3) -> Point3 {
    let mut out = [0.0; AXIS_COUNT];
    for (i, row) in m.iter().enumerate() {
        out[i] = row[0] * v[0] + row[1] * v[1] + row[2] * v[2];
    }
    out
}

/// Lays samples out as a (3, N) array: one row per variable, one column per observation.
pub fn samples_to_array(samples: &[Point3]) -> Array2<f64> {
    Array2::from_shape_fn((AXIS_COUNT, samples.len()), |(axis, i)| samples[i][axis])
}

/// `V diag(1/sqrt(lambda)) V^T` for a symmetric positive-definite covariance.
/// Equals the symmetric square root of the inverse covariance.
pub fn whitening_matrix(covariance: &Matrix3<f64>) -> Result<Matrix3<f64>> {
    let eigen = SymmetricEigen::new(*covariance);
    let largest = eigen
        .eigenvalues
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if largest.is_nan() || largest <= 0.0 {
        return Err(DatasetError::SingularCovariance(
            "covariance has no positive eigenvalue".to_string(),
        ));
    }
    let mut inv_sqrt = Matrix3::zeros();
    for (i, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda <= largest * EIGENVALUE_RELATIVE_TOLERANCE {
            return Err(DatasetError::SingularCovariance(format!(
                "eigenvalue {lambda:e} is not positive; data does not span three dimensions"
            )));
        }
        inv_sqrt[(i, i)] = 1.0 / lambda.sqrt();
    }
    Ok(eigen.eigenvectors * inv_sqrt * eigen.eigenvectors.transpose())
}

/// Computes mean, std, covariance, inverse covariance and whitening over pooled samples.
pub fn compute_stats_record(samples: &[Point3]) -> Result<StatsRecord> {
    if samples.len() < 2 {
        return Err(DatasetError::insufficient_samples(
            "covariance estimation",
            2,
            samples.len(),
        ));
    }
    let data = samples_to_array(samples);
    let mean = data
        .mean_axis(Axis(1))
        .ok_or_else(|| DatasetError::insufficient_samples("mean", 1, 0))?;
    let std = data.std_axis(Axis(1), 1.0);
    let covariance = data
        .cov(1.0)
        .map_err(|e| DatasetError::SingularCovariance(e.to_string()))?;

    let cov_matrix = Matrix3::from_fn(|i, j| covariance[[i, j]]);
    let inverse = cov_matrix.try_inverse().ok_or_else(|| {
        DatasetError::SingularCovariance("covariance matrix is not invertible".to_string())
    })?;
    let whitening = whitening_matrix(&cov_matrix)?;

    Ok(StatsRecord {
        mean: [mean[0], mean[1], mean[2]],
        std: [std[0], std[1], std[2]],
        covariance: from_nalgebra(&cov_matrix),
        inverse_covariance: from_nalgebra(&inverse),
        whitening: from_nalgebra(&whitening),
        sample_count: samples.len(),
    })
}

/// Mean, std and variance of a scalar series (ddof = 1).
pub fn scalar_stats(values: &[f64]) -> Result<ScalarStats> {
    if values.len() < 2 {
        return Err(DatasetError::insufficient_samples(
            "scalar statistics",
            2,
            values.len(),
        ));
    }
    let arr = Array1::from(values.to_vec());
    let mean = arr
        .mean()
        .ok_or_else(|| DatasetError::insufficient_samples("mean", 1, 0))?;
    Ok(ScalarStats {
        mean,
        std: arr.std(1.0),
        variance: arr.var(1.0),
        count: values.len(),
    })
}

/// Largest Euclidean norm among the samples (0.0 when empty).
pub fn max_norm(samples: &[Point3]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let norms: Array1<f64> = samples.iter().map(norm3).collect();
    *norms.max_skipnan()
}

/// Builds the `pos_stats` / `vel_stats` contents from pooled positions and velocities.
///
/// A singular position covariance is an error. A singular velocity covariance only drops
/// the per-axis velocity record.
pub fn compute_dataset_stats(
    positions: &[Point3],
    velocities: &[Point3],
) -> Result<(PositionStats, VelocityStats)> {
    let position = compute_stats_record(positions)?;
    let magnitudes: Vec<f64> = velocities.iter().map(norm3).collect();
    let magnitude = scalar_stats(&magnitudes)?;
    let axes = match compute_stats_record(velocities) {
        Ok(record) => Some(record),
        Err(DatasetError::SingularCovariance(reason)) => {
            warn!("Per-axis velocity statistics skipped: {reason}");
            None
        }
        Err(e) => return Err(e),
    };

    Ok((
        PositionStats {
            position,
            max_length: max_norm(positions),
        },
        VelocityStats {
            magnitude_mean: magnitude.mean,
            magnitude_std: magnitude.std,
            magnitude_variance: magnitude.variance,
            sample_count: velocities.len(),
            axes,
            max_velocity: max_norm(velocities),
        },
    ))
}


// src/data_analysis/statistics.rs
