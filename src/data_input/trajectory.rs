// src/data_input/trajectory.rs

use crate::error::{DatasetError, Result};
use crate::types::Point3;

/// Time-ordered 3D position samples loaded from one trajectory file.
/// Timestamps are strictly increasing; the samples cannot be modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    timestamps: Vec<f64>,   // Seconds.
    positions: Vec<Point3>, // [tx, ty, tz].
}

impl Trajectory {
    /// Builds a trajectory, rejecting mismatched lengths, non-finite values and
    /// timestamps that do not strictly increase.
    pub fn new(timestamps: Vec<f64>, positions: Vec<Point3>) -> Result<Self> {
        if timestamps.len() != positions.len() {
            return Err(DatasetError::invalid_parameter(format!(
                "{} timestamps vs {} positions",
                timestamps.len(),
                positions.len()
            )));
        }
        for (i, (t, p)) in timestamps.iter().zip(&positions).enumerate() {
            if !t.is_finite() || p.iter().any(|v| !v.is_finite()) {
                return Err(DatasetError::invalid_parameter(format!(
                    "non-finite sample at index {i}"
                )));
            }
        }
        if let Some(i) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DatasetError::invalid_parameter(format!(
                "timestamps must be strictly increasing (index {})",
                i + 1
            )));
        }
        Ok(Self {
            timestamps,
            positions,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    pub fn start_time(&self) -> Option<f64> {
        self.timestamps.first().copied()
    }

    pub fn end_time(&self) -> Option<f64> {
        self.timestamps.last().copied()
    }

    /// Average sample rate in Hz, if at least two samples exist.
    pub fn sample_rate(&self) -> Option<f64> {
        match (self.start_time(), self.end_time()) {
            (Some(first), Some(last)) if self.len() > 1 => {
                Some((self.len() - 1) as f64 / (last - first))
            }
            _ => None,
        }
    }

    /// Iterates `(timestamp, position)` pairs.
    pub fn samples(&self) -> impl Iterator<Item = (f64, &Point3)> + '_ {
        self.timestamps.iter().copied().zip(self.positions.iter())
    }
}

/// Per-axis velocity derived from consecutive trajectory samples.
/// One sample shorter than the trajectory it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct VelocitySeries {
    pub(crate) timestamps: Vec<f64>,
    pub(crate) velocities: Vec<Point3>,
}

impl VelocitySeries {
    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }

    /// Timestamp of the later sample of each difference pair.
    pub fn timestamps(&self) -> &[f64] {
        &self.timestamps
    }

    pub fn velocities(&self) -> &[Point3] {
        &self.velocities
    }

    /// Euclidean speed per sample.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.velocities.iter().map(|v| norm3(v)).collect()
    }
}

/// Euclidean length of a 3-vector.
pub fn norm3(v: &Point3) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}


// src/data_input/trajectory.rs
