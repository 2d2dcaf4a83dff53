// src/data_analysis/normalization.rs

use crate::data_analysis::statistics::{apply_matrix, PositionStats};
use crate::data_input::trajectory::Trajectory;
use crate::error::Result;
use crate::types::{Matrix3Rows, Point3};

/// Whitening around the corpus position mean.
///
/// Dividing by `max_length` and then whitening with the matrix of the scaled data
/// (`max_length * W`) cancels out, so a point maps to `W (p - mean)`. Pooled output has
/// identity covariance.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalizer {
    mean: Point3,
    whitening: Matrix3Rows,
}

impl Normalizer {
    pub fn from_position_stats(stats: &PositionStats) -> Self {
        Self {
            mean: stats.position.mean,
            whitening: stats.position.whitening,
        }
    }

    pub fn normalize_point(&self, p: &Point3) -> Point3 {
        let centered = [p[0] - self.mean[0], p[1] - self.mean[1], p[2] - self.mean[2]];
        apply_matrix(&self.whitening, &centered)
    }

    /// Returns a new trajectory with the same timestamps and normalized positions.
    pub fn normalize_trajectory(&self, trajectory: &Trajectory) -> Result<Trajectory> {
        let positions = trajectory
            .positions()
            .iter()
            .map(|p| self.normalize_point(p))
            .collect();
        Trajectory::new(trajectory.timestamps().to_vec(), positions)
    }
}


// src/data_analysis/normalization.rs
