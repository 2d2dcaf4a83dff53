// src/error.rs

//! Error types for trajectory dataset preparation.
//!
//! Argument and path errors abort a command. Per-file errors (malformed rows,
//! too few samples) are reported by batch commands and the file is skipped.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for loading, transforming and writing trajectory datasets.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// A required command argument was not supplied.
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// An input file or directory does not exist.
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// A trajectory file has missing columns or unparseable rows.
    #[error("Malformed input in {} (line {line}): {reason}", path.display())]
    MalformedInput {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Too few samples for the requested operation.
    #[error("Insufficient samples for {operation}: need at least {min}, got {actual}")]
    InsufficientSamples {
        operation: &'static str,
        min: usize,
        actual: usize,
    },

    /// A numeric parameter is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A directory contained no usable trajectory files.
    #[error("No valid trajectory files found in {}", .0.display())]
    NoTrajectoryFiles(PathBuf),

    /// Covariance matrix could not be inverted or factorized.
    #[error("Singular covariance: {0}")]
    SingularCovariance(String),

    /// Configuration file could not be parsed or failed validation.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Rendering failed.
    #[error("Plot error: {0}")]
    Plot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;

impl DatasetError {
    /// Create a malformed input error.
    #[must_use]
    pub fn malformed(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create an insufficient samples error.
    #[must_use]
    pub const fn insufficient_samples(operation: &'static str, min: usize, actual: usize) -> Self {
        Self::InsufficientSamples {
            operation,
            min,
            actual,
        }
    }

    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Errors confined to a single trajectory file. Batch commands log these and move on.
    #[must_use]
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::MalformedInput { .. } | Self::InsufficientSamples { .. } | Self::Csv(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DatasetError::insufficient_samples("spline fit", 4, 2);
        let msg = err.to_string();
        assert!(msg.contains("spline fit"));
        assert!(msg.contains('4'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn test_malformed_display_includes_path_and_line() {
        let err = DatasetError::malformed("flight_1.csv", 7, "non-numeric value 'abc'");
        let msg = err.to_string();
        assert!(msg.contains("flight_1.csv"));
        assert!(msg.contains("line 7"));
    }

    #[test]
    fn test_skippable_classification() {
        assert!(DatasetError::malformed("a.csv", 1, "x").is_skippable());
        assert!(DatasetError::insufficient_samples("resample", 2, 1).is_skippable());
        assert!(!DatasetError::PathNotFound(PathBuf::from("missing")).is_skippable());
        assert!(!DatasetError::MissingArgument("file".into()).is_skippable());
        assert!(!DatasetError::invalid_parameter("dt").is_skippable());
    }
}

// src/error.rs
