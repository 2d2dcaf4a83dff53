//! Configuration Management
//!
//! Defaults come from `constants.rs`; a TOML file passed with `--config` can override any
//! section. Components receive the section they need explicitly.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    DEFAULT_GRID_COLUMNS, DEFAULT_SAMPLE_TIME_S, DEFAULT_SPLINE_DEGREE,
    DISTRIBUTION_HISTOGRAM_BINS, PLOT_HEIGHT, PLOT_WIDTH, STATS_HISTOGRAM_BINS,
    VELOCITY_ARROW_SCALE,
};
use crate::error::{DatasetError, Result};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spline: SplineConfig,
    #[serde(default)]
    pub resample: ResampleConfig,
    #[serde(default)]
    pub plot: PlotConfig,
}

/// Spline encoding settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineConfig {
    /// B-spline degree (odd; 3 = cubic)
    pub degree: usize,
}

/// Resampling settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResampleConfig {
    /// Sample time (s) used by `velocity --resample` when none is given
    pub default_sample_time: f64,
}

/// Rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
    /// Velocity arrows are drawn from p to p + v * scale
    pub velocity_arrow_scale: f64,
    pub histogram_bins: usize,
    pub distribution_bins: usize,
    pub grid_columns: usize,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            degree: DEFAULT_SPLINE_DEGREE,
        }
    }
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self {
            default_sample_time: DEFAULT_SAMPLE_TIME_S,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: PLOT_WIDTH,
            height: PLOT_HEIGHT,
            velocity_arrow_scale: VELOCITY_ARROW_SCALE,
            histogram_bins: STATS_HISTOGRAM_BINS,
            distribution_bins: DISTRIBUTION_HISTOGRAM_BINS,
            grid_columns: DEFAULT_GRID_COLUMNS,
        }
    }
}

impl SplineConfig {
    /// Smallest window length the encoder accepts.
    pub fn min_window_len(&self) -> usize {
        self.degree + 1
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<()> {
        if self.spline.degree == 0 || self.spline.degree % 2 == 0 || self.spline.degree > 5 {
            return Err(DatasetError::Config(format!(
                "spline degree must be 1, 3 or 5, got {}",
                self.spline.degree
            )));
        }
        if !self.resample.default_sample_time.is_finite() || self.resample.default_sample_time <= 0.0 {
            return Err(DatasetError::Config(format!(
                "default_sample_time must be > 0, got {}",
                self.resample.default_sample_time
            )));
        }
        if self.plot.width < 100 || self.plot.height < 100 {
            return Err(DatasetError::Config(format!(
                "plot size must be at least 100x100, got {}x{}",
                self.plot.width, self.plot.height
            )));
        }
        if self.plot.histogram_bins == 0 || self.plot.distribution_bins == 0 {
            return Err(DatasetError::Config("histogram bin counts must be > 0".to_string()));
        }
        if self.plot.grid_columns == 0 {
            return Err(DatasetError::Config("grid_columns must be > 0".to_string()));
        }
        if !self.plot.velocity_arrow_scale.is_finite() {
            return Err(DatasetError::Config("velocity_arrow_scale must be finite".to_string()));
        }
        Ok(())
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DatasetError::PathNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| DatasetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| DatasetError::Config(e.to_string()))
    }
}
