// src/constants.rs

// Import specific colors needed
use plotters::style::colors::full_palette::{BLUE, GREEN, PURPLE, RED};
use plotters::style::RGBColor;

// Required input columns, in output order.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const POSITION_COLUMNS: [&str; 3] = ["tx", "ty", "tz"];
pub const VELOCITY_COLUMNS: [&str; 3] = ["vx", "vy", "vz"];

// Trajectory file extensions picked up by directory commands (lowercase).
pub const TRAJECTORY_EXTENSIONS: [&str; 2] = ["csv", "txt"];

// --- Spline encoding ---
pub const DEFAULT_SPLINE_DEGREE: usize = 3;

// --- Resampling ---
pub const DEFAULT_SAMPLE_TIME_S: f64 = 0.1;
// Slack when deciding whether the last grid point still fits inside the original time range.
pub const RESAMPLE_END_TOLERANCE: f64 = 1e-9;

// --- Output names ---
pub const DEFAULT_SEGMENTS_FILE: &str = "segments.json";
pub const POS_STATS_FILE: &str = "pos_stats.json";
pub const VEL_STATS_FILE: &str = "vel_stats.json";
pub const STATS_HISTOGRAM_FILE: &str = "stats_histograms.png";
pub const DISTRIBUTION_PLOT_FILE: &str = "axis_distribution.png";
pub const VELOCITY_OUTPUT_DIR: &str = "velocity_processed_csv_files";
pub const NORMALIZED_SUFFIX: &str = "_normalized";
pub const RESAMPLED_DIR_PREFIX: &str = "resampled_trajectories_";
pub const TRAJECTORY_PLOT_SUFFIX: &str = "_trajectory.png";
pub const TRAJECTORY_GRID_FILE: &str = "trajectory_grid.png";
pub const SEGMENT_PLOT_SUFFIX: &str = "_segments.png";
pub const DEFAULT_DISTRIBUTION_TITLE: &str = "Data Distribution of Axes";

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;
pub const GRID_SUBPLOT_SIZE: u32 = 640;
pub const DEFAULT_GRID_COLUMNS: usize = 3;
// 3D view angles (radians) and zoom.
pub const VIEW_YAW: f64 = 0.7;
pub const VIEW_PITCH: f64 = 0.35;
pub const VIEW_SCALE: f64 = 0.85;

// Histogram bin counts (stats overview vs. per-axis distribution grid).
pub const STATS_HISTOGRAM_BINS: usize = 30;
pub const DISTRIBUTION_HISTOGRAM_BINS: usize = 50;

// Velocity arrows are drawn as p + v * scale.
pub const VELOCITY_ARROW_SCALE: f64 = 0.1;

// --- Plot Color Assignments ---
pub const COLOR_TRAJECTORY: &RGBColor = &GREEN;
pub const COLOR_SEGMENT_INPUT: &RGBColor = &GREEN;
pub const COLOR_SEGMENT_OUTPUT: &RGBColor = &RED;
pub const COLOR_HIST_AXES: [&RGBColor; 3] = [&BLUE, &GREEN, &RED];
pub const COLOR_HIST_VELOCITY: &RGBColor = &PURPLE;
pub const COLOR_DISTRIBUTION: [RGBColor; 6] = [
    RGBColor(0, 0, 255),
    RGBColor(0, 128, 0),
    RGBColor(255, 0, 0),
    RGBColor(0, 190, 190),
    RGBColor(190, 0, 190),
    RGBColor(200, 200, 0),
];
pub const HISTOGRAM_OPACITY: f64 = 0.7;
pub const LIGHT_GRID_OPACITY: f64 = 0.15;

// Stroke widths for lines
pub const LINE_WIDTH_PLOT: u32 = 1;
pub const LINE_WIDTH_LEGEND: u32 = 2;
pub const MARKER_SIZE: u32 = 3;

// Font sizes
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 18;
pub const FONT_SIZE_AXIS_LABEL: i32 = 12;
pub const FONT_SIZE_LEGEND: i32 = 12;
pub const FONT_SIZE_MESSAGE: i32 = 20;

// src/constants.rs
