// src/plot_functions/mod.rs

pub mod plot_histograms;
pub mod plot_segment_pairs;
pub mod plot_trajectory_3d;

// src/plot_functions/mod.rs
