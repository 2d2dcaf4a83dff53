// src/data_analysis/mod.rs

pub mod bspline;
pub mod derivative;
pub mod normalization;
pub mod resample;
pub mod segmentation;
pub mod statistics;

// src/data_analysis/mod.rs
