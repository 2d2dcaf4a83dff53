// src/types.rs
// Type aliases shared across the loader, analysis and plotting modules

use crate::axis_names::AXIS_COUNT;
use ndarray::{Array2, Array3};

// Compile-time assertion: windows, packed arrays and 3x3 statistics all assume three axes.
const _: () = assert!(AXIS_COUNT == 3, "AXIS_COUNT must be 3");

/// One spatial sample (x, y, z) of a position or velocity channel.
pub type Point3 = [f64; AXIS_COUNT];

/// Row-major 3x3 matrix as persisted in the statistics bundles.
pub type Matrix3Rows = [[f64; AXIS_COUNT]; AXIS_COUNT];

/// A window of shape (3, length): row per axis, column per sample.
pub type Window = Array2<f64>;

/// Packed windows of shape (3, length, count).
pub type PackedWindows = Array3<f64>;

/// 3D polyline points for plotters.
pub type PlotPoints3 = Vec<(f64, f64, f64)>;

// src/types.rs
