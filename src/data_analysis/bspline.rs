// src/data_analysis/bspline.rs

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::config::SplineConfig;
use crate::error::{DatasetError, Result};
use crate::types::Window;

/// B-spline encoding of one sampled axis.
///
/// `knots.len() == coefficients.len() + degree + 1`. The knot vector is clamped (the end
/// knots repeat `degree + 1` times) with not-a-knot interior knots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineRepresentation {
    pub knots: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub degree: usize,
}

/// Splines for the x, y and z rows of one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSplines {
    pub axes: [SplineRepresentation; 3],
}

/// Knot vector for interpolation at `x` with an odd `degree`: `degree + 1` copies of each
/// end point and the interior samples `x[(k+1)/2 .. n-(k+1)/2]`.
pub fn not_a_knot_knots(x: &[f64], degree: usize) -> Vec<f64> {
    let n = x.len();
    let half = (degree + 1) / 2;
    let mut knots = Vec::with_capacity(n + degree + 1);
    knots.extend(std::iter::repeat(x[0]).take(degree + 1));
    knots.extend_from_slice(&x[half..n - half]);
    knots.extend(std::iter::repeat(x[n - 1]).take(degree + 1));
    knots
}

/// Index `i` in `[degree, n_coeffs - 1]` with `knots[i] <= t < knots[i + 1]`.
/// The right end of the domain maps to the last span.
fn find_span(knots: &[f64], n_coeffs: usize, degree: usize, t: f64) -> usize {
    let below = knots[degree..n_coeffs].partition_point(|&k| k <= t);
    degree + below.saturating_sub(1)
}

/// The `degree + 1` non-zero basis functions `B_{span-degree} .. B_span` at `t` (Cox-de Boor).
fn basis_functions(knots: &[f64], span: usize, degree: usize, t: f64) -> Vec<f64> {
    let mut values = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    values[0] = 1.0;
    for j in 1..=degree {
        left[j] = t - knots[span + 1 - j];
        right[j] = knots[span + j] - t;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = values[r] / (right[r + 1] + left[j - r]);
            values[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        values[j] = saved;
    }
    values
}

impl SplineRepresentation {
    /// Evaluates the spline at `t` (clamped to the knot domain).
    pub fn evaluate(&self, t: f64) -> f64 {
        let n = self.coefficients.len();
        let k = self.degree;
        let t = t.clamp(self.knots[k], self.knots[n]);
        let span = find_span(&self.knots, n, k, t);
        basis_functions(&self.knots, span, k, t)
            .iter()
            .enumerate()
            .map(|(r, b)| b * self.coefficients[span - k + r])
            .sum()
    }

    /// Parameter domain `[t_start, t_end]` covered by the knots.
    pub fn domain(&self) -> (f64, f64) {
        (
            self.knots[self.degree],
            self.knots[self.coefficients.len()],
        )
    }
}

/// Fits the interpolating B-spline through `(x[i], y[i])` (no smoothing).
///
/// Solves the collocation system `sum_j c_j B_j(x_i) = y_i`, so the spline reproduces every
/// sample. `x` must be strictly increasing; needs at least `degree + 1` samples.
pub fn fit_interpolating_spline(x: &[f64], y: &[f64], degree: usize) -> Result<SplineRepresentation> {
    if degree == 0 || degree % 2 == 0 {
        return Err(DatasetError::invalid_parameter(format!(
            "spline degree must be odd, got {degree}"
        )));
    }
    if x.len() != y.len() {
        return Err(DatasetError::invalid_parameter(format!(
            "{} parameter values vs {} samples",
            x.len(),
            y.len()
        )));
    }
    let n = x.len();
    if n < degree + 1 {
        return Err(DatasetError::insufficient_samples("spline fit", degree + 1, n));
    }
    if x.windows(2).any(|w| w[1] <= w[0]) {
        return Err(DatasetError::invalid_parameter(
            "spline parameter values must be strictly increasing",
        ));
    }

    let knots = not_a_knot_knots(x, degree);
    let mut collocation = DMatrix::<f64>::zeros(n, n);
    for (row, &t) in x.iter().enumerate() {
        let span = find_span(&knots, n, degree, t);
        for (r, value) in basis_functions(&knots, span, degree, t).into_iter().enumerate() {
            collocation[(row, span - degree + r)] = value;
        }
    }

    let rhs = DVector::from_column_slice(y);
    let coefficients = collocation
        .lu()
        .solve(&rhs)
        .ok_or_else(|| DatasetError::invalid_parameter("spline collocation matrix is singular"))?;

    Ok(SplineRepresentation {
        knots,
        coefficients: coefficients.iter().copied().collect(),
        degree,
    })
}

/// Fits one axis against its local sample index `0, 1, ..., n-1`.
pub fn encode_axis(values: &[f64], config: &SplineConfig) -> Result<SplineRepresentation> {
    let x: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    fit_interpolating_spline(&x, values, config.degree)
}

/// Fits each axis row of a (3, len) window.
pub fn encode_window(window: &Window, config: &SplineConfig) -> Result<WindowSplines> {
    let axis = |i: usize| encode_axis(&window.row(i).to_vec(), config);
    Ok(WindowSplines {
        axes: [axis(0)?, axis(1)?, axis(2)?],
    })
}


// src/data_analysis/bspline.rs
