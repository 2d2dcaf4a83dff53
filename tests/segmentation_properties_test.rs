// tests/segmentation_properties_test.rs

use approx::assert_abs_diff_eq;
use trajectory_dataset::config::SplineConfig;
use trajectory_dataset::data_analysis::bspline::encode_window;
use trajectory_dataset::data_analysis::derivative::derive_velocity;
use trajectory_dataset::data_analysis::resample::resample_trajectory;
use trajectory_dataset::data_analysis::segmentation::{chunk_channel, pair_channel};
use trajectory_dataset::data_input::trajectory::Trajectory;
use trajectory_dataset::types::Point3;

fn flight(n: usize, dt: f64) -> Trajectory {
    let times = (0..n).map(|i| i as f64 * dt).collect();
    let positions = (0..n)
        .map(|i| {
            let t = i as f64 * dt;
            [3.0 * (0.4 * t).cos(), 2.0 * (0.7 * t).sin(), 1.5 + 0.2 * t]
        })
        .collect();
    Trajectory::new(times, positions).unwrap()
}

#[test]
fn test_chunk_count_and_contents() {
    for n in [0, 1, 7, 10, 33, 64] {
        let channel: Vec<Point3> = flight(n, 0.1).positions().to_vec();
        for len in [1, 3, 4, 10] {
            let chunks = chunk_channel(&channel, len).unwrap();
            assert_eq!(chunks.len(), n / len, "n = {n}, len = {len}");
            for (k, chunk) in chunks.iter().enumerate() {
                assert_eq!(chunk.start, k * len);
                assert_eq!(chunk.window.dim(), (3, len));
                for i in 0..len {
                    for axis in 0..3 {
                        assert_eq!(chunk.window[[axis, i]], channel[k * len + i][axis]);
                    }
                }
            }
        }
    }
}

#[test]
fn test_pairs_are_contiguous() {
    for n in [5, 12, 29, 100] {
        let channel: Vec<Point3> = flight(n, 0.1).positions().to_vec();
        for (inp, out) in [(3, 2), (4, 4), (10, 1)] {
            let pairs = pair_channel(&channel, inp, out).unwrap();
            assert_eq!(pairs.len(), n / (inp + out));
            for pair in &pairs {
                assert_eq!(pair.input.dim(), (3, inp));
                assert_eq!(pair.output.dim(), (3, out));
                // The output begins at the sample right after the input ends.
                let next = channel[pair.start + inp];
                for axis in 0..3 {
                    assert_eq!(pair.output[[axis, 0]], next[axis]);
                    assert_eq!(pair.input[[axis, inp - 1]], channel[pair.start + inp - 1][axis]);
                }
            }
        }
    }
}

#[test]
fn test_velocity_of_uniform_motion() {
    let times: Vec<f64> = (0..20).map(|i| i as f64 * 0.05).collect();
    let positions = times.iter().map(|t| [1.0 + 2.0 * t, -3.0 * t, 0.5 * t]).collect();
    let traj = Trajectory::new(times.clone(), positions).unwrap();
    let velocity = derive_velocity(&traj).unwrap();
    assert_eq!(velocity.len(), 19);
    assert_eq!(velocity.timestamps(), &times[1..]);
    for v in velocity.velocities() {
        assert_abs_diff_eq!(v[0], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[1], -3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v[2], 0.5, epsilon = 1e-9);
    }
}

#[test]
fn test_resampling_at_own_rate_is_identity() {
    let traj = flight(50, 0.1);
    let resampled = resample_trajectory(&traj, 0.1).unwrap();
    assert_eq!(resampled.len(), traj.len());
    for ((t0, p0), (t1, p1)) in traj.samples().zip(resampled.samples()) {
        assert_abs_diff_eq!(t0, t1, epsilon = 1e-9);
        for axis in 0..3 {
            assert_abs_diff_eq!(p0[axis], p1[axis], epsilon = 1e-9);
        }
    }
}

#[test]
fn test_window_splines_reproduce_samples() {
    let channel: Vec<Point3> = flight(40, 0.1).positions().to_vec();
    let config = SplineConfig::default();
    for pair in pair_channel(&channel, 8, 5).unwrap() {
        for window in [&pair.input, &pair.output] {
            let splines = encode_window(window, &config).unwrap();
            let len = window.dim().1;
            for (axis, spline) in splines.axes.iter().enumerate() {
                assert_eq!(spline.knots.len(), len + spline.degree + 1);
                assert_eq!(spline.coefficients.len(), len);
                assert!(spline.knots.windows(2).all(|k| k[0] <= k[1]));
                for i in 0..len {
                    assert_abs_diff_eq!(spline.evaluate(i as f64), window[[axis, i]], epsilon = 1e-9);
                }
            }
        }
    }
}

// tests/segmentation_properties_test.rs
