// tests/pipeline_integration_test.rs

use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use trajectory_dataset::commands::chunk::run_chunk_many;
use trajectory_dataset::commands::inspect::run_inspect;
use trajectory_dataset::commands::resample::run_resample;
use trajectory_dataset::commands::segment::{run_segment_many, run_segment_single};
use trajectory_dataset::commands::velocity::run_velocity;
use trajectory_dataset::config::Config;
use trajectory_dataset::data_analysis::derivative::derive_velocity;
use trajectory_dataset::data_analysis::normalization::Normalizer;
use trajectory_dataset::data_analysis::segmentation::Channel;
use trajectory_dataset::data_analysis::statistics::{compute_dataset_stats, compute_stats_record};
use trajectory_dataset::data_input::trajectory_parser::parse_trajectory_file;
use trajectory_dataset::dataset::bundle::{load_bundle, Bundle};
use trajectory_dataset::error::DatasetError;
use trajectory_dataset::types::Point3;

/// Writes `n` samples of a smooth 3D path at `dt` seconds with the given delimiter.
fn trajectory_text(n: usize, dt: f64, phase: f64, delimiter: &str) -> String {
    let mut text = ["timestamp", "tx", "ty", "tz"].join(delimiter);
    text.push('\n');
    for i in 0..n {
        let t = i as f64 * dt;
        let row = [
            t,
            5.0 * (0.3 * t + phase).cos(),
            4.0 * (0.5 * t + phase).sin(),
            2.0 + (0.9 * t).sin() * 0.5 + phase,
        ];
        let fields: Vec<String> = row.iter().map(f64::to_string).collect();
        text.push_str(&fields.join(delimiter));
        text.push('\n');
    }
    text
}

/// `<tmp>/data/{a.csv, b.csv, c.txt, broken.csv, notes.md}`; outputs land in `<tmp>`.
fn dataset() -> (TempDir, PathBuf) {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("data");
    fs::create_dir(&data).unwrap();
    fs::write(data.join("a.csv"), trajectory_text(23, 0.1, 0.0, ",")).unwrap();
    fs::write(data.join("b.csv"), trajectory_text(12, 0.1, 0.7, ",")).unwrap();
    fs::write(data.join("c.txt"), trajectory_text(31, 0.1, 1.3, " ")).unwrap();
    fs::write(data.join("broken.csv"), "timestamp,tx,ty,tz\n0,1,2,3\n0.1,abc,2,3\n").unwrap();
    fs::write(data.join("notes.md"), "not a trajectory").unwrap();
    (root, data)
}

fn load_segments(path: &Path) -> trajectory_dataset::dataset::bundle::SegmentBundle {
    match load_bundle(path).unwrap() {
        Bundle::Segments(bundle) => bundle,
        other => panic!("expected segments, got {}", other.kind()),
    }
}

#[test]
fn test_segment_many_aggregates_valid_files() {
    let (root, data) = dataset();
    let save_path = root.path().join("segments.json");
    run_segment_many(&data, 3, 2, false, false, &save_path, &Config::default()).unwrap();

    let bundle = load_segments(&save_path);
    // a: 23 / 5 = 4, b: 12 / 5 = 2, c: 31 / 5 = 6; broken.csv is skipped.
    let sources: Vec<&str> = bundle.files.iter().map(|f| f.source.as_str()).collect();
    assert_eq!(sources, vec!["a.csv", "b.csv", "c.txt"]);
    let counts: Vec<usize> = bundle.files.iter().map(|f| f.count).collect();
    assert_eq!(counts, vec![4, 2, 6]);
    assert_eq!(bundle.num_input_segments, 12);
    assert_eq!(bundle.num_output_segments, 12);
    assert_eq!(bundle.input_segments.shape(), &[3, 3, 12]);
    assert_eq!(bundle.output_segments.shape(), &[3, 2, 12]);
    assert!(!bundle.has_splines());
    bundle.check_consistency().unwrap();

    // Global window 4 is the first window of b.csv: its first sample is b's first position.
    let b = parse_trajectory_file(&data.join("b.csv")).unwrap();
    for axis in 0..3 {
        assert_eq!(bundle.input_segments[[axis, 0, 4]], b.positions()[0][axis]);
    }
}

#[test]
fn test_segment_many_velocity_with_splines() {
    let (root, data) = dataset();
    let save_path = root.path().join("out").join("velocity_segments.json");
    run_segment_many(&data, 4, 4, true, true, &save_path, &Config::default()).unwrap();

    let bundle = load_segments(&save_path);
    assert_eq!(bundle.channel, Channel::Velocity);
    // Velocity channels: a 22, b 11, c 30 samples; stride 8.
    let counts: Vec<usize> = bundle.files.iter().map(|f| f.count).collect();
    assert_eq!(counts, vec![2, 1, 3]);
    assert_eq!(bundle.input_splines.len(), 6);
    assert_eq!(bundle.output_splines.len(), 6);
    for (i, record) in bundle.input_splines.iter().enumerate() {
        assert_eq!(record.global_index, i);
        for axis in &record.splines.axes {
            assert_eq!(axis.degree, 3);
            assert_eq!(axis.knots.len(), 8);
            assert_eq!(axis.coefficients.len(), 4);
        }
    }
    assert_eq!(bundle.input_splines[3].source, "c.txt");
    assert_eq!(bundle.input_splines[3].local_index, 0);

    // The spline of every window reproduces the packed samples.
    let spline = &bundle.output_splines[5].splines.axes[1];
    for i in 0..4 {
        assert_abs_diff_eq!(spline.evaluate(i as f64), bundle.output_segments[[1, i, 5]], epsilon = 1e-8);
    }
}

#[test]
fn test_segment_single_encodes_splines() {
    let (root, data) = dataset();
    let save_path = root.path().join("single.json");
    run_segment_single(&data.join("a.csv"), 5, 4, false, &save_path, &Config::default()).unwrap();

    let bundle = load_segments(&save_path);
    assert_eq!(bundle.num_input_segments, 2);
    assert_eq!(bundle.input_splines.len(), 2);
    assert_eq!(bundle.files.len(), 1);
}

#[test]
fn test_segment_single_rejects_short_windows_and_missing_files() {
    let (root, data) = dataset();
    let save_path = root.path().join("single.json");
    assert!(matches!(
        run_segment_single(&data.join("a.csv"), 3, 5, false, &save_path, &Config::default()),
        Err(DatasetError::InsufficientSamples { .. })
    ));
    assert!(matches!(
        run_segment_single(&data.join("missing.csv"), 5, 5, false, &save_path, &Config::default()),
        Err(DatasetError::PathNotFound(_))
    ));
    assert!(!save_path.exists());
}

#[test]
fn test_chunk_many_keeps_files_separate() {
    let (root, data) = dataset();
    let save_path = root.path().join("chunks.json");
    run_chunk_many(&data, 10, false, &save_path).unwrap();

    match load_bundle(&save_path).unwrap() {
        Bundle::Chunks(bundle) => {
            let counts: Vec<usize> = bundle.files.iter().map(|f| f.num_segments).collect();
            assert_eq!(counts, vec![2, 1, 3]);
            assert_eq!(bundle.num_segments, 6);
            assert_eq!(bundle.files[2].segments.shape(), &[3, 10, 3]);
            bundle.check_consistency().unwrap();
        }
        other => panic!("expected chunks, got {}", other.kind()),
    }
}

#[test]
fn test_directory_without_trajectories() {
    let root = tempfile::tempdir().unwrap();
    let empty = root.path().join("empty");
    fs::create_dir(&empty).unwrap();
    let save_path = root.path().join("segments.json");
    assert!(matches!(
        run_segment_many(&empty, 3, 2, false, false, &save_path, &Config::default()),
        Err(DatasetError::NoTrajectoryFiles(_))
    ));
    assert!(matches!(
        run_chunk_many(&root.path().join("nope"), 3, false, &save_path),
        Err(DatasetError::PathNotFound(_))
    ));
}

#[test]
fn test_resample_writes_uniform_copies() {
    let root = tempfile::tempdir().unwrap();
    let data = root.path().join("raw");
    fs::create_dir(&data).unwrap();
    fs::write(
        data.join("jitter.csv"),
        "timestamp,tx,ty,tz\n0.0,0,0,0\n0.13,1.3,0,2\n0.21,2.1,0,2\n0.5,5,1,2\n",
    )
    .unwrap();

    let output_dir = run_resample(&data, 0.1).unwrap();
    assert!(output_dir.ends_with("resampled_trajectories_100ms"));
    let resampled = parse_trajectory_file(&output_dir.join("jitter.csv")).unwrap();
    assert_eq!(resampled.len(), 6);
    for (k, t) in resampled.timestamps().iter().enumerate() {
        assert_abs_diff_eq!(*t, k as f64 * 0.1, epsilon = 1e-12);
    }
    // tx grows linearly at 10 m/s across every original segment.
    for (t, p) in resampled.samples() {
        assert_abs_diff_eq!(p[0], 10.0 * t, epsilon = 1e-9);
    }
}

#[test]
fn test_velocity_tables() {
    let (_root, data) = dataset();
    let output_dir = run_velocity(&data, false, false, None, &Config::default()).unwrap();
    assert!(output_dir.ends_with("velocity_processed_csv_files"));
    let text = fs::read_to_string(output_dir.join("a.csv")).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("timestamp,tx,ty,tz,vx,vy,vz"));
    assert_eq!(lines.count(), 22);

    let only_dir = run_velocity(&data, true, true, Some(0.2), &Config::default()).unwrap();
    let text = fs::read_to_string(only_dir.join("c.txt")).unwrap();
    assert_eq!(text.lines().next(), Some("timestamp,vx,vy,vz"));
    // 31 samples over 3.0 s resampled at 0.2 s give 16 samples and 15 velocity rows.
    assert_eq!(text.lines().count(), 16);
}

#[test]
fn test_inspect_round_trip() {
    let (root, data) = dataset();
    let save_path = root.path().join("segments.json");
    run_segment_many(&data, 4, 4, false, true, &save_path, &Config::default()).unwrap();
    match run_inspect(&save_path).unwrap() {
        Bundle::Segments(bundle) => {
            // a: 23 / 8 = 2, b: 12 / 8 = 1, c: 31 / 8 = 3.
            assert_eq!(bundle.num_input_segments, 6);
            assert_eq!(bundle.input_splines.len(), 6);
        }
        other => panic!("expected segments, got {}", other.kind()),
    }
}

#[test]
fn test_pooled_normalization_has_identity_covariance() {
    let (_root, data) = dataset();
    let mut positions: Vec<Point3> = Vec::new();
    let mut velocities: Vec<Point3> = Vec::new();
    let mut trajectories = Vec::new();
    for name in ["a.csv", "b.csv", "c.txt"] {
        let traj = parse_trajectory_file(&data.join(name)).unwrap();
        positions.extend_from_slice(traj.positions());
        velocities.extend_from_slice(derive_velocity(&traj).unwrap().velocities());
        trajectories.push(traj);
    }
    let (pos_stats, vel_stats) = compute_dataset_stats(&positions, &velocities).unwrap();
    assert_eq!(pos_stats.position.sample_count, 66);
    assert_eq!(vel_stats.sample_count, 63);
    assert!(vel_stats.axes.is_some());

    let normalizer = Normalizer::from_position_stats(&pos_stats);
    let normalized: Vec<Point3> = trajectories
        .iter()
        .flat_map(|t| normalizer.normalize_trajectory(t).unwrap().positions().to_vec())
        .collect();
    let check = compute_stats_record(&normalized).unwrap();
    for i in 0..3 {
        assert_abs_diff_eq!(check.mean[i], 0.0, epsilon = 1e-9);
        for j in 0..3 {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(check.covariance[i][j], expected, epsilon = 1e-8);
        }
    }
}

#[test]
fn test_whitespace_and_comma_files_match() {
    let root = tempfile::tempdir().unwrap();
    let comma = root.path().join("comma.csv");
    let spaces = root.path().join("spaces.txt");
    fs::write(&comma, trajectory_text(15, 0.05, 0.2, ",")).unwrap();
    fs::write(&spaces, trajectory_text(15, 0.05, 0.2, "\t")).unwrap();
    assert_eq!(
        parse_trajectory_file(&comma).unwrap(),
        parse_trajectory_file(&spaces).unwrap()
    );
}

// tests/pipeline_integration_test.rs
