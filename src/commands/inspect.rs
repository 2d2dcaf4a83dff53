// src/commands/inspect.rs

use std::fmt::Write;
use std::path::Path;

use crate::axis_names::format_per_axis;
use crate::data_analysis::statistics::StatsRecord;
use crate::dataset::bundle::{load_bundle, Bundle, ChunkBundle, SegmentBundle, SplineRecord};
use crate::error::Result;

fn describe_record(out: &mut String, name: &str, record: &StatsRecord) {
    let _ = writeln!(out, "{name} ({} samples):", record.sample_count);
    let _ = writeln!(out, "  mean: {}", format_per_axis(&record.mean));
    let _ = writeln!(out, "  std: {}", format_per_axis(&record.std));
    let _ = writeln!(out, "  covariance: {:?}", record.covariance);
    let _ = writeln!(out, "  inverse_covariance: {:?}", record.inverse_covariance);
    let _ = writeln!(out, "  whitening: {:?}", record.whitening);
}

fn describe_splines(out: &mut String, label: &str, records: &[SplineRecord]) {
    let Some(first) = records.first() else {
        return;
    };
    let axis = &first.splines.axes[0];
    let _ = writeln!(
        out,
        "{label}_splines: {} records, degree {}, {} knots and {} coefficients per axis",
        records.len(),
        axis.degree,
        axis.knots.len(),
        axis.coefficients.len()
    );
}

fn describe_segments(out: &mut String, bundle: &SegmentBundle) {
    let _ = writeln!(out, "channel: {}", bundle.channel.name());
    let _ = writeln!(out, "inp_seg_len: {}", bundle.inp_seg_len);
    let _ = writeln!(out, "out_seg_len: {}", bundle.out_seg_len);
    let _ = writeln!(out, "num_input_segments: {}", bundle.num_input_segments);
    let _ = writeln!(out, "num_output_segments: {}", bundle.num_output_segments);
    let _ = writeln!(out, "input_segments: shape {:?}", bundle.input_segments.shape());
    let _ = writeln!(out, "output_segments: shape {:?}", bundle.output_segments.shape());
    let _ = writeln!(out, "files: {}", bundle.files.len());
    for range in &bundle.files {
        let _ = writeln!(
            out,
            "  {}: windows {}..{} ({})",
            range.source,
            range.start,
            range.start + range.count,
            range.count
        );
    }
    describe_splines(out, "input", &bundle.input_splines);
    describe_splines(out, "output", &bundle.output_splines);
}

fn describe_chunks(out: &mut String, bundle: &ChunkBundle) {
    let _ = writeln!(out, "channel: {}", bundle.channel.name());
    let _ = writeln!(out, "seg_len: {}", bundle.seg_len);
    let _ = writeln!(out, "num_segments: {}", bundle.num_segments);
    let _ = writeln!(out, "files: {}", bundle.files.len());
    for file in &bundle.files {
        let _ = writeln!(
            out,
            "  {}: {} windows, shape {:?}",
            file.source,
            file.num_segments,
            file.segments.shape()
        );
    }
}

/// Human-readable listing of a bundle's fields, shapes and counts.
pub fn describe_bundle(bundle: &Bundle) -> String {
    let mut out = format!("kind: {}\n", bundle.kind());
    match bundle {
        Bundle::Segments(b) => describe_segments(&mut out, b),
        Bundle::Chunks(b) => describe_chunks(&mut out, b),
        Bundle::PositionStats(s) => {
            describe_record(&mut out, "position", &s.position);
            let _ = writeln!(out, "max_length: {}", s.max_length);
        }
        Bundle::VelocityStats(s) => {
            let _ = writeln!(out, "magnitude_mean: {}", s.magnitude_mean);
            let _ = writeln!(out, "magnitude_std: {}", s.magnitude_std);
            let _ = writeln!(out, "magnitude_variance: {}", s.magnitude_variance);
            let _ = writeln!(out, "sample_count: {}", s.sample_count);
            match &s.axes {
                Some(axes) => describe_record(&mut out, "velocity components", axes),
                None => {
                    let _ = writeln!(out, "velocity components: omitted (singular covariance)");
                }
            }
            let _ = writeln!(out, "max_velocity: {}", s.max_velocity);
        }
    }
    out
}

/// `inspect`: prints a saved bundle and checks its internal bookkeeping.
pub fn run_inspect(bundle_path: &Path) -> Result<Bundle> {
    let bundle = load_bundle(bundle_path)?;
    println!("{}", bundle_path.display());
    print!("{}", describe_bundle(&bundle));
    match &bundle {
        Bundle::Segments(b) => b.check_consistency()?,
        Bundle::Chunks(b) => b.check_consistency()?,
        Bundle::PositionStats(_) | Bundle::VelocityStats(_) => {}
    }
    Ok(bundle)
}


// src/commands/inspect.rs
