// src/commands/segment.rs

use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::data_analysis::segmentation::Channel;
use crate::data_input::file_discovery::file_label;
use crate::data_input::trajectory_parser::parse_trajectory_file;
use crate::dataset::aggregator::SegmentAggregator;
use crate::dataset::bundle::{save_bundle, Bundle, SegmentBundle};
use crate::error::Result;

use super::for_each_trajectory;

fn summary(bundle: &SegmentBundle, save_path: &Path) -> String {
    let mut text = format!(
        "Saved {} {} input/output pairs ({} + {} samples) from {} file(s) to {}",
        bundle.num_input_segments,
        bundle.channel.name(),
        bundle.inp_seg_len,
        bundle.out_seg_len,
        bundle.files.len(),
        save_path.display()
    );
    if bundle.has_splines() {
        text.push_str(&format!(
            "\n  Spline records: {} input, {} output",
            bundle.input_splines.len(),
            bundle.output_splines.len()
        ));
    }
    text
}

/// `segment-single`: pairs one file and always spline-encodes every window.
pub fn run_segment_single(
    file: &Path,
    inp_seg_len: usize,
    out_seg_len: usize,
    compute_velocity: bool,
    save_path: &Path,
    config: &Config,
) -> Result<()> {
    let channel = Channel::from_compute_velocity(compute_velocity);
    let mut aggregator =
        SegmentAggregator::new(channel, inp_seg_len, out_seg_len, Some(config.spline.clone()))?;

    let trajectory = parse_trajectory_file(file)?;
    let label = file_label(file);
    info!("Loaded {} samples from {}", trajectory.len(), label);
    if aggregator.add_file(&label, &trajectory)? == 0 {
        warn!(
            "{label} has too few {} samples for one {}+{} pair",
            channel.name(),
            inp_seg_len,
            out_seg_len
        );
    }

    let bundle = aggregator.finish();
    bundle.check_consistency()?;
    let summary = summary(&bundle, save_path);
    save_bundle(save_path, &Bundle::Segments(bundle))?;
    println!("{summary}");
    Ok(())
}

/// `segment-many`: pairs every trajectory in a directory into one bundle.
pub fn run_segment_many(
    directory: &Path,
    inp_seg_len: usize,
    out_seg_len: usize,
    compute_velocity: bool,
    with_splines: bool,
    save_path: &Path,
    config: &Config,
) -> Result<()> {
    let channel = Channel::from_compute_velocity(compute_velocity);
    let splines = with_splines.then(|| config.spline.clone());
    let mut aggregator = SegmentAggregator::new(channel, inp_seg_len, out_seg_len, splines)?;

    for_each_trajectory(directory, |_, label, trajectory| {
        let count = aggregator.add_file(label, trajectory)?;
        if count == 0 {
            warn!("{label} yields no input/output pairs");
        } else {
            info!("{label}: {count} pairs");
        }
        Ok(())
    })?;

    let bundle = aggregator.finish();
    bundle.check_consistency()?;
    let summary = summary(&bundle, save_path);
    save_bundle(save_path, &Bundle::Segments(bundle))?;
    println!("{summary}");
    Ok(())
}

// src/commands/segment.rs
