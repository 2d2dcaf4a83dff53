// src/commands/chunk.rs

use std::path::Path;

use tracing::{info, warn};

use crate::data_analysis::segmentation::Channel;
use crate::dataset::aggregator::ChunkAggregator;
use crate::dataset::bundle::{save_bundle, Bundle};
use crate::error::Result;

use super::for_each_trajectory;

/// `chunk-many`: plain fixed-length windows per file, saved as one bundle.
pub fn run_chunk_many(
    directory: &Path,
    seg_len: usize,
    compute_velocity: bool,
    save_path: &Path,
) -> Result<()> {
    let channel = Channel::from_compute_velocity(compute_velocity);
    let mut aggregator = ChunkAggregator::new(channel, seg_len)?;

    for_each_trajectory(directory, |_, label, trajectory| {
        let count = aggregator.add_file(label, trajectory)?;
        if count == 0 {
            warn!("{label} is shorter than one {seg_len}-sample window");
        } else {
            info!("{label}: {count} windows");
        }
        Ok(())
    })?;

    let bundle = aggregator.finish();
    bundle.check_consistency()?;
    let summary = format!(
        "Saved {} {} windows of {} samples from {} file(s) to {}",
        bundle.num_segments,
        channel.name(),
        seg_len,
        bundle.files.len(),
        save_path.display()
    );
    save_bundle(save_path, &Bundle::Chunks(bundle))?;
    println!("{summary}");
    Ok(())
}

// src/commands/chunk.rs
