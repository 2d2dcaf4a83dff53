// src/dataset/aggregator.rs

use crate::config::SplineConfig;
use crate::data_analysis::bspline::{encode_window, WindowSplines};
use crate::data_analysis::segmentation::{
    chunk_channel, extract_channel, pack_windows, pair_channel, Channel,
};
use crate::data_input::trajectory::Trajectory;
use crate::dataset::bundle::{ChunkBundle, FileChunks, FileSegmentRange, SegmentBundle, SplineRecord};
use crate::error::{DatasetError, Result};
use crate::types::Window;

/// Collects input/output pairs across files, in the order files are added.
///
/// Global window indices run contiguously across files; `files` records the range each
/// source contributed. Spline records share the global index of their window.
#[derive(Debug)]
pub struct SegmentAggregator {
    channel: Channel,
    inp_len: usize,
    out_len: usize,
    splines: Option<SplineConfig>,
    inputs: Vec<Window>,
    outputs: Vec<Window>,
    files: Vec<FileSegmentRange>,
    input_splines: Vec<SplineRecord>,
    output_splines: Vec<SplineRecord>,
}

impl SegmentAggregator {
    /// With `splines` set, every window is also spline-encoded, which needs both lengths to be
    /// at least `degree + 1`.
    pub fn new(
        channel: Channel,
        inp_len: usize,
        out_len: usize,
        splines: Option<SplineConfig>,
    ) -> Result<Self> {
        if inp_len == 0 || out_len == 0 {
            return Err(DatasetError::invalid_parameter(format!(
                "input and output segment lengths must be at least 1 (got {inp_len}, {out_len})"
            )));
        }
        if let Some(config) = &splines {
            let min = config.min_window_len();
            let shortest = inp_len.min(out_len);
            if shortest < min {
                return Err(DatasetError::insufficient_samples("spline fit", min, shortest));
            }
        }
        Ok(Self {
            channel,
            inp_len,
            out_len,
            splines,
            inputs: Vec::new(),
            outputs: Vec::new(),
            files: Vec::new(),
            input_splines: Vec::new(),
            output_splines: Vec::new(),
        })
    }

    /// Number of pairs collected so far.
    pub fn total(&self) -> usize {
        self.inputs.len()
    }

    /// Cuts one trajectory into pairs and appends them. Returns the number of pairs added.
    ///
    /// On error nothing is appended, so the caller can skip the file and continue.
    pub fn add_file(&mut self, source: &str, trajectory: &Trajectory) -> Result<usize> {
        let channel = extract_channel(trajectory, self.channel)?;
        let pairs = pair_channel(&channel, self.inp_len, self.out_len)?;

        let encoded: Vec<(WindowSplines, WindowSplines)> = match &self.splines {
            Some(config) => pairs
                .iter()
                .map(|pair| Ok((encode_window(&pair.input, config)?, encode_window(&pair.output, config)?)))
                .collect::<Result<_>>()?,
            None => Vec::new(),
        };

        let start = self.total();
        for (local_index, (input, output)) in encoded.into_iter().enumerate() {
            let global_index = start + local_index;
            self.input_splines.push(SplineRecord {
                global_index,
                source: source.to_string(),
                local_index,
                splines: input,
            });
            self.output_splines.push(SplineRecord {
                global_index,
                source: source.to_string(),
                local_index,
                splines: output,
            });
        }

        let count = pairs.len();
        for pair in pairs {
            self.inputs.push(pair.input);
            self.outputs.push(pair.output);
        }
        self.files.push(FileSegmentRange {
            source: source.to_string(),
            start,
            count,
        });
        Ok(count)
    }

    pub fn finish(self) -> SegmentBundle {
        let total = self.inputs.len();
        SegmentBundle {
            channel: self.channel,
            inp_seg_len: self.inp_len,
            out_seg_len: self.out_len,
            num_input_segments: total,
            num_output_segments: self.outputs.len(),
            input_segments: pack_windows(&self.inputs, self.inp_len),
            output_segments: pack_windows(&self.outputs, self.out_len),
            files: self.files,
            input_splines: self.input_splines,
            output_splines: self.output_splines,
        }
    }
}

/// Collects plain windows per file.
#[derive(Debug)]
pub struct ChunkAggregator {
    channel: Channel,
    seg_len: usize,
    files: Vec<FileChunks>,
}

impl ChunkAggregator {
    pub fn new(channel: Channel, seg_len: usize) -> Result<Self> {
        if seg_len == 0 {
            return Err(DatasetError::invalid_parameter(
                "segment length must be at least 1",
            ));
        }
        Ok(Self {
            channel,
            seg_len,
            files: Vec::new(),
        })
    }

    pub fn total(&self) -> usize {
        self.files.iter().map(|f| f.num_segments).sum()
    }

    pub fn add_file(&mut self, source: &str, trajectory: &Trajectory) -> Result<usize> {
        let channel = extract_channel(trajectory, self.channel)?;
        let chunks = chunk_channel(&channel, self.seg_len)?;
        let segments = pack_windows(chunks.iter().map(|c| &c.window), self.seg_len);
        let count = chunks.len();
        self.files.push(FileChunks {
            source: source.to_string(),
            num_segments: count,
            segments,
        });
        Ok(count)
    }

    pub fn finish(self) -> ChunkBundle {
        ChunkBundle {
            channel: self.channel,
            seg_len: self.seg_len,
            num_segments: self.files.iter().map(|f| f.num_segments).sum(),
            files: self.files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line_trajectory(n: usize, step: f64) -> Trajectory {
        let times = (0..n).map(|i| i as f64 * 0.1).collect();
        let positions = (0..n)
            .map(|i| {
                let s = i as f64 * step;
                [s, 2.0 * s, (s * 0.5).sin()]
            })
            .collect();
        Trajectory::new(times, positions).unwrap()
    }

    #[test]
    fn test_segment_counts_across_files() {
        let mut agg = SegmentAggregator::new(Channel::Position, 3, 2, None).unwrap();
        assert_eq!(agg.add_file("a.csv", &line_trajectory(12, 1.0)).unwrap(), 2);
        assert_eq!(agg.add_file("b.csv", &line_trajectory(4, 1.0)).unwrap(), 0);
        assert_eq!(agg.add_file("c.csv", &line_trajectory(16, 1.0)).unwrap(), 3);
        let bundle = agg.finish();
        assert_eq!(bundle.num_input_segments, 5);
        assert_eq!(bundle.num_output_segments, 5);
        assert_eq!(bundle.input_segments.dim(), (3, 3, 5));
        assert_eq!(bundle.output_segments.dim(), (3, 2, 5));
        assert_eq!(bundle.files[2].start, 2);
        assert!(bundle.check_consistency().is_ok());
        assert!(!bundle.has_splines());

        // Window 2 is the first window of c.csv.
        assert_eq!(bundle.input_segments[[1, 0, 2]], 0.0);
        assert_eq!(bundle.output_segments[[0, 1, 1]], 9.0);
    }

    #[test]
    fn test_velocity_channel_is_one_shorter() {
        let mut agg = SegmentAggregator::new(Channel::Velocity, 3, 2, None).unwrap();
        // 10 positions give 9 velocities, so only one 5-sample pair.
        assert_eq!(agg.add_file("a.csv", &line_trajectory(10, 1.0)).unwrap(), 1);
        let bundle = agg.finish();
        assert_abs_diff_eq!(bundle.input_segments[[0, 0, 0]], 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_spline_records_follow_global_index() {
        let config = SplineConfig { degree: 3 };
        let mut agg = SegmentAggregator::new(Channel::Position, 4, 4, Some(config)).unwrap();
        agg.add_file("a.csv", &line_trajectory(17, 0.3)).unwrap();
        agg.add_file("b.csv", &line_trajectory(8, 0.3)).unwrap();
        let bundle = agg.finish();
        assert_eq!(bundle.num_input_segments, 3);
        assert_eq!(bundle.input_splines.len(), 3);
        assert_eq!(bundle.output_splines.len(), 3);
        let last = &bundle.input_splines[2];
        assert_eq!(last.source, "b.csv");
        assert_eq!(last.local_index, 0);
        assert_eq!(last.global_index, 2);
        assert!(bundle.check_consistency().is_ok());
    }

    #[test]
    fn test_short_windows_rejected_with_splines() {
        let config = SplineConfig { degree: 3 };
        assert!(matches!(
            SegmentAggregator::new(Channel::Position, 3, 5, Some(config)),
            Err(DatasetError::InsufficientSamples { min: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_failed_file_leaves_aggregator_untouched() {
        let mut agg = SegmentAggregator::new(Channel::Velocity, 1, 1, None).unwrap();
        agg.add_file("a.csv", &line_trajectory(5, 1.0)).unwrap();
        let before = agg.total();
        assert!(agg.add_file("tiny.csv", &line_trajectory(1, 1.0)).is_err());
        assert_eq!(agg.total(), before);
        assert_eq!(agg.finish().files.len(), 1);
    }

    #[test]
    fn test_chunks_per_file() {
        let mut agg = ChunkAggregator::new(Channel::Position, 4).unwrap();
        agg.add_file("a.csv", &line_trajectory(10, 1.0)).unwrap();
        agg.add_file("b.csv", &line_trajectory(3, 1.0)).unwrap();
        let bundle = agg.finish();
        assert_eq!(bundle.num_segments, 2);
        assert_eq!(bundle.files[0].segments.dim(), (3, 4, 2));
        assert_eq!(bundle.files[1].num_segments, 0);
        assert_eq!(bundle.files[0].segments[[0, 3, 1]], 7.0);
        assert!(bundle.check_consistency().is_ok());
    }
}

// src/dataset/aggregator.rs
