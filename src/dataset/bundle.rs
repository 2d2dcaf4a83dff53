// src/dataset/bundle.rs

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::data_analysis::bspline::WindowSplines;
use crate::data_analysis::segmentation::Channel;
use crate::data_analysis::statistics::{PositionStats, VelocityStats};
use crate::error::{DatasetError, Result};
use crate::types::PackedWindows;

/// Where one source file's windows sit inside the packed arrays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSegmentRange {
    pub source: String,
    /// Global index of the file's first window.
    pub start: usize,
    pub count: usize,
}

/// Spline encoding of one packed window, traceable to its source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineRecord {
    /// Index along the last axis of the packed array.
    pub global_index: usize,
    pub source: String,
    /// Index of the window within its source file.
    pub local_index: usize,
    pub splines: WindowSplines,
}

/// Input/output pairs from one or more trajectory files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentBundle {
    pub channel: Channel,
    pub inp_seg_len: usize,
    pub out_seg_len: usize,
    pub num_input_segments: usize,
    pub num_output_segments: usize,
    /// Shape (3, inp_seg_len, num_input_segments).
    pub input_segments: PackedWindows,
    /// Shape (3, out_seg_len, num_output_segments).
    pub output_segments: PackedWindows,
    pub files: Vec<FileSegmentRange>,
    #[serde(default)]
    pub input_splines: Vec<SplineRecord>,
    #[serde(default)]
    pub output_splines: Vec<SplineRecord>,
}

/// Plain windows of one source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileChunks {
    pub source: String,
    pub num_segments: usize,
    /// Shape (3, seg_len, num_segments).
    pub segments: PackedWindows,
}

/// Plain fixed-length windows, kept per source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkBundle {
    pub channel: Channel,
    pub seg_len: usize,
    pub num_segments: usize,
    pub files: Vec<FileChunks>,
}

/// Every document this tool writes, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Bundle {
    Segments(SegmentBundle),
    Chunks(ChunkBundle),
    PositionStats(PositionStats),
    VelocityStats(VelocityStats),
}

impl Bundle {
    pub fn kind(&self) -> &'static str {
        match self {
            Bundle::Segments(_) => "segments",
            Bundle::Chunks(_) => "chunks",
            Bundle::PositionStats(_) => "position_stats",
            Bundle::VelocityStats(_) => "velocity_stats",
        }
    }
}

fn inconsistent(msg: String) -> DatasetError {
    DatasetError::invalid_parameter(format!("inconsistent bundle: {msg}"))
}

fn check_spline_records(records: &[SplineRecord], expected: usize, label: &str) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    if records.len() != expected {
        return Err(inconsistent(format!(
            "{} {label} spline records for {expected} windows",
            records.len()
        )));
    }
    if let Some((i, _)) = records
        .iter()
        .enumerate()
        .find(|(i, record)| record.global_index != *i)
    {
        return Err(inconsistent(format!("{label} spline record {i} is out of order")));
    }
    Ok(())
}

impl SegmentBundle {
    /// Checks counts, shapes, per-file ranges and spline indices against each other.
    pub fn check_consistency(&self) -> Result<()> {
        if self.num_input_segments != self.num_output_segments {
            return Err(inconsistent(format!(
                "{} inputs vs {} outputs",
                self.num_input_segments, self.num_output_segments
            )));
        }
        if self.input_segments.dim() != (3, self.inp_seg_len, self.num_input_segments) {
            return Err(inconsistent(format!(
                "input array shape {:?}",
                self.input_segments.dim()
            )));
        }
        if self.output_segments.dim() != (3, self.out_seg_len, self.num_output_segments) {
            return Err(inconsistent(format!(
                "output array shape {:?}",
                self.output_segments.dim()
            )));
        }
        let mut expected_start = 0;
        for range in &self.files {
            if range.start != expected_start {
                return Err(inconsistent(format!(
                    "'{}' starts at {} instead of {}",
                    range.source, range.start, expected_start
                )));
            }
            expected_start += range.count;
        }
        if expected_start != self.num_input_segments {
            return Err(inconsistent(format!(
                "per-file counts sum to {} but total is {}",
                expected_start, self.num_input_segments
            )));
        }
        check_spline_records(&self.input_splines, self.num_input_segments, "input")?;
        check_spline_records(&self.output_splines, self.num_output_segments, "output")
    }

    pub fn has_splines(&self) -> bool {
        !self.input_splines.is_empty() || !self.output_splines.is_empty()
    }
}

impl ChunkBundle {
    pub fn check_consistency(&self) -> Result<()> {
        let mut total = 0;
        for file in &self.files {
            if file.segments.dim() != (3, self.seg_len, file.num_segments) {
                return Err(inconsistent(format!(
                    "'{}' array shape {:?}",
                    file.source,
                    file.segments.dim()
                )));
            }
            total += file.num_segments;
        }
        if total != self.num_segments {
            return Err(inconsistent(format!(
                "per-file counts sum to {total} but total is {}",
                self.num_segments
            )));
        }
        Ok(())
    }
}

/// Writes a bundle as one JSON document, replacing any previous file.
pub fn save_bundle(path: &Path, bundle: &Bundle) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, bundle)?;
    writer.flush()?;
    Ok(())
}

pub fn load_bundle(path: &Path) -> Result<Bundle> {
    if !path.exists() {
        return Err(DatasetError::PathNotFound(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}


// src/dataset/bundle.rs
