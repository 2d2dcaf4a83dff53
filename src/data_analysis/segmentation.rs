// src/data_analysis/segmentation.rs

use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::axis_names::AXIS_COUNT;
use crate::data_analysis::derivative::derive_velocity;
use crate::data_input::trajectory::Trajectory;
use crate::error::{DatasetError, Result};
use crate::types::{PackedWindows, Point3, Window};

/// Which signal of a trajectory is cut into windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Position,
    Velocity,
}

impl Channel {
    pub fn from_compute_velocity(compute_velocity: bool) -> Self {
        if compute_velocity {
            Channel::Velocity
        } else {
            Channel::Position
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Channel::Position => "position",
            Channel::Velocity => "velocity",
        }
    }
}

/// Returns the samples of the requested channel. Velocity is one sample shorter.
pub fn extract_channel(trajectory: &Trajectory, channel: Channel) -> Result<Vec<Point3>> {
    match channel {
        Channel::Position => Ok(trajectory.positions().to_vec()),
        Channel::Velocity => Ok(derive_velocity(trajectory)?.velocities().to_vec()),
    }
}

/// One plain window and the channel index it starts at.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub start: usize,
    pub window: Window,
}

/// An input window and the output window that immediately follows it.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPair {
    pub start: usize,
    pub input: Window,
    pub output: Window,
}

/// Copies `channel[start..start + len]` into a (3, len) window.
pub fn window_from_channel(channel: &[Point3], start: usize, len: usize) -> Window {
    Array2::from_shape_fn((AXIS_COUNT, len), |(axis, i)| channel[start + i][axis])
}

/// Splits a channel into `floor(N / seg_len)` non-overlapping windows
/// `[0, L), [L, 2L), ...`. Trailing samples that do not fill a window are dropped.
pub fn chunk_channel(channel: &[Point3], seg_len: usize) -> Result<Vec<Chunk>> {
    if seg_len == 0 {
        return Err(DatasetError::invalid_parameter(
            "segment length must be at least 1",
        ));
    }
    let count = channel.len() / seg_len;
    Ok((0..count)
        .map(|k| {
            let start = k * seg_len;
            Chunk {
                start,
                window: window_from_channel(channel, start, seg_len),
            }
        })
        .collect())
}

/// Emits input/output pairs at stride `inp_len + out_len` starting from index 0.
///
/// Pair `k` takes input `[s, s + inp_len)` and output `[s + inp_len, s + inp_len + out_len)`
/// with `s = k * (inp_len + out_len)`. Stops when fewer than `inp_len + out_len` samples
/// remain; partial pairs are never padded.
pub fn pair_channel(channel: &[Point3], inp_len: usize, out_len: usize) -> Result<Vec<SegmentPair>> {
    if inp_len == 0 || out_len == 0 {
        return Err(DatasetError::invalid_parameter(format!(
            "input and output segment lengths must be at least 1 (got {inp_len}, {out_len})"
        )));
    }
    let stride = inp_len + out_len;
    let count = channel.len() / stride;
    Ok((0..count)
        .map(|k| {
            let start = k * stride;
            SegmentPair {
                start,
                input: window_from_channel(channel, start, inp_len),
                output: window_from_channel(channel, start + inp_len, out_len),
            }
        })
        .collect())
}

/// Packs equally sized windows into a (3, len, count) array in iteration order.
pub fn pack_windows<'a, I>(windows: I, len: usize) -> PackedWindows
where
    I: IntoIterator<Item = &'a Window>,
{
    let windows: Vec<&Window> = windows.into_iter().collect();
    debug_assert!(windows.iter().all(|w| w.dim() == (AXIS_COUNT, len)));
    Array3::from_shape_fn((AXIS_COUNT, len, windows.len()), |(axis, i, w)| {
        windows[w][[axis, i]]
    })
}


// src/data_analysis/segmentation.rs
