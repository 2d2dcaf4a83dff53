// src/plot_functions/plot_segment_pairs.rs

use std::error::Error;
use std::path::Path;

use ndarray::{ArrayView2, Axis};

use crate::constants::{COLOR_SEGMENT_INPUT, COLOR_SEGMENT_OUTPUT, GRID_SUBPLOT_SIZE, LINE_WIDTH_PLOT};
use crate::dataset::bundle::SegmentBundle;
use crate::plot_framework::{
    draw_3d_panel, draw_panel_grid, grid_shape, MarkerStyle, Panel3d, PlotSeries3d,
};
use crate::types::PlotPoints3;

/// `count` distinct global indices spread evenly over `0..total`, in ascending order.
/// Clamped to `total`.
pub fn evenly_spaced_indices(total: usize, count: usize) -> Vec<usize> {
    if count >= total {
        return (0..total).collect();
    }
    (0..count).map(|i| i * total / count).collect()
}

fn window_points(window: ArrayView2<f64>) -> PlotPoints3 {
    window
        .axis_iter(Axis(1))
        .map(|sample| (sample[0], sample[1], sample[2]))
        .collect()
}

/// Panel for pair `index`: input samples as circles, output samples as crosses.
pub fn segment_pair_panel(bundle: &SegmentBundle, index: usize) -> Panel3d {
    let input = bundle.input_segments.index_axis(Axis(2), index);
    let output = bundle.output_segments.index_axis(Axis(2), index);
    Panel3d {
        title: format!("Segment {index}"),
        series: vec![
            PlotSeries3d {
                points: window_points(input),
                label: "Input Segment".to_string(),
                color: *COLOR_SEGMENT_INPUT,
                stroke_width: LINE_WIDTH_PLOT,
                style: MarkerStyle::Circles,
            },
            PlotSeries3d {
                points: window_points(output),
                label: "Output Segment".to_string(),
                color: *COLOR_SEGMENT_OUTPUT,
                stroke_width: LINE_WIDTH_PLOT,
                style: MarkerStyle::Crosses,
            },
        ],
        arrows: Vec::new(),
    }
}

/// Renders the selected pairs `per_row` panels wide.
pub fn plot_segment_pairs(
    bundle: &SegmentBundle,
    indices: &[usize],
    per_row: usize,
    output_path: &Path,
) -> Result<bool, Box<dyn Error>> {
    if indices.is_empty() {
        println!("  Skipping '{}': bundle holds no segment pairs.", output_path.display());
        return Ok(false);
    }
    let panels: Vec<Panel3d> = indices
        .iter()
        .map(|&index| segment_pair_panel(bundle, index))
        .collect();
    let (rows, cols) = grid_shape(panels.len(), per_row);
    let size = (cols as u32 * GRID_SUBPLOT_SIZE, rows as u32 * GRID_SUBPLOT_SIZE);
    let title = format!(
        "{} input/output pairs ({} + {} samples)",
        bundle.channel.name(),
        bundle.inp_seg_len,
        bundle.out_seg_len
    );
    draw_panel_grid(output_path, &title, size, (rows, cols), panels.len(), |area, i| {
        draw_3d_panel(area, &panels[i])
    })?;
    println!("  Segment plot saved as '{}'.", output_path.display());
    Ok(true)
}


// src/plot_functions/plot_segment_pairs.rs
