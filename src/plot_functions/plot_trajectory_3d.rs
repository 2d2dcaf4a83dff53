// src/plot_functions/plot_trajectory_3d.rs

use std::error::Error;
use std::path::Path;

use crate::config::PlotConfig;
use crate::constants::{COLOR_TRAJECTORY, GRID_SUBPLOT_SIZE, LINE_WIDTH_PLOT};
use crate::data_input::trajectory::{norm3, Trajectory, VelocitySeries};
use crate::plot_framework::{
    draw_3d_panel, draw_panel_grid, draw_unavailable_message, finite_bounds, grid_shape,
    map_value_to_color, Arrow3d, MarkerStyle, Panel3d, PlotSeries3d,
};

/// Builds the panel for one trajectory: the position polyline and, when `velocity` is given,
/// one arrow per velocity sample from `p[i + 1]` to `p[i + 1] + v[i] * arrow_scale`,
/// coloured by speed.
pub fn trajectory_panel(
    title: &str,
    trajectory: &Trajectory,
    velocity: Option<&VelocitySeries>,
    arrow_scale: f64,
) -> Panel3d {
    let points = trajectory
        .positions()
        .iter()
        .map(|p| (p[0], p[1], p[2]))
        .collect();

    let arrows = match velocity {
        Some(velocity) => {
            let speeds = velocity.magnitudes();
            let (min_speed, max_speed) = finite_bounds(speeds.iter().copied()).unwrap_or((0.0, 1.0));
            trajectory
                .positions()
                .iter()
                .skip(1)
                .zip(velocity.velocities())
                .map(|(p, v)| Arrow3d {
                    from: (p[0], p[1], p[2]),
                    to: (
                        p[0] + v[0] * arrow_scale,
                        p[1] + v[1] * arrow_scale,
                        p[2] + v[2] * arrow_scale,
                    ),
                    color: map_value_to_color(norm3(v), min_speed, max_speed),
                })
                .collect()
        }
        None => Vec::new(),
    };

    Panel3d {
        title: title.to_string(),
        series: vec![PlotSeries3d {
            points,
            label: "Trajectory".to_string(),
            color: *COLOR_TRAJECTORY,
            stroke_width: LINE_WIDTH_PLOT,
            style: MarkerStyle::LineWithCircles,
        }],
        arrows,
    }
}

/// Renders a single trajectory panel at the configured plot size.
///
/// Returns `Ok(false)` without writing anything when the panel has no samples.
pub fn plot_trajectory(
    panel: &Panel3d,
    output_path: &Path,
    config: &PlotConfig,
) -> Result<bool, Box<dyn Error>> {
    if !panel.has_data() {
        println!("  Skipping '{}': trajectory has no samples.", panel.title);
        return Ok(false);
    }
    draw_panel_grid(
        output_path,
        &panel.title,
        (config.width, config.height),
        (1, 1),
        1,
        |area, _| draw_3d_panel(area, panel),
    )?;
    println!("  Trajectory plot saved as '{}'.", output_path.display());
    Ok(true)
}

/// Renders several trajectories side by side, `config.grid_columns` per row.
pub fn plot_trajectory_grid(
    panels: &[Panel3d],
    output_path: &Path,
    main_title: &str,
    config: &PlotConfig,
) -> Result<bool, Box<dyn Error>> {
    if panels.iter().all(|p| !p.has_data()) {
        println!("  Skipping '{}': no trajectory has samples.", output_path.display());
        return Ok(false);
    }
    let (rows, cols) = grid_shape(panels.len(), config.grid_columns);
    let size = (cols as u32 * GRID_SUBPLOT_SIZE, rows as u32 * GRID_SUBPLOT_SIZE);
    draw_panel_grid(output_path, main_title, size, (rows, cols), panels.len(), |area, i| {
        let panel = &panels[i];
        if panel.has_data() {
            draw_3d_panel(area, panel)
        } else {
            draw_unavailable_message(area, &panel.title, "No samples")
        }
    })?;
    println!("  Trajectory grid saved as '{}'.", output_path.display());
    Ok(true)
}


// src/plot_functions/plot_trajectory_3d.rs
