// src/plot_framework.rs

use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, SeriesLabelPosition};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, Cross, PathElement, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use crate::constants::{
    FONT_SIZE_AXIS_LABEL, FONT_SIZE_CHART_TITLE, FONT_SIZE_LEGEND, FONT_SIZE_MAIN_TITLE,
    FONT_SIZE_MESSAGE, HISTOGRAM_OPACITY, LIGHT_GRID_OPACITY, LINE_WIDTH_LEGEND, MARKER_SIZE,
    VIEW_PITCH, VIEW_SCALE, VIEW_YAW,
};
use crate::types::PlotPoints3;

pub type PlotArea<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Finite min/max of `values`, or None when there are none.
pub fn finite_bounds<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Padded x/y/z ranges covering every point.
pub fn ranges_3d<'a, I>(points: I) -> Option<[Range<f64>; 3]>
where
    I: IntoIterator<Item = &'a (f64, f64, f64)> + Clone,
{
    let range = |pick: fn(&(f64, f64, f64)) -> f64| {
        finite_bounds(points.clone().into_iter().map(pick)).map(|(lo, hi)| {
            let (lo, hi) = calculate_range(lo, hi);
            lo..hi
        })
    };
    Some([range(|p| p.0)?, range(|p| p.1)?, range(|p| p.2)?])
}

/// Rows and columns for `count` panels laid out `columns` wide.
pub fn grid_shape(count: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    let cols = count.clamp(1, columns);
    let rows = count.div_ceil(columns).max(1);
    (rows, cols)
}

/// Maps `value` in `[min, max]` onto the viridis colormap.
pub fn map_value_to_color(value: f64, min: f64, max: f64) -> RGBColor {
    if !value.is_finite() || !min.is_finite() || !max.is_finite() {
        return RGBColor(0, 0, 0);
    }
    let span = (max - min).abs().max(1e-9);
    let t = ((value.clamp(min, max) - min) / span).clamp(0.0, 1.0);
    let color = colorous::VIRIDIS.eval_continuous(t);
    RGBColor(color.r, color.g, color.b)
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &PlotArea,
    subject: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    const CHAR_WIDTH_RATIO: f32 = 0.6;
    const LINE_HEIGHT_SPACING: i32 = 4;

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{subject} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;
    let estimated_text_height = lines.len().saturating_mul(estimated_line_height as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - estimated_text_height / 2;

    let text_style = ("sans-serif", FONT_SIZE_MESSAGE).into_font().color(&RED);
    for (i, line) in lines.iter().enumerate() {
        area.draw(&Text::new(
            line.to_string(),
            (center_x, center_y + i as i32 * estimated_line_height),
            text_style.clone(),
        ))?;
    }
    Ok(())
}

/// How a 3D series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Polyline with a circle on every sample.
    LineWithCircles,
    Circles,
    Crosses,
}

#[derive(Clone)]
pub struct PlotSeries3d {
    pub points: PlotPoints3,
    pub label: String,
    pub color: RGBColor,
    pub stroke_width: u32,
    pub style: MarkerStyle,
}

/// A straight segment from `from` to `to`, e.g. a velocity arrow.
#[derive(Clone)]
pub struct Arrow3d {
    pub from: (f64, f64, f64),
    pub to: (f64, f64, f64),
    pub color: RGBColor,
}

#[derive(Clone)]
pub struct Panel3d {
    pub title: String,
    pub series: Vec<PlotSeries3d>,
    pub arrows: Vec<Arrow3d>,
}

impl Panel3d {
    pub fn has_data(&self) -> bool {
        self.series.iter().any(|s| !s.points.is_empty())
    }
}

/// Draws one 3D panel. Axis ranges cover every series point and arrow tip.
pub fn draw_3d_panel(area: &PlotArea, panel: &Panel3d) -> Result<(), Box<dyn Error>> {
    let mut extent: PlotPoints3 = panel
        .series
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .collect();
    extent.extend(panel.arrows.iter().flat_map(|a| [a.from, a.to]));
    let Some([x_range, y_range, z_range]) = ranges_3d(&extent) else {
        return draw_unavailable_message(area, &panel.title, "No data points");
    };

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(10)
        .build_cartesian_3d(x_range, y_range, z_range)?;
    chart.with_projection(|mut pb| {
        pb.yaw = VIEW_YAW;
        pb.pitch = VIEW_PITCH;
        pb.scale = VIEW_SCALE;
        pb.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(LIGHT_GRID_OPACITY))
        .max_light_lines(3)
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let mut legend_series_count = 0;
    for s in &panel.series {
        if s.points.is_empty() {
            continue;
        }
        let color = s.color;
        let annotation = match s.style {
            MarkerStyle::LineWithCircles => {
                chart.draw_series(
                    s.points
                        .iter()
                        .map(|&p| Circle::new(p, MARKER_SIZE, color.filled())),
                )?;
                chart.draw_series(LineSeries::new(
                    s.points.iter().copied(),
                    color.stroke_width(s.stroke_width),
                ))?
            }
            MarkerStyle::Circles => chart.draw_series(
                s.points
                    .iter()
                    .map(|&p| Circle::new(p, MARKER_SIZE, color.filled())),
            )?,
            MarkerStyle::Crosses => chart.draw_series(
                s.points
                    .iter()
                    .map(|&p| Cross::new(p, MARKER_SIZE, color.stroke_width(s.stroke_width))),
            )?,
        };
        if !s.label.is_empty() {
            annotation.label(&s.label).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH_LEGEND))
            });
            legend_series_count += 1;
        }
    }

    chart.draw_series(
        panel
            .arrows
            .iter()
            .map(|a| PathElement::new(vec![a.from, a.to], a.color.stroke_width(1))),
    )?;

    if legend_series_count > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font(("sans-serif", FONT_SIZE_LEGEND))
            .draw()?;
    }
    Ok(())
}

/// Histogram counts over `bins` equal-width bins spanning the finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramData {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl HistogramData {
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        let (lo, hi) = finite_bounds(values.iter().copied())?;
        let bins = bins.max(1);
        let (lo, hi) = if hi - lo < 1e-12 {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        };
        let width = (hi - lo) / bins as f64;
        let edges = (0..=bins).map(|i| lo + i as f64 * width).collect();
        let mut counts = vec![0; bins];
        for &v in values.iter().filter(|v| v.is_finite()) {
            let bin = (((v - lo) / width) as usize).min(bins - 1);
            counts[bin] += 1;
        }
        Some(Self { edges, counts })
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Clone)]
pub struct HistogramPanel {
    pub title: String,
    pub x_label: String,
    pub values: Vec<f64>,
    pub color: RGBColor,
    pub bins: usize,
}

pub fn draw_histogram_panel(area: &PlotArea, panel: &HistogramPanel) -> Result<(), Box<dyn Error>> {
    let Some(hist) = HistogramData::from_values(&panel.values, panel.bins) else {
        return draw_unavailable_message(area, &panel.title, "No data points");
    };
    let x_start = hist.edges[0];
    let x_end = hist.edges[hist.edges.len() - 1];
    let y_end = (hist.max_count() as f64 * 1.1).max(1.0);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", FONT_SIZE_CHART_TITLE))
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_start..x_end, 0.0..y_end)?;
    chart
        .configure_mesh()
        .x_desc(&panel.x_label)
        .y_desc("Frequency")
        .x_labels(10)
        .y_labels(8)
        .y_label_formatter(&|y| format!("{y:.0}"))
        .light_line_style(WHITE.mix(0.7))
        .label_style(("sans-serif", FONT_SIZE_AXIS_LABEL))
        .draw()?;

    let fill = panel.color.mix(HISTOGRAM_OPACITY).filled();
    chart.draw_series(hist.counts.iter().enumerate().map(|(i, &count)| {
        Rectangle::new(
            [(hist.edges[i], 0.0), (hist.edges[i + 1], count as f64)],
            fill,
        )
    }))?;
    Ok(())
}

/// Renders `panels` into a grid image, drawing `main_title` across the top.
///
/// `draw_panel` is called once per cell with the panel index; cells past the panel count stay
/// blank.
pub fn draw_panel_grid<F>(
    output_path: &Path,
    main_title: &str,
    size: (u32, u32),
    shape: (usize, usize),
    panel_count: usize,
    mut draw_panel: F,
) -> Result<(), Box<dyn Error>>
where
    F: FnMut(&PlotArea, usize) -> Result<(), Box<dyn Error>>,
{
    let root_area = BitMapBackend::new(output_path, size).into_drawing_area();
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        main_title.to_string(),
        (10, 10),
        ("sans-serif", FONT_SIZE_MAIN_TITLE)
            .into_font()
            .color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let cells = margined_root_area.split_evenly(shape);
    for (index, cell) in cells.iter().enumerate().take(panel_count) {
        draw_panel(cell, index)?;
    }
    root_area.present()?;
    Ok(())
}


// src/plot_framework.rs
