//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::{DEFAULT_DISTRIBUTION_TITLE, DEFAULT_SEGMENTS_FILE};

/// Prepare 3D drone trajectory recordings as segmented, spline-encoded, normalized datasets
#[derive(Parser, Debug)]
#[command(name = "trajectory-dataset")]
#[command(author, version = crate::crate_version(), about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cut one trajectory into spline-encoded input/output pairs
    SegmentSingle {
        /// Trajectory file (CSV or whitespace-separated TXT)
        file: PathBuf,

        /// Samples per input window
        inp_seg_len: usize,

        /// Samples per output window
        out_seg_len: usize,

        /// Segment the finite-difference velocity instead of position
        #[arg(long)]
        compute_velocity: bool,

        /// Output bundle path
        #[arg(long, default_value = DEFAULT_SEGMENTS_FILE)]
        save_path: PathBuf,
    },

    /// Cut every trajectory in a directory into input/output pairs
    SegmentMany {
        /// Directory of trajectory files
        directory: PathBuf,

        /// Samples per input window
        inp_seg_len: usize,

        /// Samples per output window
        out_seg_len: usize,

        /// Segment the finite-difference velocity instead of position
        #[arg(long)]
        compute_velocity: bool,

        /// Also fit a cubic B-spline to every window
        #[arg(long)]
        with_splines: bool,

        /// Output bundle path
        #[arg(long, default_value = DEFAULT_SEGMENTS_FILE)]
        save_path: PathBuf,
    },

    /// Cut every trajectory in a directory into plain fixed-length windows
    ChunkMany {
        /// Directory of trajectory files
        directory: PathBuf,

        /// Samples per window
        seg_len: usize,

        /// Chunk the finite-difference velocity instead of position
        #[arg(long)]
        compute_velocity: bool,

        /// Output bundle path
        #[arg(long, default_value = DEFAULT_SEGMENTS_FILE)]
        save_path: PathBuf,
    },

    /// Resample every trajectory in a directory to a fixed time step
    Resample {
        /// Directory of trajectory files
        directory: PathBuf,

        /// Sample time in seconds
        sample_time: f64,
    },

    /// Render trajectories in 3D
    Plot {
        /// Single trajectory file
        #[arg(long, conflicts_with = "directory")]
        file: Option<PathBuf>,

        /// Directory of trajectory files
        #[arg(long)]
        directory: Option<PathBuf>,

        /// Number of trajectories to plot from the directory
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Overlay finite-difference velocity arrows
        #[arg(long)]
        plot_velocity: bool,

        /// Output PNG path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Dataset statistics, histograms and normalized trajectories
    Stats {
        /// Directory of trajectory files
        directory: PathBuf,
    },

    /// Write per-sample velocity tables
    Velocity {
        /// Directory of trajectory files
        directory: PathBuf,

        /// Write only timestamp and velocity columns
        #[arg(long)]
        velocity_only: bool,

        /// Resample before differencing
        #[arg(long)]
        resample: bool,

        /// Sample time in seconds used with --resample
        #[arg(long, requires = "resample")]
        sample_time: Option<f64>,
    },

    /// Per-axis position and velocity distributions
    Distribution {
        /// Directory of trajectory files
        directory: PathBuf,

        /// Figure title
        #[arg(long, default_value = DEFAULT_DISTRIBUTION_TITLE)]
        title: String,
    },

    /// Print the contents of a saved bundle
    Inspect {
        /// Bundle file written by this tool
        bundle: PathBuf,
    },

    /// Render input/output pairs from a segment bundle
    PlotSegments {
        /// Segment bundle
        bundle: PathBuf,

        /// Number of pairs to plot
        count: usize,

        /// Subplots per row
        #[arg(long)]
        per_row: Option<usize>,

        /// Output PNG path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
