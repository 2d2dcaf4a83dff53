// src/main.rs

use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use trajectory_dataset::cli::{Cli, Commands};
use trajectory_dataset::commands::chunk::run_chunk_many;
use trajectory_dataset::commands::distribution::run_distribution;
use trajectory_dataset::commands::inspect::run_inspect;
use trajectory_dataset::commands::plot::{run_plot, run_plot_segments};
use trajectory_dataset::commands::resample::run_resample;
use trajectory_dataset::commands::segment::{run_segment_many, run_segment_single};
use trajectory_dataset::commands::stats::run_stats;
use trajectory_dataset::commands::velocity::run_velocity;
use trajectory_dataset::config::Config;
use trajectory_dataset::crate_version;
use trajectory_dataset::error::Result;

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    debug!("Configuration: {:?}", config);

    match cli.command {
        Commands::SegmentSingle {
            file,
            inp_seg_len,
            out_seg_len,
            compute_velocity,
            save_path,
        } => run_segment_single(
            &file,
            inp_seg_len,
            out_seg_len,
            compute_velocity,
            &save_path,
            &config,
        ),
        Commands::SegmentMany {
            directory,
            inp_seg_len,
            out_seg_len,
            compute_velocity,
            with_splines,
            save_path,
        } => run_segment_many(
            &directory,
            inp_seg_len,
            out_seg_len,
            compute_velocity,
            with_splines,
            &save_path,
            &config,
        ),
        Commands::ChunkMany {
            directory,
            seg_len,
            compute_velocity,
            save_path,
        } => run_chunk_many(&directory, seg_len, compute_velocity, &save_path),
        Commands::Resample {
            directory,
            sample_time,
        } => run_resample(&directory, sample_time).map(|_| ()),
        Commands::Plot {
            file,
            directory,
            count,
            plot_velocity,
            output,
        } => run_plot(
            file.as_deref(),
            directory.as_deref(),
            count,
            plot_velocity,
            output.as_deref(),
            &config,
        ),
        Commands::Stats { directory } => run_stats(&directory, &config).map(|_| ()),
        Commands::Velocity {
            directory,
            velocity_only,
            resample,
            sample_time,
        } => run_velocity(&directory, velocity_only, resample, sample_time, &config).map(|_| ()),
        Commands::Distribution { directory, title } => {
            run_distribution(&directory, &title, &config).map(|_| ())
        }
        Commands::Inspect { bundle } => run_inspect(&bundle).map(|_| ()),
        Commands::PlotSegments {
            bundle,
            count,
            per_row,
            output,
        } => run_plot_segments(&bundle, count, per_row, output.as_deref(), &config),
    }
}

fn main() -> ExitCode {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
    debug!("trajectory-dataset {}", crate_version());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

// src/main.rs
