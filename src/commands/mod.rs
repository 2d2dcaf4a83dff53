// src/commands/mod.rs
// One `run_*` entry point per CLI subcommand.

pub mod chunk;
pub mod distribution;
pub mod inspect;
pub mod plot;
pub mod resample;
pub mod segment;
pub mod stats;
pub mod velocity;

use std::error::Error;
use std::path::Path;

use tracing::{info, warn};

use crate::data_input::file_discovery::{file_label, trajectory_files};
use crate::data_input::trajectory::Trajectory;
use crate::data_input::trajectory_parser::parse_trajectory_file;
use crate::error::{DatasetError, Result};

/// Loads every trajectory file in `dir` (sorted by name) and hands it to `visit`.
///
/// Per-file failures from loading or from `visit` are logged and the file is skipped; any
/// other error aborts. Returns the number of files visited successfully, or
/// `NoTrajectoryFiles` when there were none.
pub fn for_each_trajectory<F>(dir: &Path, mut visit: F) -> Result<usize>
where
    F: FnMut(&Path, &str, &Trajectory) -> Result<()>,
{
    let files = trajectory_files(dir)?;
    info!("Found {} trajectory files in {}", files.len(), dir.display());

    let mut processed = 0;
    for path in &files {
        let label = file_label(path);
        let outcome = parse_trajectory_file(path).and_then(|trajectory| visit(path, &label, &trajectory));
        match outcome {
            Ok(()) => processed += 1,
            Err(e) if e.is_skippable() => warn!("Skipping {label}: {e}"),
            Err(e) => return Err(e),
        }
    }

    if processed == 0 {
        return Err(DatasetError::NoTrajectoryFiles(dir.to_path_buf()));
    }
    Ok(processed)
}

/// Wraps a plotters failure.
pub(crate) fn plot_failed(e: Box<dyn Error>) -> DatasetError {
    DatasetError::Plot(e.to_string())
}


// src/commands/mod.rs
