// src/data_input/file_discovery.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::TRAJECTORY_EXTENSIONS;
use crate::error::{DatasetError, Result};

/// Returns true for `.csv` / `.txt` files (case-insensitive extension).
pub fn is_trajectory_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            TRAJECTORY_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Lists the trajectory files directly inside `dir`, sorted by file name.
pub fn trajectory_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(DatasetError::PathNotFound(dir.to_path_buf()));
    }
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_trajectory_file(path))
        .collect();
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// File name as a display string (used as the per-file key in bundles).
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parent directory of `dir`, where directory commands write their outputs.
pub fn output_parent(dir: &Path) -> PathBuf {
    let absolute = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    match absolute.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}


// src/data_input/file_discovery.rs
