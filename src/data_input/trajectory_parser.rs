// src/data_input/trajectory_parser.rs

use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;
use tracing::debug;

use crate::constants::{POSITION_COLUMNS, TIMESTAMP_COLUMN};
use crate::data_input::trajectory::Trajectory;
use crate::error::{DatasetError, Result};
use crate::types::Point3;

/// Field separator of a trajectory file, chosen once from its header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `timestamp,tx,ty,tz` (spaces around fields allowed).
    Comma,
    /// `timestamp tx ty tz` separated by any run of spaces or tabs.
    Whitespace,
}

impl Delimiter {
    /// Picks the delimiter from the header line.
    pub fn detect(header_line: &str) -> Self {
        if header_line.contains(',') {
            Delimiter::Comma
        } else {
            Delimiter::Whitespace
        }
    }

    /// Rewrites a raw line so the csv reader can split it on `self.byte()`.
    fn normalize_line(self, line: &str) -> String {
        match self {
            Delimiter::Comma => line.to_string(),
            Delimiter::Whitespace => line.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }

    fn byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Whitespace => b' ',
        }
    }
}

fn parse_field(
    path: &Path,
    record: &StringRecord,
    index: usize,
    column: &str,
    line: usize,
) -> Result<f64> {
    let raw = record
        .get(index)
        .ok_or_else(|| DatasetError::malformed(path, line, format!("missing '{column}' field")))?;
    let value = raw.parse::<f64>().map_err(|_| {
        DatasetError::malformed(path, line, format!("non-numeric '{column}' value '{raw}'"))
    })?;
    if !value.is_finite() {
        return Err(DatasetError::malformed(
            path,
            line,
            format!("non-finite '{column}' value '{raw}'"),
        ));
    }
    Ok(value)
}

/// Parses a trajectory file with a `timestamp, tx, ty, tz` header.
///
/// Extra columns are ignored. Any row that cannot be parsed, and any timestamp that does
/// not strictly increase, fails the whole file with `MalformedInput` so batch callers
/// can skip it.
pub fn parse_trajectory_file(input_file_path: &Path) -> Result<Trajectory> {
    if !input_file_path.exists() {
        return Err(DatasetError::PathNotFound(input_file_path.to_path_buf()));
    }

    // First pass: drop blank lines, detect the delimiter and remember original line numbers.
    let mut delimiter: Option<Delimiter> = None;
    let mut csv_lines: Vec<String> = Vec::new();
    let mut line_numbers: Vec<usize> = Vec::new();
    {
        let reader = BufReader::new(File::open(input_file_path)?);
        for (line_index, line_result) in reader.lines().enumerate() {
            let line = line_result.map_err(|e| match e.kind() {
                ErrorKind::InvalidData => {
                    DatasetError::malformed(input_file_path, line_index + 1, "invalid UTF-8")
                }
                _ => DatasetError::Io(e),
            })?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() {
                continue;
            }
            let delim = *delimiter.get_or_insert_with(|| Delimiter::detect(trimmed_line));
            csv_lines.push(delim.normalize_line(trimmed_line));
            line_numbers.push(line_index + 1);
        }
    }

    let delimiter = delimiter
        .ok_or_else(|| DatasetError::malformed(input_file_path, 0, "file is empty"))?;
    let csv_content = csv_lines.join("\n");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter.byte())
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_content.as_bytes());
    let header_record = reader.headers()?.clone();
    debug!(
        "Headers found in {}: {:?} ({:?})",
        input_file_path.display(),
        header_record,
        delimiter
    );

    let find_column = |name: &str| header_record.iter().position(|h| h.trim() == name);
    let time_index = find_column(TIMESTAMP_COLUMN);
    let axis_indices: Vec<Option<usize>> = POSITION_COLUMNS.iter().map(|c| find_column(c)).collect();

    let mut missing: Vec<String> = Vec::new();
    if time_index.is_none() {
        missing.push(format!("'{TIMESTAMP_COLUMN}'"));
    }
    for (column, index) in POSITION_COLUMNS.iter().zip(&axis_indices) {
        if index.is_none() {
            missing.push(format!("'{column}'"));
        }
    }
    let header_line = line_numbers[0];
    let (Some(time_index), [Some(ix), Some(iy), Some(iz)]) = (time_index, axis_indices.as_slice())
    else {
        return Err(DatasetError::malformed(
            input_file_path,
            header_line,
            format!("missing required column(s): {}", missing.join(", ")),
        ));
    };
    let position_indices = [*ix, *iy, *iz];

    let mut timestamps: Vec<f64> = Vec::with_capacity(csv_lines.len().saturating_sub(1));
    let mut positions: Vec<Point3> = Vec::with_capacity(csv_lines.len().saturating_sub(1));

    for (row_index, result) in reader.records().enumerate() {
        let line = line_numbers.get(row_index + 1).copied().unwrap_or(0);
        let record = result
            .map_err(|e| DatasetError::malformed(input_file_path, line, e.to_string()))?;

        let time = parse_field(input_file_path, &record, time_index, TIMESTAMP_COLUMN, line)?;
        if let Some(&previous) = timestamps.last() {
            if time <= previous {
                return Err(DatasetError::malformed(
                    input_file_path,
                    line,
                    format!("timestamp {time} does not increase (previous {previous})"),
                ));
            }
        }

        let mut position = [0.0; 3];
        for (axis, &index) in position_indices.iter().enumerate() {
            position[axis] =
                parse_field(input_file_path, &record, index, POSITION_COLUMNS[axis], line)?;
        }

        timestamps.push(time);
        positions.push(position);
    }

    debug!(
        "Finished reading {} samples from {}",
        timestamps.len(),
        input_file_path.display()
    );

    Trajectory::new(timestamps, positions)
        .map_err(|e| DatasetError::malformed(input_file_path, 0, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str, name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_delimiter_detection() {
        assert_eq!(Delimiter::detect("timestamp,tx,ty,tz"), Delimiter::Comma);
        assert_eq!(Delimiter::detect("timestamp tx\tty  tz"), Delimiter::Whitespace);
    }

    #[test]
    fn test_parse_comma_file_with_padding() {
        let (_dir, path) = write_temp(
            "timestamp,tx,ty,tz\n0.00, 1.00000, 2.00000, 3.00000\n0.10, 1.5, 2.5, 3.5\n",
            "line_1.txt",
        );
        let traj = parse_trajectory_file(&path).unwrap();
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.positions()[1], [1.5, 2.5, 3.5]);
        assert_eq!(traj.timestamps(), &[0.0, 0.1]);
    }

    #[test]
    fn test_whitespace_file_matches_comma_file() {
        let (_d1, comma) = write_temp("timestamp,tx,ty,tz\n0,1,2,3\n1,4,5,6\n", "a.csv");
        let (_d2, spaced) =
            write_temp("timestamp   tx ty\ttz\n\n0  1 2 3\n1\t4 5   6\n", "a.txt");
        assert_eq!(
            parse_trajectory_file(&comma).unwrap(),
            parse_trajectory_file(&spaced).unwrap()
        );
    }

    #[test]
    fn test_extra_columns_and_reordering() {
        let (_dir, path) = write_temp("tz,qw,timestamp,ty,tx\n3,1,0,2,1\n", "extra.csv");
        let traj = parse_trajectory_file(&path).unwrap();
        assert_eq!(traj.positions()[0], [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_column_is_malformed() {
        let (_dir, path) = write_temp("timestamp,tx,ty\n0,1,2\n", "bad.csv");
        match parse_trajectory_file(&path) {
            Err(DatasetError::MalformedInput { reason, line, .. }) => {
                assert!(reason.contains("'tz'"));
                assert_eq!(line, 1);
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_row_reports_line() {
        let (_dir, path) = write_temp("timestamp,tx,ty,tz\n0,1,2,3\n\n1,abc,2,3\n", "bad.csv");
        match parse_trajectory_file(&path) {
            Err(DatasetError::MalformedInput { line, reason, .. }) => {
                assert_eq!(line, 4);
                assert!(reason.contains("abc"));
            }
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.csv");
        std::fs::write(&path, b"timestamp,tx,ty,tz\n0,1,2,3\n\xff\xfe,0,0,0\n").unwrap();
        match parse_trajectory_file(&path) {
            Err(err @ DatasetError::MalformedInput { line: 3, .. }) => assert!(err.is_skippable()),
            other => panic!("expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_non_increasing_timestamp_is_malformed() {
        let (_dir, path) = write_temp("timestamp,tx,ty,tz\n1,0,0,0\n0.5,0,0,0\n", "bad.csv");
        assert!(matches!(
            parse_trajectory_file(&path),
            Err(DatasetError::MalformedInput { line: 3, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_trajectory_file(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(DatasetError::PathNotFound(_))));
    }

    #[test]
    fn test_header_only_file_is_empty_trajectory() {
        let (_dir, path) = write_temp("timestamp,tx,ty,tz\n", "empty.csv");
        assert!(parse_trajectory_file(&path).unwrap().is_empty());
    }
}

// src/data_input/trajectory_parser.rs
