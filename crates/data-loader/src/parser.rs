//! Parsers for course ratings exports.
//!
//! Supported layouts:
//! - `.csv` / `.tsv`: header row naming at least `user_id`, `course_id`,
//!   `course_name`, `instructor` and `rating`. Column order is free and
//!   extra columns are ignored.
//! - `.json`: a top-level array of objects with the same field names.
//!
//! Rows come back in file order; nothing here reorders or deduplicates.

use crate::error::{DataLoadError, Result};
use crate::types::CourseRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Columns every record needs
pub const REQUIRED_COLUMNS: &[&str] = &["user_id", "course_id", "course_name", "instructor", "rating"];

/// On-disk layout of a dataset file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Tsv,
    Json,
}

impl DatasetFormat {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => Ok(DatasetFormat::Csv),
            "tsv" => Ok(DatasetFormat::Tsv),
            "json" => Ok(DatasetFormat::Json),
            _ => Err(DataLoadError::UnsupportedFormat { extension }),
        }
    }
}

/// Open a dataset file, mapping a missing file to `FileNotFound`
fn open_file(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        }),
        Err(e) => Err(DataLoadError::IoError(e)),
    }
}

/// Parse a dataset file, choosing the parser from its extension
pub fn parse_file(path: &Path) -> Result<Vec<CourseRecord>> {
    let format = DatasetFormat::from_path(path)?;
    let reader = open_file(path)?;
    let label = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match format {
        DatasetFormat::Csv => parse_delimited(reader, b',', &label),
        DatasetFormat::Tsv => parse_delimited(reader, b'\t', &label),
        DatasetFormat::Json => parse_json(reader),
    }
}

/// Parse headered delimited text into records.
///
/// `file` is only used to label errors.
pub fn parse_delimited<R: Read>(reader: R, delimiter: u8, file: &str) -> Result<Vec<CourseRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(DataLoadError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for row in rdr.deserialize::<CourseRecord>() {
        let record = row.map_err(|e| row_error(file, e))?;
        records.push(record);
    }

    Ok(records)
}

/// Parse a JSON array of records
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<CourseRecord>> {
    let records: Vec<CourseRecord> = serde_json::from_reader(reader)?;
    Ok(records)
}

/// Attach file/line context to a CSV error when the reader knows the position
fn row_error(file: &str, err: csv::Error) -> DataLoadError {
    match err.position() {
        Some(position) => DataLoadError::ParseError {
            file: file.to_string(),
            line: position.line(),
            reason: match err.kind() {
                csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
                _ => err.to_string(),
            },
        },
        None => DataLoadError::Csv(err),
    }
}
