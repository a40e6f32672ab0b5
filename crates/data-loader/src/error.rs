//! Error types for the data-loader crate.
//!
//! Every failure while reading or checking a course ratings file ends up as
//! a [`DataLoadError`]. Parse failures carry the file and line so a bad row
//! in a large export can be found quickly.

use thiserror::Error;

/// Errors that can occur during data loading and parsing
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A row in the data file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },

    /// Low-level CSV failure that has no row position attached
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON document could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A data field had an invalid value on a given row (1-based)
    #[error("Invalid value for {field} on row {row}: {value}")]
    InvalidValue {
        row: usize,
        field: String,
        value: String,
    },

    /// The header row lacks a column every record needs
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// File extension we don't know how to read
    #[error("Unsupported dataset format '{extension}' (expected csv, tsv or json)")]
    UnsupportedFormat { extension: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
