//! Error types for the ranking pipeline.

use thiserror::Error;

/// Errors surfaced by the ranking and selection operations.
///
/// Empty inputs are never errors here: an unknown user, an empty dataset or
/// a course nobody rated all produce empty results instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// A caller-supplied argument is outside what the operation accepts
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PipelineError>;
