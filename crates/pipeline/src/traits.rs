//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that lets the ranking and
//! selection stages be built from small, composable row filters.

use crate::error::Result;
use data_loader::CourseRecord;

/// Core trait for filtering dataset rows.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows a built pipeline to be shared between callers
/// - Filters borrow rows from the dataset and never copy or mutate them
/// - Filters must keep the relative order of the rows they let through;
///   tie-breaking downstream relies on dataset order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidate rows.
    ///
    /// # Arguments
    /// * `candidates` - The rows to filter (takes ownership of the Vec)
    ///
    /// # Returns
    /// * `Ok(Vec<&CourseRecord>)` - The rows that passed, in input order
    /// * `Err` - If filtering fails
    fn apply<'a>(&self, candidates: Vec<&'a CourseRecord>) -> Result<Vec<&'a CourseRecord>>;
}
