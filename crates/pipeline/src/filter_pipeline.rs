//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::error::Result;
use crate::traits::Filter;
use data_loader::CourseRecord;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(SelectedCoursesFilter::new(["Intro to Rust"]))
///     .add_filter(MinimumRatingFilter::new(4.0));
///
/// let eligible = pipeline.apply(dataset.records().iter().collect())?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// Each stage logs its input and output counts at debug level. The
    /// first failing filter aborts the run.
    pub fn apply<'a>(&self, candidates: Vec<&'a CourseRecord>) -> Result<Vec<&'a CourseRecord>> {
        let mut current = candidates;
        for filter in &self.filters {
            debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current)?;
            debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
