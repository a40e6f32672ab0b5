//! Filter that enforces a ratings floor on individual rows.
//!
//! Rows below the floor are dropped even when they are the only rows a
//! course has.

use crate::error::Result;
use crate::traits::Filter;
use data_loader::CourseRecord;

/// Keeps rows whose rating is at least `min_rating` (inclusive).
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Lowest rating a row may have and still pass (typically 4.0)
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a CourseRecord>) -> Result<Vec<&'a CourseRecord>> {
        let filtered: Vec<&CourseRecord> = candidates
            .into_iter()
            .filter(|record| record.rating >= self.min_rating)
            .collect();

        Ok(filtered)
    }
}
