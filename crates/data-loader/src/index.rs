//! Dataset building, statistics and validation.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Highest rating a learner can give
pub const MAX_RATING: f32 = 5.0;

impl Dataset {
    /// Load a course ratings export from disk.
    ///
    /// Steps:
    /// 1. Parse the file (format chosen by extension)
    /// 2. Build the user and course indices, keeping file order
    /// 3. Compute per-course statistics
    /// 4. Validate every row
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading course dataset from {:?}", path);

        let records = parser::parse_file(path)?;
        info!("Parsed {} rows", records.len());

        let dataset = Dataset::from_records(records);
        dataset.validate()?;

        let (users, courses, rows) = dataset.counts();
        info!(
            "Dataset ready: {} users, {} courses, {} rows",
            users, courses, rows
        );
        Ok(dataset)
    }

    /// Compute aggregate statistics for all courses in parallel
    pub fn compute_course_stats(&mut self) {
        let records = &self.records;
        let course_stats = self
            .course_index
            .par_iter()
            .map(|(course_name, rows)| {
                let rating_count = rows.len() as u32;
                let avg_rating = if rating_count > 0 {
                    let total: f32 = rows.iter().map(|&idx| records[idx].rating).sum();
                    total / rating_count as f32
                } else {
                    0.0
                };
                let instructor_count = rows
                    .iter()
                    .map(|&idx| records[idx].instructor.as_str())
                    .collect::<HashSet<_>>()
                    .len() as u32;

                (
                    course_name.clone(),
                    CourseStats {
                        avg_rating,
                        rating_count,
                        instructor_count,
                    },
                )
            })
            .collect();
        self.course_stats = course_stats;
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - Ratings are finite and within 0.0 - 5.0
    /// - Course names and instructor names are not blank
    pub fn validate(&self) -> Result<()> {
        let bad_row = self.records.par_iter().enumerate().find_first(|(_, record)| {
            !record.rating.is_finite()
                || !(0.0..=MAX_RATING).contains(&record.rating)
                || record.course_name.trim().is_empty()
                || record.instructor.trim().is_empty()
        });

        let Some((idx, record)) = bad_row else {
            return Ok(());
        };

        if !record.rating.is_finite() || !(0.0..=MAX_RATING).contains(&record.rating) {
            return Err(DataLoadError::InvalidValue {
                row: idx + 1,
                field: "rating".to_string(),
                value: record.rating.to_string(),
            });
        }
        let field = if record.course_name.trim().is_empty() {
            "course_name"
        } else {
            "instructor"
        };
        Err(DataLoadError::ValidationError(format!(
            "row {} has an empty {}",
            idx + 1,
            field
        )))
    }
}
