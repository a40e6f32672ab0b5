//! Filter to remove courses the user has already taken.
//!
//! Exclusion is by course name and applies to every row of that course,
//! including rows other users left for different instructors.

use crate::error::Result;
use crate::traits::Filter;
use data_loader::CourseRecord;
use std::collections::HashSet;

/// Removes rows whose course name appears in the user's own history.
///
/// ## Algorithm
/// Uses a HashSet of taken course names for O(1) lookups.
pub struct AlreadyTakenFilter {
    taken_courses: HashSet<String>,
}

impl AlreadyTakenFilter {
    pub fn new(taken_courses: HashSet<String>) -> Self {
        Self { taken_courses }
    }
}

impl Filter for AlreadyTakenFilter {
    fn name(&self) -> &str {
        "AlreadyTakenFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a CourseRecord>) -> Result<Vec<&'a CourseRecord>> {
        let filtered: Vec<&CourseRecord> = candidates
            .into_iter()
            .filter(|record| !self.taken_courses.contains(&record.course_name))
            .collect();
        Ok(filtered)
    }
}
