//! Filter that restricts rows to an explicit set of course names.

use crate::error::Result;
use crate::traits::Filter;
use data_loader::CourseRecord;
use std::collections::HashSet;

/// Keeps rows whose course name is one of the selected courses.
///
/// Selection order is irrelevant here; the instructor selector walks the
/// caller's order itself.
pub struct SelectedCoursesFilter {
    courses: HashSet<String>,
}

impl SelectedCoursesFilter {
    pub fn new<I, S>(courses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            courses: courses.into_iter().map(Into::into).collect(),
        }
    }
}

impl Filter for SelectedCoursesFilter {
    fn name(&self) -> &str {
        "SelectedCoursesFilter"
    }

    fn apply<'a>(&self, candidates: Vec<&'a CourseRecord>) -> Result<Vec<&'a CourseRecord>> {
        let filtered: Vec<&CourseRecord> = candidates
            .into_iter()
            .filter(|record| self.courses.contains(&record.course_name))
            .collect();
        Ok(filtered)
    }
}
