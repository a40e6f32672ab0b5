//! Unique instructor selection for a chosen set of courses.
//!
//! ## Algorithm
//! 1. Keep rows of the selected courses rated at or above the floor
//! 2. Stable sort those rows by rating, descending
//! 3. Walk the courses in the caller's order; each course claims the first
//!    row (in rating order) whose instructor no earlier course claimed
//! 4. Courses with nothing left to claim are skipped
//!
//! This is a greedy first-fit, not an optimal matching. Earlier courses in
//! the selection get first pick of instructors who teach several of them.

use crate::error::Result;
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{MinimumRatingFilter, SelectedCoursesFilter};
use crate::types::{InstructorSelection, RecommendationRow};
use data_loader::{CourseRecord, Dataset};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default minimum rating for a row to be eligible
pub const DEFAULT_RATING_FLOOR: f32 = 4.0;

/// Assigns at most one distinct instructor to each selected course.
#[derive(Debug, Clone)]
pub struct UniqueInstructorSelector {
    dataset: Arc<Dataset>,
    rating_floor: f32,
}

impl UniqueInstructorSelector {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            rating_floor: DEFAULT_RATING_FLOOR,
        }
    }

    /// Configure the ratings floor (default: 4.0)
    pub fn with_rating_floor(mut self, rating_floor: f32) -> Self {
        self.rating_floor = rating_floor;
        self
    }

    pub fn rating_floor(&self) -> f32 {
        self.rating_floor
    }

    /// Pick the best still-available instructor for each selected course.
    ///
    /// `selected_courses` is processed in the given order. A repeated name
    /// is only considered at its first position.
    #[instrument(skip(self, selected_courses), fields(selected = selected_courses.len()))]
    pub fn select_best_unique_instructors<S: AsRef<str>>(
        &self,
        selected_courses: &[S],
    ) -> Result<InstructorSelection> {
        let mut seen = HashSet::new();
        let order: Vec<&str> = selected_courses
            .iter()
            .map(AsRef::as_ref)
            .filter(|course| seen.insert(*course))
            .collect();

        if order.is_empty() {
            return Ok(InstructorSelection::NothingSelected);
        }

        let pipeline = FilterPipeline::new()
            .add_filter(SelectedCoursesFilter::new(order.iter().copied()))
            .add_filter(MinimumRatingFilter::new(self.rating_floor));
        let mut eligible = pipeline.apply(self.dataset.records().iter().collect())?;

        if eligible.is_empty() {
            debug!(
                "No rows at or above {} for the selected courses",
                self.rating_floor
            );
            return Ok(InstructorSelection::NoQualifyingRows);
        }

        // Stable, so equal ratings keep dataset order
        eligible.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));

        let mut rows_by_course: HashMap<&str, Vec<&CourseRecord>> = HashMap::new();
        for record in eligible {
            rows_by_course
                .entry(record.course_name.as_str())
                .or_default()
                .push(record);
        }

        let mut used_instructors: HashSet<&str> = HashSet::new();
        let mut assigned = Vec::with_capacity(order.len());

        for course in order {
            let pick = rows_by_course.get(course).and_then(|rows| {
                rows.iter()
                    .find(|record| !used_instructors.contains(record.instructor.as_str()))
            });

            match pick {
                Some(record) => {
                    used_instructors.insert(record.instructor.as_str());
                    assigned.push(RecommendationRow::from_record(record));
                }
                None => debug!("Skipping '{}': no unclaimed instructor at or above the floor", course),
            }
        }

        Ok(InstructorSelection::Assigned(assigned))
    }
}
