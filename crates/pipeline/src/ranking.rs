//! Ranking engine: top-N courses a user has not taken yet.
//!
//! ## Algorithm
//! 1. Collect the course names the user already has rows for
//! 2. Drop every row of those courses (AlreadyTakenFilter)
//! 3. Keep one representative row per remaining course: the highest
//!    rating, with the earliest row in dataset order winning ties
//! 4. Score each representative by its rating
//! 5. Stable sort by score, descending, and keep the first `limit`
//!
//! Courses are grouped in course-name order, and the sort is stable, so
//! equal scores come out alphabetically by course name.

use crate::context::build_user_context;
use crate::error::{PipelineError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::AlreadyTakenFilter;
use crate::types::RecommendationRow;
use data_loader::{CourseRecord, Dataset, UserId};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Ranks untaken courses by their best-rated offering.
#[derive(Debug, Clone)]
pub struct RankingEngine {
    /// Shared reference to the dataset (read-only, so no Mutex needed)
    dataset: Arc<Dataset>,
}

impl RankingEngine {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// Top `limit` distinct courses `user_id` has not taken, best first.
    ///
    /// An unknown user has taken nothing. A short candidate list gives a
    /// short result. `limit == 0` is rejected with `InvalidArgument`.
    #[instrument(skip(self))]
    pub fn recommend(&self, user_id: UserId, limit: usize) -> Result<Vec<RecommendationRow>> {
        if limit == 0 {
            return Err(PipelineError::InvalidArgument(
                "limit must be at least 1".to_string(),
            ));
        }

        let context = build_user_context(&self.dataset, user_id);
        debug!(
            "User {} has taken {} courses",
            user_id,
            context.taken_courses.len()
        );

        let pipeline =
            FilterPipeline::new().add_filter(AlreadyTakenFilter::new(context.taken_courses));
        let candidates = pipeline.apply(self.dataset.records().iter().collect())?;
        if candidates.is_empty() {
            debug!("No candidate courses left for user {}", user_id);
            return Ok(Vec::new());
        }

        let mut rows: Vec<RecommendationRow> = best_row_per_course(candidates)
            .into_iter()
            .map(RecommendationRow::from_record)
            .collect();
        debug!("{} unique candidate courses", rows.len());

        // sort_by is stable: equal scores keep course-name order
        rows.sort_by(|a, b| {
            b.recommendation_score
                .partial_cmp(&a.recommendation_score)
                .unwrap_or(Ordering::Equal)
        });
        rows.truncate(limit);

        Ok(rows)
    }
}

/// Reduce rows to one per course name, keeping the highest rating.
///
/// A later row only replaces the current best when strictly better, so the
/// first maximal row in input order wins. Output is ordered by course name.
pub fn best_row_per_course<'a>(candidates: Vec<&'a CourseRecord>) -> Vec<&'a CourseRecord> {
    let mut best: BTreeMap<&'a str, &'a CourseRecord> = BTreeMap::new();

    for record in candidates {
        match best.entry(record.course_name.as_str()) {
            Entry::Occupied(mut entry) => {
                if record.rating > entry.get().rating {
                    entry.insert(record);
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(record);
            }
        }
    }

    best.into_values().collect()
}
