//! # Recommendation Orchestrator
//!
//! This module drives the two-step flow a front end goes through:
//! 1. Validate the user id and limit against the configured bounds
//! 2. Rank courses the user has not taken (RankingEngine)
//! 3. Hand the ranked table back to the caller for display
//! 4. Take the caller's picks from that table, in the caller's order
//! 5. Assign one distinct instructor per pick (UniqueInstructorSelector)
//!
//! The orchestrator holds no per-user state. The table returned in step 3
//! is the only link between the two calls, and the caller passes it back.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use data_loader::{Dataset, UserId};
use pipeline::{
    InstructorSelection, PipelineError, RankingEngine, RecommendationRow, UniqueInstructorSelector,
};

use crate::config::RecommenderConfig;

/// Ranked courses for one user, rounded for display.
///
/// The course names double as the options the user may pick from when
/// asking for instructors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationTable {
    pub user_id: UserId,
    pub rows: Vec<RecommendationRow>,
}

impl RecommendationTable {
    /// Course names in ranked order
    pub fn course_options(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.course_name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Main orchestrator that ties configuration, ranking and selection together
#[derive(Debug, Clone)]
pub struct RecommendationOrchestrator {
    dataset: Arc<Dataset>,
    config: RecommenderConfig,
    ranking: RankingEngine,
    selector: UniqueInstructorSelector,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator over a loaded dataset
    pub fn new(dataset: Arc<Dataset>, config: RecommenderConfig) -> Self {
        let ranking = RankingEngine::new(dataset.clone());
        let selector =
            UniqueInstructorSelector::new(dataset.clone()).with_rating_floor(config.rating_floor);
        Self {
            dataset,
            config,
            ranking,
            selector,
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Rank untaken courses for a user.
    ///
    /// `limit` falls back to the configured default. Out-of-range ids and
    /// limits fail with `PipelineError::InvalidArgument`.
    pub fn get_recommendations(
        &self,
        user_id: UserId,
        limit: Option<usize>,
    ) -> Result<RecommendationTable> {
        let start_time = Instant::now();
        let limit = limit.unwrap_or(self.config.default_limit);

        self.config.check_user_id(user_id)?;
        self.config.check_limit(limit)?;

        let rows = self
            .ranking
            .recommend(user_id, limit)
            .with_context(|| format!("Failed to rank courses for user {}", user_id))?;

        info!(
            "Ranked {} courses for user {} (limit {}) in {:.2?}",
            rows.len(),
            user_id,
            limit,
            start_time.elapsed()
        );

        Ok(RecommendationTable {
            user_id,
            rows: rows.iter().map(RecommendationRow::rounded).collect(),
        })
    }

    /// Assign instructors to courses picked from a previous ranking.
    ///
    /// Every pick must be one of `table`'s course options.
    pub fn select_instructors<S: AsRef<str>>(
        &self,
        table: &RecommendationTable,
        selected: &[S],
    ) -> Result<InstructorSelection> {
        let options = table.course_options();
        if let Some(unknown) = selected
            .iter()
            .map(AsRef::as_ref)
            .find(|course| !options.contains(course))
        {
            return Err(PipelineError::InvalidArgument(format!(
                "'{}' is not one of the recommended courses",
                unknown
            ))
            .into());
        }

        self.select_for_courses(selected)
    }

    /// Assign instructors to any courses, without a prior ranking
    pub fn select_for_courses<S: AsRef<str>>(&self, selected: &[S]) -> Result<InstructorSelection> {
        let start_time = Instant::now();

        let selection = self
            .selector
            .select_best_unique_instructors(selected)
            .context("Failed to select instructors")?;

        let requested = distinct_courses(selected);
        match &selection {
            InstructorSelection::NoQualifyingRows => warn!(
                "No instructors rated {} or above for {} selected courses",
                self.config.rating_floor, requested
            ),
            InstructorSelection::Assigned(rows) if rows.len() < requested => info!(
                "Assigned instructors to {} of {} courses; the rest had no free instructor",
                rows.len(),
                requested
            ),
            _ => {}
        }
        info!("Instructor selection finished in {:.2?}", start_time.elapsed());

        Ok(selection.rounded())
    }
}

/// Number of distinct course names in a selection; repeats are assigned once
fn distinct_courses<S: AsRef<str>>(selected: &[S]) -> usize {
    selected
        .iter()
        .map(AsRef::as_ref)
        .collect::<HashSet<&str>>()
        .len()
}
