//! Core domain types for the course ratings dataset.
//!
//! The dataset is a flat table: every row says "this user gave this rating
//! to this course as taught by this instructor". The same course name shows
//! up many times, once per (user, offering) pair.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of the learner who produced a rating
pub type UserId = u32;

/// Opaque course identifier, carried through to the output untouched
pub type CourseId = String;

// =============================================================================
// Record Type
// =============================================================================

/// One row of the dataset.
///
/// Column names match the headers of the exported table, so the struct
/// deserializes straight from CSV or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub user_id: UserId,
    pub course_id: CourseId,
    pub course_name: String,
    pub instructor: String,
    /// Rating this user gave this course/instructor combination
    pub rating: f32,
}

impl CourseRecord {
    pub fn new(
        user_id: UserId,
        course_id: impl Into<CourseId>,
        course_name: impl Into<String>,
        instructor: impl Into<String>,
        rating: f32,
    ) -> Self {
        Self {
            user_id,
            course_id: course_id.into(),
            course_name: course_name.into(),
            instructor: instructor.into(),
            rating,
        }
    }
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed statistics for a course name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseStats {
    pub avg_rating: f32,
    pub rating_count: u32,
    /// Number of distinct instructors that taught this course
    pub instructor_count: u32,
}

// =============================================================================
// Dataset - The In-Memory Table
// =============================================================================

/// Immutable, already-loaded collection of course records plus lookup indices.
///
/// Records are kept in file order. Several operations break ties by "first
/// row in the dataset", so that order is part of the contract and indices
/// only ever store positions into `records`.
#[derive(Debug, Default)]
pub struct Dataset {
    pub(crate) records: Vec<CourseRecord>,

    /// Row positions per user, ascending
    pub(crate) user_index: HashMap<UserId, Vec<usize>>,
    /// Row positions per course name, ascending
    pub(crate) course_index: HashMap<String, Vec<usize>>,
    /// Distinct course names in order of first appearance
    pub(crate) course_order: Vec<String>,

    pub(crate) course_stats: HashMap<String, CourseStats>,
}

impl Dataset {
    /// Creates a new, empty Dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from rows already in memory, keeping their order.
    pub fn from_records(records: Vec<CourseRecord>) -> Self {
        let mut dataset = Self::new();
        for record in records {
            dataset.insert_record(record);
        }
        dataset.compute_course_stats();
        dataset
    }

    /// All rows in dataset order
    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows produced by one user. Empty for an unknown user.
    pub fn get_user_records(&self, user_id: UserId) -> impl Iterator<Item = &CourseRecord> + '_ {
        self.user_index
            .get(&user_id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.records[idx])
    }

    /// Rows for one course name, in dataset order
    pub fn get_course_records<'a>(
        &'a self,
        course_name: &str,
    ) -> impl Iterator<Item = &'a CourseRecord> + 'a {
        self.course_index
            .get(course_name)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.records[idx])
    }

    /// Distinct course names in order of first appearance
    pub fn course_names(&self) -> &[String] {
        &self.course_order
    }

    pub fn contains_course(&self, course_name: &str) -> bool {
        self.course_index.contains_key(course_name)
    }

    /// Get precomputed statistics for a course
    pub fn get_course_stats(&self, course_name: &str) -> Option<&CourseStats> {
        self.course_stats.get(course_name)
    }

    /// Append a row and update the primary indices.
    ///
    /// Stats are not refreshed here; call `compute_course_stats` once the
    /// last row is in.
    pub fn insert_record(&mut self, record: CourseRecord) {
        let idx = self.records.len();

        self.user_index.entry(record.user_id).or_default().push(idx);

        match self.course_index.get_mut(&record.course_name) {
            Some(rows) => rows.push(idx),
            None => {
                self.course_order.push(record.course_name.clone());
                self.course_index.insert(record.course_name.clone(), vec![idx]);
            }
        }

        self.records.push(record);
    }

    /// Get counts (users, courses, records) for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.user_index.len(),
            self.course_index.len(),
            self.records.len(),
        )
    }
}
