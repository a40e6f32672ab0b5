//! Output types shared by the ranking and selection stages.

use data_loader::{CourseId, CourseRecord};
use serde::{Deserialize, Serialize};

/// Round to two decimal places, as the result tables show values.
pub fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}

/// One row of a recommendation or instructor-assignment table.
///
/// Built fresh from a dataset row on every call and owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRow {
    pub course_id: CourseId,
    /// Currently the representative row's rating
    pub recommendation_score: f32,
    pub course_name: String,
    pub instructor: String,
    pub rating: f32,
}

impl RecommendationRow {
    pub fn from_record(record: &CourseRecord) -> Self {
        Self {
            course_id: record.course_id.clone(),
            recommendation_score: record.rating,
            course_name: record.course_name.clone(),
            instructor: record.instructor.clone(),
            rating: record.rating,
        }
    }

    /// Copy with the numeric columns rounded for display
    pub fn rounded(&self) -> Self {
        Self {
            recommendation_score: round2(self.recommendation_score),
            rating: round2(self.rating),
            ..self.clone()
        }
    }
}

/// Outcome of an instructor selection.
///
/// `NoQualifyingRows` means the selected courses had rows, but none of them
/// reached the ratings floor. Callers show an explanation for it instead of
/// an empty table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "rows", rename_all = "snake_case")]
pub enum InstructorSelection {
    /// The caller passed no courses
    NothingSelected,
    /// Nothing in the selected courses reached the ratings floor
    NoQualifyingRows,
    /// One row per course that could be given an instructor, in selection order
    Assigned(Vec<RecommendationRow>),
}

impl InstructorSelection {
    pub fn rows(&self) -> &[RecommendationRow] {
        match self {
            InstructorSelection::Assigned(rows) => rows,
            _ => &[],
        }
    }

    pub fn into_rows(self) -> Vec<RecommendationRow> {
        match self {
            InstructorSelection::Assigned(rows) => rows,
            _ => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }

    /// Same outcome with every row rounded for display
    pub fn rounded(&self) -> Self {
        match self {
            InstructorSelection::Assigned(rows) => {
                InstructorSelection::Assigned(rows.iter().map(RecommendationRow::rounded).collect())
            }
            other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(4.567), 4.57);
        assert_eq!(round2(4.0), 4.0);
        assert_eq!(round2(3.333_333), 3.33);
    }

    #[test]
    fn test_row_from_record_scores_by_rating() {
        let record = CourseRecord::new(9, "C7", "Rust", "Alice", 4.256);
        let row = RecommendationRow::from_record(&record);

        assert_eq!(row.recommendation_score, row.rating);
        assert_eq!(row.course_id, "C7");

        let rounded = row.rounded();
        assert_eq!(rounded.rating, 4.26);
        assert_eq!(rounded.recommendation_score, 4.26);
        assert_eq!(rounded.instructor, "Alice");
    }

    #[test]
    fn test_selection_rows() {
        assert!(InstructorSelection::NothingSelected.rows().is_empty());
        assert!(InstructorSelection::NoQualifyingRows.is_empty());
        assert_ne!(
            InstructorSelection::NothingSelected,
            InstructorSelection::NoQualifyingRows
        );

        let record = CourseRecord::new(1, "C1", "Rust", "Alice", 4.5);
        let selection = InstructorSelection::Assigned(vec![RecommendationRow::from_record(&record)]);
        assert_eq!(selection.rows().len(), 1);
        assert_eq!(selection.into_rows()[0].course_name, "Rust");
    }
}
