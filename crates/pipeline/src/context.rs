//! Helper functions to build a UserContext from the Dataset.
//!
//! The context gathers a user's history once, so the ranking stage does
//! not have to query the dataset per candidate row.

use data_loader::{Dataset, UserId};
use std::collections::HashSet;

/// What the dataset knows about one user.
#[derive(Debug, Clone, Default)]
pub struct UserContext {
    pub user_id: UserId,
    /// Course names the user has any row for
    pub taken_courses: HashSet<String>,
    /// Number of rows the user produced (duplicates included)
    pub rating_count: usize,
    /// Average rating the user gave, 0.0 without history
    pub avg_rating: f32,
}

impl UserContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    pub fn has_history(&self) -> bool {
        self.rating_count > 0
    }
}

/// Build a UserContext for a given user.
///
/// There is no existence check: a user without rows gets an empty context
/// and every course counts as a candidate.
pub fn build_user_context(dataset: &Dataset, user_id: UserId) -> UserContext {
    let mut context = UserContext::new(user_id);

    let mut total = 0.0f32;
    for record in dataset.get_user_records(user_id) {
        context.taken_courses.insert(record.course_name.clone());
        context.rating_count += 1;
        total += record.rating;
    }

    if context.rating_count > 0 {
        context.avg_rating = total / context.rating_count as f32;
    }

    context
}
