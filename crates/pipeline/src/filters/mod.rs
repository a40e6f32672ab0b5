//! Filter implementations for the ranking pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_taken;
pub mod minimum_rating;
pub mod selected_courses;

// Re-export for convenience
pub use already_taken::AlreadyTakenFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use selected_courses::SelectedCoursesFilter;
