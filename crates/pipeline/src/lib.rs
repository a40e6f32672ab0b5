//! Ranking and instructor selection over the course ratings dataset.
//!
//! This crate provides:
//! - Filter trait and implementations for row filtering
//! - FilterPipeline for composing filters
//! - RankingEngine: top-N courses a user has not taken yet
//! - UniqueInstructorSelector: one distinct instructor per chosen course
//!
//! ## Architecture
//! Both stages are pure functions of an immutable `Arc<Dataset>`:
//! 1. `RankingEngine::recommend` drops taken courses, keeps the best row
//!    per course and ranks what is left
//! 2. The caller narrows the ranked list to the courses it wants
//! 3. `UniqueInstructorSelector::select_best_unique_instructors` applies
//!    the ratings floor and hands out instructors first come, first served
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RankingEngine, UniqueInstructorSelector};
//!
//! let engine = RankingEngine::new(dataset.clone());
//! let ranked = engine.recommend(15796, 10)?;
//!
//! let picks: Vec<&str> = ranked.iter().take(3).map(|r| r.course_name.as_str()).collect();
//! let selector = UniqueInstructorSelector::new(dataset.clone());
//! let assignment = selector.select_best_unique_instructors(&picks)?;
//! ```

pub mod error;
pub mod types;
pub mod context;
pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod ranking;
pub mod instructors;

// Re-export main types
pub use context::{UserContext, build_user_context};
pub use error::{PipelineError, Result};
pub use filter_pipeline::FilterPipeline;
pub use instructors::{DEFAULT_RATING_FLOOR, UniqueInstructorSelector};
pub use ranking::RankingEngine;
pub use traits::Filter;
pub use types::{InstructorSelection, RecommendationRow, round2};
