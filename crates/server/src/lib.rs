//! Server crate for the course recommender.
//!
//! This crate holds the layer between a front end and the ranking core:
//! configuration, input validation, display rounding, and the hand-off of
//! one ranking into the instructor selection that follows it.

pub mod config;
pub mod orchestrator;

pub use config::RecommenderConfig;
pub use orchestrator::{RecommendationOrchestrator, RecommendationTable};
