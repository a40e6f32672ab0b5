//! Simple test harness for the recommendation orchestrator.
//!
//! Loads the dataset named by `COURSE_RECS_DATA` (or the first argument),
//! ranks courses for one user and assigns instructors to the top three.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use data_loader::Dataset;
use pipeline::InstructorSelection;
use server::{RecommendationOrchestrator, RecommenderConfig};

const DEFAULT_DATA_PATH: &str = "data/courses.csv";
const SAMPLE_USER: u32 = 15796;
const DEFAULT_LOG_FILTER: &str = "info,server=debug,pipeline=debug";

/// `RUST_LOG` when set and parseable, otherwise the harness default
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok()))
        .init();

    info!("Starting course recommender test harness");

    let config = RecommenderConfig::from_env()?;
    let data_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("COURSE_RECS_DATA").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

    info!("Loading dataset from {}...", data_path.display());
    let dataset = Arc::new(
        Dataset::load_from_file(&data_path).context("Failed to load course dataset")?,
    );

    let orchestrator = RecommendationOrchestrator::new(dataset, config);

    let table = orchestrator.get_recommendations(SAMPLE_USER, None)?;
    info!("Received {} recommendations:", table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        info!(
            "{}. {} [{}] by {} - Score: {:.2}",
            i + 1,
            row.course_name,
            row.course_id,
            row.instructor,
            row.recommendation_score
        );
    }

    let picks: Vec<&str> = table.course_options().into_iter().take(3).collect();
    match orchestrator.select_instructors(&table, &picks)? {
        InstructorSelection::Assigned(rows) => {
            for row in rows {
                info!("{} -> {} ({:.2})", row.course_name, row.instructor, row.rating);
            }
        }
        InstructorSelection::NoQualifyingRows => {
            info!(
                "No instructors found with rating {} or above for the selected courses.",
                orchestrator.config().rating_floor
            )
        }
        InstructorSelection::NothingSelected => info!("Nothing to select from"),
    }

    Ok(())
}
