//! # Data Loader Crate
//!
//! This crate loads and indexes the course ratings dataset that the
//! recommender works over.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (CourseRecord, CourseStats, Dataset)
//! - **parser**: Parse CSV/TSV/JSON exports into records
//! - **index**: Build the dataset, compute statistics, validate rows
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_file(Path::new("data/courses.csv"))?;
//!
//! let taken: Vec<_> = dataset.get_user_records(15796).collect();
//! println!("User 15796 rated {} course offerings", taken.len());
//! ```
//!
//! The dataset is loaded once and then only read. Wrap it in an `Arc` to
//! share it between callers; no locking is involved.

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::MAX_RATING;
pub use parser::DatasetFormat;
pub use types::{CourseId, CourseRecord, CourseStats, Dataset, UserId};
