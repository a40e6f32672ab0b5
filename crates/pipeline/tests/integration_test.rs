//! Integration tests for ranking followed by instructor selection.
//!
//! These tests drive both stages the way the CLI does: rank for a user,
//! narrow the list, then assign instructors.

use data_loader::{CourseRecord, Dataset};
use pipeline::{InstructorSelection, RankingEngine, UniqueInstructorSelector};
use std::collections::HashSet;
use std::sync::Arc;

fn dataset(records: Vec<CourseRecord>) -> Arc<Dataset> {
    Arc::new(Dataset::from_records(records))
}

/// Deterministic synthetic table: 40 users, 12 courses, 6 instructors.
fn synthetic_dataset() -> Arc<Dataset> {
    let courses = [
        "Algorithms", "Databases", "Networks", "Compilers", "Graphics", "Security",
        "Statistics", "Robotics", "Linear Algebra", "Operating Systems", "Rust", "Cloud",
    ];
    let instructors = ["Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret"];

    // Small LCG so the table is varied but identical on every run
    let mut state: u64 = 42;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };

    let mut records = Vec::new();
    for user_id in 1..=40u32 {
        for _ in 0..4 {
            let course = courses[next() % courses.len()];
            let instructor = instructors[next() % instructors.len()];
            let rating = (next() % 9) as f32 * 0.5 + 1.0;
            records.push(CourseRecord::new(
                user_id,
                format!("ID-{}", course.len()),
                course,
                instructor,
                rating,
            ));
        }
    }
    dataset(records)
}

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn test_taken_course_is_excluded_wholesale() {
    let data = dataset(vec![
        CourseRecord::new(1, "A1", "A", "X", 5.0),
        CourseRecord::new(2, "A2", "A", "Y", 3.0),
        CourseRecord::new(2, "B1", "B", "Z", 4.0),
    ]);

    let rows = RankingEngine::new(data).recommend(1, 5).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].course_name, "B");
    assert_eq!(rows[0].instructor, "Z");
}

#[test]
fn test_best_rated_row_represents_course() {
    let data = dataset(vec![
        CourseRecord::new(2, "A1", "A", "Low", 3.0),
        CourseRecord::new(3, "A2", "A", "High", 5.0),
    ]);

    let rows = RankingEngine::new(data).recommend(1, 5).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].instructor, "High");
    assert_eq!(rows[0].course_id, "A2");
    assert_eq!(rows[0].recommendation_score, 5.0);
}

#[test]
fn test_tied_maximum_picks_first_row_in_dataset_order() {
    let data = dataset(vec![
        CourseRecord::new(2, "A1", "A", "First", 4.5),
        CourseRecord::new(3, "A2", "A", "Second", 4.5),
        CourseRecord::new(4, "A3", "A", "Third", 4.0),
    ]);

    let rows = RankingEngine::new(data).recommend(1, 5).unwrap();

    assert_eq!(rows[0].instructor, "First");
    assert_eq!(rows[0].course_id, "A1");
}

#[test]
fn test_shared_instructor_goes_to_first_selected_course() {
    let data = dataset(vec![
        CourseRecord::new(1, "A1", "A", "Z", 4.5),
        CourseRecord::new(2, "B1", "B", "Z", 4.8),
        CourseRecord::new(3, "B2", "B", "W", 4.1),
    ]);
    let selector = UniqueInstructorSelector::new(data);

    let selection = selector.select_best_unique_instructors(&["A", "B"]).unwrap();
    let rows = selection.rows();

    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].course_name.as_str(), rows[0].instructor.as_str()), ("A", "Z"));
    assert_eq!((rows[1].course_name.as_str(), rows[1].instructor.as_str()), ("B", "W"));
}

#[test]
fn test_course_without_alternative_is_skipped() {
    let data = dataset(vec![
        CourseRecord::new(1, "A1", "A", "Z", 4.5),
        CourseRecord::new(2, "B1", "B", "Z", 4.8),
        CourseRecord::new(3, "B2", "B", "W", 3.9),
    ]);
    let selector = UniqueInstructorSelector::new(data);

    let selection = selector.select_best_unique_instructors(&["A", "B"]).unwrap();

    assert_eq!(selection.rows().len(), 1);
    assert_eq!(selection.rows()[0].course_name, "A");
}

#[test]
fn test_all_rows_below_floor_signals_no_qualifying_rows() {
    let data = dataset(vec![
        CourseRecord::new(1, "C1", "C", "X", 3.9),
        CourseRecord::new(2, "C1", "C", "Y", 3.9),
    ]);
    let selector = UniqueInstructorSelector::new(data);

    let selection = selector.select_best_unique_instructors(&["C"]).unwrap();

    assert_eq!(selection, InstructorSelection::NoQualifyingRows);
    assert!(selection.is_empty());
}

// ============================================================================
// Properties over a synthetic table
// ============================================================================

#[test]
fn test_recommendations_never_include_taken_courses() {
    let data = synthetic_dataset();
    let engine = RankingEngine::new(data.clone());

    for user_id in 1..=45 {
        let taken: HashSet<&str> = data
            .get_user_records(user_id)
            .map(|r| r.course_name.as_str())
            .collect();
        for row in engine.recommend(user_id, 20).unwrap() {
            assert!(
                !taken.contains(row.course_name.as_str()),
                "user {} was recommended taken course {}",
                user_id,
                row.course_name
            );
        }
    }
}

#[test]
fn test_recommendations_unique_sorted_and_bounded() {
    let data = synthetic_dataset();
    let engine = RankingEngine::new(data);

    for user_id in 1..=40 {
        for limit in [1, 3, 7, 20] {
            let rows = engine.recommend(user_id, limit).unwrap();
            assert!(rows.len() <= limit);

            let names: HashSet<&str> = rows.iter().map(|r| r.course_name.as_str()).collect();
            assert_eq!(names.len(), rows.len(), "duplicate course for user {}", user_id);

            for pair in rows.windows(2) {
                assert!(pair[0].recommendation_score >= pair[1].recommendation_score);
                if pair[0].recommendation_score == pair[1].recommendation_score {
                    assert!(pair[0].course_name < pair[1].course_name);
                }
            }
        }
    }
}

#[test]
fn test_selection_instructors_distinct_and_above_floor() {
    let data = synthetic_dataset();
    let engine = RankingEngine::new(data.clone());
    let selector = UniqueInstructorSelector::new(data);

    for user_id in 1..=40 {
        let ranked = engine.recommend(user_id, 10).unwrap();
        let picks: Vec<&str> = ranked.iter().map(|r| r.course_name.as_str()).collect();

        let selection = selector.select_best_unique_instructors(&picks).unwrap();
        let rows = selection.rows();
        assert!(rows.len() <= picks.len());

        let instructors: HashSet<&str> = rows.iter().map(|r| r.instructor.as_str()).collect();
        assert_eq!(instructors.len(), rows.len());
        assert!(rows.iter().all(|r| r.rating >= 4.0));

        let courses: HashSet<&str> = rows.iter().map(|r| r.course_name.as_str()).collect();
        assert_eq!(courses.len(), rows.len());
    }
}

#[test]
fn test_selection_follows_caller_order() {
    let data = dataset(vec![
        CourseRecord::new(1, "A1", "A", "P", 4.9),
        CourseRecord::new(1, "A2", "A", "Q", 4.2),
        CourseRecord::new(2, "B1", "B", "P", 4.7),
        CourseRecord::new(2, "B2", "B", "Q", 4.6),
    ]);
    let selector = UniqueInstructorSelector::new(data);

    let forward = selector.select_best_unique_instructors(&["A", "B"]).unwrap();
    let reverse = selector.select_best_unique_instructors(&["B", "A"]).unwrap();

    let pairs = |selection: &InstructorSelection| -> Vec<(String, String)> {
        selection
            .rows()
            .iter()
            .map(|r| (r.course_name.clone(), r.instructor.clone()))
            .collect()
    };

    assert_eq!(
        pairs(&forward),
        vec![("A".into(), "P".into()), ("B".into(), "Q".into())]
    );
    assert_eq!(
        pairs(&reverse),
        vec![("B".into(), "P".into()), ("A".into(), "Q".into())]
    );
}

#[test]
fn test_empty_dataset_gives_empty_results() {
    let data = dataset(Vec::new());

    assert!(RankingEngine::new(data.clone()).recommend(1, 10).unwrap().is_empty());

    let selection = UniqueInstructorSelector::new(data)
        .select_best_unique_instructors(&["Anything"])
        .unwrap();
    assert!(selection.is_empty());
}

#[test]
fn test_engines_share_dataset_across_threads() {
    let data = synthetic_dataset();
    let engine = RankingEngine::new(data);
    let expected = engine.recommend(7, 5).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.recommend(7, 5).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
