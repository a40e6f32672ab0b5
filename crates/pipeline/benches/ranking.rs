//! Benchmarks for ranking and instructor selection
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a generated table of 50k rows so the numbers do not depend on a
//! dataset file being present.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use data_loader::{CourseRecord, Dataset};
use pipeline::{RankingEngine, UniqueInstructorSelector};
use std::sync::Arc;

fn generate_dataset(rows: usize) -> Arc<Dataset> {
    let records = (0..rows)
        .map(|i| {
            let course = i % 500;
            CourseRecord::new(
                (i % 5000) as u32 + 1,
                format!("C{course}"),
                format!("Course {course}"),
                format!("Instructor {}", (i * 7) % 300),
                ((i * 13) % 9) as f32 * 0.5 + 1.0,
            )
        })
        .collect();
    Arc::new(Dataset::from_records(records))
}

fn bench_recommend(c: &mut Criterion) {
    let engine = RankingEngine::new(generate_dataset(50_000));

    c.bench_function("recommend_top_10", |b| {
        b.iter(|| engine.recommend(black_box(42), black_box(10)))
    });
}

fn bench_select_instructors(c: &mut Criterion) {
    let dataset = generate_dataset(50_000);
    let picks: Vec<String> = (0..10).map(|i| format!("Course {}", i * 3)).collect();
    let selector = UniqueInstructorSelector::new(dataset);

    c.bench_function("select_unique_instructors_10", |b| {
        b.iter(|| selector.select_best_unique_instructors(black_box(picks.as_slice())))
    });
}

criterion_group!(benches, bench_recommend, bench_select_instructors);
criterion_main!(benches);
