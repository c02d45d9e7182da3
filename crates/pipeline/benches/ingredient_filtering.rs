//! Benchmarks for ingredient extraction and ranking
//!
//! Run with: cargo bench --package pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pipeline::{rank_and_format, FilterPipeline, ScoredCandidate};
use vision::Detection;

const LABELS: &[&str] = &[
    "apple", "banana", "bowl", "broccoli", "carrot", "cup", "donut", "orange", "pizza",
    "refrigerator", "sandwich", "bottle",
];

fn synthetic_detections(n: usize) -> Vec<Detection> {
    (0..n)
        .map(|i| {
            let label = LABELS[i % LABELS.len()];
            let confidence = (i % 100) as f64 / 100.0;
            Detection::new(label, confidence)
        })
        .collect()
}

fn bench_ingredients(c: &mut Criterion) {
    let pipeline = FilterPipeline::default();
    let detections = synthetic_detections(1_000);

    c.bench_function("ingredients_1000_detections", |b| {
        b.iter(|| {
            let ingredients = pipeline.ingredients(black_box(detections.clone()));
            black_box(ingredients)
        })
    });
}

fn bench_rank_and_format(c: &mut Criterion) {
    let scored: Vec<ScoredCandidate> = (0..100)
        .map(|i| ScoredCandidate::new(format!("Recipe {i}"), ((i * 37) % 200) as f32 / 100.0 - 1.0))
        .collect();

    c.bench_function("rank_and_format_100", |b| {
        b.iter(|| black_box(rank_and_format(black_box(scored.clone()))))
    });
}

criterion_group!(benches, bench_ingredients, bench_rank_and_format);
criterion_main!(benches);
