//! Performance benchmarks for the diff engine.
//!
//! Run with: cargo bench --bench diff_benchmark

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use span_diff::diff::{Deadline, DiffEngine, EscalationPolicy, align_chunked, align_direct};
use std::hint::black_box;
use std::time::Duration;

const WORDS: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "and", "runs", "away",
];

/// Generate prose-like text of roughly `len` characters.
fn generate_text(seed: usize, len: usize) -> String {
    let mut text = String::with_capacity(len + 8);
    let mut i = seed;
    while text.len() < len {
        i = i.wrapping_mul(31).wrapping_add(7);
        text.push_str(WORDS[i % WORDS.len()]);
        text.push(' ');
    }
    text
}

/// Edit roughly `change_percent` of the words of `text`.
fn generate_edit(text: &str, change_percent: usize) -> String {
    text.split(' ')
        .enumerate()
        .map(|(i, word)| {
            if change_percent > 0 && i % (100 / change_percent) == 0 {
                "EDITED"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_diff_small(c: &mut Criterion) {
    let old = generate_text(1, 200);
    let new = generate_edit(&old, 10);
    let engine = DiffEngine::new();

    c.bench_function("diff_200_chars", |b| {
        b.iter(|| black_box(engine.diff_str(black_box(&old), black_box(&new))));
    });
}

fn bench_diff_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff_scaling");
    group.sample_size(20);

    for size in &[500, 2_000, 5_000] {
        let old = generate_text(3, *size);
        let new = generate_edit(&old, 5);
        let engine = DiffEngine::new().with_max_time(Duration::from_secs(30));

        group.bench_with_input(BenchmarkId::new("escalating", size), size, |b, _| {
            b.iter(|| black_box(engine.diff_str(&old, &new)));
        });

        let direct_only = engine.clone().with_escalation(EscalationPolicy::disabled());
        group.bench_with_input(BenchmarkId::new("direct_only", size), size, |b, _| {
            b.iter(|| black_box(direct_only.diff_str(&old, &new)));
        });
    }
    group.finish();
}

fn bench_alignment_strategies(c: &mut Criterion) {
    let old: Vec<char> = generate_text(5, 2_000).chars().collect();
    let new: Vec<char> = generate_edit(&generate_text(5, 2_000), 20).chars().collect();
    let mut group = c.benchmark_group("alignment");

    group.bench_function("direct", |b| {
        b.iter(|| {
            let deadline = Deadline::starting_now(Duration::from_secs(30));
            black_box(align_direct(&old, &new, &deadline))
        });
    });
    group.bench_function("chunked", |b| {
        b.iter(|| {
            let deadline = Deadline::starting_now(Duration::from_secs(30));
            black_box(align_chunked(&old, &new, &deadline))
        });
    });
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let pairs: Vec<(Vec<char>, Vec<char>)> = (0..16)
        .map(|seed| {
            let old = generate_text(seed, 1_000);
            let new = generate_edit(&old, 10);
            (old.chars().collect(), new.chars().collect())
        })
        .collect();
    let refs: Vec<(&[char], &[char])> = pairs
        .iter()
        .map(|(a, b)| (a.as_slice(), b.as_slice()))
        .collect();
    let engine = DiffEngine::new();

    c.bench_function("diff_batch_16x1000", |b| {
        b.iter(|| black_box(engine.diff_batch(&refs)));
    });
}

criterion_group!(
    benches,
    bench_diff_small,
    bench_diff_scaling,
    bench_alignment_strategies,
    bench_batch
);
criterion_main!(benches);
