//! Performance benchmarks for quickcalc.
//!
//! Run with: cargo bench
//!
//! Everything here runs between two chooser invocations, so it only has to
//! stay well below what a user can notice.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quickcalc::services::calculator;
use quickcalc::services::history::{compose_entry, HistoryStore};

/// Benchmark calculator evaluation.
fn bench_calculator(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculator");

    let expressions = [
        ("simple_add", "2 + 2"),
        ("complex_expr", "(10 + 5) * 2 / 3"),
        ("power", "2^10"),
        ("sqrt", "sqrt(144)"),
        ("scientific", "sin(3.14159) + cos(0)"),
        ("implicit", "2pi(3+4)7"),
    ];

    for (name, expr) in expressions {
        group.bench_with_input(BenchmarkId::from_parameter(name), &expr, |b, expr| {
            b.iter(|| black_box(calculator::calculate(black_box(expr))))
        });
    }

    group.finish();
}

/// Benchmark the textual rewrite alone on a long input.
fn bench_preprocess(c: &mut Criterion) {
    let input = "2sqrt(9) × 3(4+5)÷2 ^ 2 ".repeat(20);

    c.bench_function("preprocess_long", |b| {
        b.iter(|| black_box(calculator::preprocess(black_box(&input))))
    });
}

/// Benchmark appending to a full in-memory history (dedup scan + eviction).
fn bench_history(c: &mut Criterion) {
    let entries: Vec<String> = (0..200)
        .map(|i| compose_entry(&format!("{i}*2"), &(i * 2).to_string()))
        .collect();

    c.bench_function("history_append_full", |b| {
        b.iter(|| {
            let mut history = HistoryStore::in_memory(20);
            for entry in &entries {
                history.append(entry.as_str());
            }
            black_box(history.len())
        })
    });
}

criterion_group!(benches, bench_calculator, bench_preprocess, bench_history);

criterion_main!(benches);
