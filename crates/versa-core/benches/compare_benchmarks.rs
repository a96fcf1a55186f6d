//! Benchmarks for version parsing and generic value comparison
//!
//! Covers the hot paths: parsing version text, ordering versions,
//! comparing nested documents and sorting mixed collections.
//!
//! Copyright (c) 2025 Versa Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use versa_core::{compare, equals, sort_values, ParseMode, Value, Version};

fn create_document(size: usize) -> Value {
    let items: Vec<serde_json::Value> = (0..size)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("package-{}", i),
                "version": [1, i % 7, i % 3],
                "stable": i % 2 == 0,
            })
        })
        .collect();

    Value::from(json!({ "items": items, "count": size }))
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    let inputs = ["1.2", "1.2.3", "10.20.30.40", "v1.beta"];
    for input in &inputs {
        group.bench_with_input(BenchmarkId::new("lenient", input), input, |b, input| {
            b.iter(|| Version::parse_with(black_box(input), ParseMode::Lenient))
        });
    }
    group.bench_function("strict", |b| {
        b.iter(|| Version::parse_strict(black_box("10.20.30.40")))
    });

    group.finish();
}

fn bench_version_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_ordering");

    let left = Version::new(2, 10).with_build(3);
    let right = Version::new(2, 10).with_build(3).with_revision(1);
    group.bench_function("direct", |b| {
        b.iter(|| Version::compare(black_box(&left), black_box(&right)))
    });

    let left_value = Value::from(left);
    let right_value = Value::from(right);
    group.bench_function("through_values", |b| {
        b.iter(|| compare(black_box(&left_value), black_box(&right_value)))
    });

    let versions: Vec<Version> = (0..1000u32)
        .map(|i| Version::new(i % 5, i % 17).with_build(i % 11))
        .collect();
    group.bench_function("sort_1000", |b| {
        b.iter(|| {
            let mut batch = versions.clone();
            batch.sort_by(Version::compare);
            batch
        })
    });

    group.finish();
}

fn bench_documents(c: &mut Criterion) {
    let mut group = c.benchmark_group("documents");

    for size in [10usize, 100, 1000] {
        let left = create_document(size);
        let right = create_document(size);
        group.bench_with_input(BenchmarkId::new("compare", size), &size, |b, _| {
            b.iter(|| compare(black_box(&left), black_box(&right)))
        });
        group.bench_with_input(BenchmarkId::new("equals", size), &size, |b, _| {
            b.iter(|| equals(black_box(&left), black_box(&right)))
        });
    }

    group.finish();
}

fn bench_sorting(c: &mut Criterion) {
    let mut group = c.benchmark_group("sorting");

    let numbers: Vec<Value> = (0..1000i64).map(|i| Value::from((i * 7919) % 1000)).collect();
    group.bench_function("numbers_1000", |b| {
        b.iter(|| {
            let mut batch = numbers.clone();
            sort_values(&mut batch);
            batch
        })
    });

    let words: Vec<Value> = (0..1000)
        .map(|i| Value::from(format!("word-{}", (i * 31) % 1000)))
        .collect();
    group.bench_function("text_1000", |b| {
        b.iter(|| {
            let mut batch = words.clone();
            sort_values(&mut batch);
            batch
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parsing,
    bench_version_ordering,
    bench_documents,
    bench_sorting
);
criterion_main!(benches);
