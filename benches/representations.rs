// SPDX-License-Identifier: MIT OR Apache-2.0
// Benchmarks: missing_docs - criterion_group! macro generates undocumentable code
#![allow(missing_docs)]
// Benchmarks: clippy lints relaxed for benchmark code (not production)
#![allow(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Representation benchmarks
//!
//! One transform call per iteration at the default shape (10 rows of 2000
//! columns), for every representation and addressing mode.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use gridbench::prelude::*;

const NX: usize = 2000;
const NY: usize = 10;

fn pair<G: Grid2d>(mut alloc: impl FnMut(Dims) -> G) -> (G, G) {
    let dims = Dims::new(NX, NY);
    let mut input = alloc(dims);
    let output = alloc(dims);
    fill_input(&mut input);
    (input, output)
}

fn throughput() -> Throughput {
    Throughput::Elements((NX * NY) as u64)
}

/// Benchmark: flat buffer, checked and unchecked addressing
fn bench_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("representations/flat");
    group.throughput(throughput());
    let (input, mut output) = pair(|dims| FlatGrid::zeroed(dims).unwrap());

    group.bench_function(BenchmarkId::new("checked", NX), |b| {
        b.iter(|| {
            flat::transform_checked(
                black_box(input.as_slice()),
                black_box(NX),
                black_box(NY),
                black_box(output.as_mut_slice()),
            );
        });
    });
    group.bench_function(BenchmarkId::new("unchecked", NX), |b| {
        b.iter(|| {
            flat::transform_unchecked(
                black_box(input.as_slice()),
                black_box(NX),
                black_box(NY),
                black_box(output.as_mut_slice()),
            );
        });
    });
    group.finish();
}

/// Benchmark: row tables, hand-built and manager-built
fn bench_row_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("representations/row_table");
    group.throughput(throughput());

    let (input, mut output) = pair(|dims| {
        let starts = (0..dims.ny).map(|y| y * dims.nx).collect();
        RowTable::from_raw_parts(vec![0.0; dims.len()], starts, dims.nx).unwrap()
    });
    group.bench_function("hand_built", |b| {
        b.iter(|| rowptr::transform(black_box(&input), NX, NY, black_box(&mut output)));
    });

    let mut manager = ArrayManager::new();
    let (input, mut output) = pair(|dims| manager_alloc(&mut manager, dims));
    group.bench_function("managed", |b| {
        b.iter(|| rowptr::transform(black_box(&input), NX, NY, black_box(&mut output)));
    });
    group.finish();
}

fn manager_alloc(manager: &mut ArrayManager, dims: Dims) -> ManagedArray<f32> {
    manager.alloc_2d(dims.ny, dims.nx).unwrap()
}

/// Benchmark: ndarray, checked and `uget`
fn bench_multi(c: &mut Criterion) {
    let mut group = c.benchmark_group("representations/multi");
    group.throughput(throughput());
    let (input, mut output) = pair(|dims| zeroed_multi(dims).unwrap());

    group.bench_function("checked", |b| {
        b.iter(|| multi::transform_checked(black_box(&input), NX, NY, black_box(&mut output)));
    });
    group.bench_function("unchecked", |b| {
        b.iter(|| multi::transform_unchecked(black_box(&input), NX, NY, black_box(&mut output)));
    });
    group.finish();
}

/// Benchmark: nested vectors, indexed, iterator and unchecked loops
fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("representations/nested");
    group.throughput(throughput());
    let (input, mut output) = pair(|dims| zeroed_nested(dims).unwrap());

    group.bench_function("indexed", |b| {
        b.iter(|| nested::transform(black_box(&input), NX, NY, black_box(&mut output)));
    });
    group.bench_function("iter", |b| {
        b.iter(|| nested::transform_iter(black_box(&input), NX, NY, black_box(&mut output)));
    });
    group.bench_function("unchecked", |b| {
        b.iter(|| nested::transform_unchecked(black_box(&input), NX, NY, black_box(&mut output)));
    });
    group.finish();
}

criterion_group!(
    representation_benchmarks,
    bench_flat,
    bench_row_tables,
    bench_multi,
    bench_nested
);
criterion_main!(representation_benchmarks);
