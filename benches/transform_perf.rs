// SPDX-License-Identifier: MIT OR Apache-2.0
// Benchmarks: missing_docs - binary for perf analysis
#![allow(missing_docs)]
// Benchmarks: clippy lints relaxed for benchmark code (not production)
#![allow(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Perf analysis binary: one kernel in a tight loop, nothing else
//!
//! Run with:
//!   cargo build --release --bin transform_perf
//!   perf stat -e cycles,instructions,cache-references,cache-misses,branches,branch-misses \
//!     ./target/release/transform_perf \<kernel\> \<iterations\> \[columns\] \[rows\]
//!
//! Kernels:
//!   - `flat` (build default), `flat_checked`, `flat_unchecked`: flat buffer
//!   - `rowptr`: row table
//!   - `multi`, `multi_unchecked`: ndarray
//!   - `nested`, `nested_iter`, `nested_unchecked`: vector of vectors

use gridbench::prelude::*;
use std::env;
use std::hint::black_box;
use std::time::Instant;

const ITERATIONS_DEFAULT: usize = 10_000;
const COLUMNS_DEFAULT: usize = 2000;
const ROWS_DEFAULT: usize = 10;

fn run<G: Grid2d>(
    dims: Dims,
    iterations: usize,
    alloc: impl Fn(Dims) -> G,
    kernel: impl Fn(&G, usize, usize, &mut G),
) {
    let mut input = alloc(dims);
    let mut output = alloc(dims);
    fill_input(&mut input);

    let start = Instant::now();
    for _ in 0..iterations {
        kernel(
            black_box(&input),
            black_box(dims.nx),
            black_box(dims.ny),
            black_box(&mut output),
        );
    }
    let elapsed = start.elapsed();

    match find_mismatch(&input, &output) {
        Some(mismatch) => eprintln!("{mismatch}"),
        None => eprintln!("{iterations} iterations in {elapsed:?}"),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <kernel> [iterations] [columns] [rows]", args[0]);
        eprintln!("Kernels:");
        eprintln!("  flat, flat_checked, flat_unchecked");
        eprintln!("  rowptr");
        eprintln!("  multi, multi_unchecked");
        eprintln!("  nested, nested_iter, nested_unchecked");
        std::process::exit(1);
    }

    let number = |i: usize, default: usize| {
        args.get(i)
            .and_then(|s| s.parse().ok())
            .unwrap_or(default)
    };
    let kernel = &args[1];
    let iterations = number(2, ITERATIONS_DEFAULT);
    let dims = Dims::new(number(3, COLUMNS_DEFAULT), number(4, ROWS_DEFAULT));

    eprintln!("Running {kernel} for {iterations} iterations over {dims}...");

    let flat_alloc = |d| FlatGrid::zeroed(d).unwrap();
    let nested_alloc = |d| zeroed_nested(d).unwrap();
    let multi_alloc = |d| zeroed_multi(d).unwrap();

    match kernel.as_str() {
        "flat" => run(dims, iterations, flat_alloc, |i: &FlatGrid, nx, ny, o: &mut FlatGrid| {
            flat::transform(i.as_slice(), nx, ny, o.as_mut_slice());
        }),
        "flat_checked" => {
            run(dims, iterations, flat_alloc, |i: &FlatGrid, nx, ny, o: &mut FlatGrid| {
                flat::transform_checked(i.as_slice(), nx, ny, o.as_mut_slice());
            });
        }
        "flat_unchecked" => {
            run(dims, iterations, flat_alloc, |i: &FlatGrid, nx, ny, o: &mut FlatGrid| {
                flat::transform_unchecked(i.as_slice(), nx, ny, o.as_mut_slice());
            });
        }
        "rowptr" => run(
            dims,
            iterations,
            |d| gridbench::row_table::<f32>(d.ny, d.nx).unwrap(),
            rowptr::transform,
        ),
        "multi" => run(dims, iterations, multi_alloc, multi::transform_checked),
        "multi_unchecked" => run(dims, iterations, multi_alloc, multi::transform_unchecked),
        "nested" => run(dims, iterations, nested_alloc, |i: &NestedGrid, nx, ny, o: &mut NestedGrid| {
            nested::transform(i, nx, ny, o);
        }),
        "nested_iter" => {
            run(dims, iterations, nested_alloc, |i: &NestedGrid, nx, ny, o: &mut NestedGrid| {
                nested::transform_iter(i, nx, ny, o);
            });
        }
        "nested_unchecked" => {
            run(dims, iterations, nested_alloc, |i: &NestedGrid, nx, ny, o: &mut NestedGrid| {
                nested::transform_unchecked(i, nx, ny, o);
            });
        }
        _ => {
            eprintln!("Unknown kernel: {kernel}");
            std::process::exit(1);
        }
    }
}
