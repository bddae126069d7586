// SPDX-License-Identifier: MIT OR Apache-2.0
//! The benchmark pipeline: allocate, initialise, repeat the transform, validate.

use crate::args::RunConfig;
use crate::variant::{Kernel, Variant};
use anyhow::Context;
use gridbench_core::{Dims, Mismatch, check_same_shape, fill_input, find_mismatch};
use log::{debug, info};
use std::hint::black_box;
use std::io::Write;
use std::time::{Duration, Instant};

/// Input and output arrays of one run, with `input` already initialised.
#[derive(Debug)]
pub struct Prepared<G> {
    /// Initialised input array
    pub input: G,
    /// Output array, overwritten by each transform call
    pub output: G,
    /// Shape shared by both arrays
    pub dims: Dims,
}

/// What a run produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOutcome {
    /// Shape of the arrays
    pub dims: Dims,
    /// Transform calls made
    pub repeats: usize,
    /// Wall time of the repeat loop alone
    pub elapsed: Duration,
    /// First bad cell, if any
    pub mismatch: Option<Mismatch>,
}

/// Allocate both arrays through `variant` and initialise the input.
///
/// # Errors
///
/// Fails if either allocation fails or the arrays come back with different
/// shapes.
pub fn prepare<V: Variant>(variant: &mut V, dims: Dims) -> anyhow::Result<Prepared<V::Grid>> {
    let mut input = variant
        .allocate(dims)
        .with_context(|| format!("allocating {} input array of {dims}", V::NAME))?;
    let output = variant
        .allocate(dims)
        .with_context(|| format!("allocating {} output array of {dims}", V::NAME))?;
    check_same_shape(&input, &output)?;
    for line in variant.allocations() {
        debug!("{}: {line}", V::NAME);
    }
    fill_input(&mut input);
    Ok(Prepared {
        input,
        output,
        dims,
    })
}

/// Call `kernel` `repeats` times on the same pair and return the elapsed time.
///
/// The input is never re-initialised between calls. Arguments pass through
/// [`black_box`] so the calls cannot be merged or hoisted.
pub fn repeat<G>(prepared: &mut Prepared<G>, kernel: Kernel<G>, repeats: usize) -> Duration {
    let Dims { nx, ny } = prepared.dims;
    let start = Instant::now();
    for _ in 0..repeats {
        kernel(
            black_box(&prepared.input),
            black_box(nx),
            black_box(ny),
            black_box(&mut prepared.output),
        );
    }
    start.elapsed()
}

/// Run one variant end to end, writing the report to `out`.
///
/// Writes the configuration line, then at most one mismatch line. A mismatch
/// is reported, not returned as an error.
///
/// # Errors
///
/// Fails on allocation errors or if `out` cannot be written.
pub fn run<V: Variant, W: Write>(
    variant: &mut V,
    config: &RunConfig,
    out: &mut W,
) -> anyhow::Result<RunOutcome> {
    run_with(variant, config, V::transform, out)
}

/// [`run`] with an explicit kernel in place of the variant's default.
///
/// # Errors
///
/// Fails on allocation errors or if `out` cannot be written.
pub fn run_with<V: Variant, W: Write>(
    variant: &mut V,
    config: &RunConfig,
    kernel: Kernel<V::Grid>,
    out: &mut W,
) -> anyhow::Result<RunOutcome> {
    let mut prepared = prepare(variant, config.dims())?;
    writeln!(
        out,
        "Arrays have {} rows of {} columns, repeats = {}",
        config.ny, config.nx, config.repeats
    )?;

    let elapsed = repeat(&mut prepared, kernel, config.repeats);
    info!(
        "{}: {} repeats over {} in {elapsed:?}",
        V::NAME,
        config.repeats,
        prepared.dims
    );

    let mismatch = find_mismatch(&prepared.input, &prepared.output);
    let dims = prepared.dims;
    variant.recycle(prepared.input);
    variant.recycle(prepared.output);
    if let Some(mismatch) = &mismatch {
        writeln!(out, "{mismatch}")?;
    }
    out.flush()?;

    Ok(RunOutcome {
        dims,
        repeats: config.repeats,
        elapsed,
        mismatch,
    })
}
