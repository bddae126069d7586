// SPDX-License-Identifier: MIT OR Apache-2.0
//! Side-by-side timing of every kernel mode.
//!
//! Each mode is run once with `repeats` calls and once with a single call.
//! Setup (allocation, initialisation, validation) is common to both, so
//! `(t_n - t_1) * n / (n - 1)` estimates the cost of `n` calls alone.

use crate::driver::{prepare, repeat};
use crate::variant::{Flat, Kernel, Managed, Multi, Nested, RowPtr, Variant};
use clap::ValueEnum;
use gridbench_core::{Dims, FlatGrid, Mismatch, NestedGrid, find_mismatch};
use gridbench_kernels::{FLAT_BOUNDS_CHECKED, MULTI_UNCHECKED, flat, multi, nested};
use log::debug;
use serde::Serialize;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// One kernel paired with its representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum KernelMode {
    /// Flat buffer, bounds-checked slices
    FlatChecked,
    /// Flat buffer, raw pointer offsets
    FlatUnchecked,
    /// Hand-built row table
    RowPtr,
    /// Manager-built row table
    Managed,
    /// ndarray, checked `[[y, x]]`
    MultiChecked,
    /// ndarray, `uget`
    MultiUnchecked,
    /// Nested vectors, indexed loops
    Nested,
    /// Nested vectors, zipped iterators
    NestedIter,
    /// Nested vectors, `get_unchecked`
    NestedUnchecked,
}

impl KernelMode {
    /// Every mode in report order.
    pub const ALL: [Self; 9] = [
        Self::FlatChecked,
        Self::FlatUnchecked,
        Self::RowPtr,
        Self::Managed,
        Self::MultiChecked,
        Self::MultiUnchecked,
        Self::Nested,
        Self::NestedIter,
        Self::NestedUnchecked,
    ];

    /// Name as accepted on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FlatChecked => "flat_checked",
            Self::FlatUnchecked => "flat_unchecked",
            Self::RowPtr => "row_ptr",
            Self::Managed => "managed",
            Self::MultiChecked => "multi_checked",
            Self::MultiUnchecked => "multi_unchecked",
            Self::Nested => "nested",
            Self::NestedIter => "nested_iter",
            Self::NestedUnchecked => "nested_unchecked",
        }
    }

    /// The mode `flat::transform` resolves to in this build.
    #[must_use]
    pub const fn default_flat() -> Self {
        if FLAT_BOUNDS_CHECKED {
            Self::FlatChecked
        } else {
            Self::FlatUnchecked
        }
    }

    /// The mode `multi::transform` resolves to in this build.
    #[must_use]
    pub const fn default_multi() -> Self {
        if MULTI_UNCHECKED {
            Self::MultiUnchecked
        } else {
            Self::MultiChecked
        }
    }

    /// Time this mode under `config`.
    ///
    /// # Errors
    ///
    /// Fails if the arrays cannot be allocated.
    pub fn measure(self, config: &CompareConfig) -> anyhow::Result<Measurement> {
        match self {
            Self::FlatChecked => measure(Flat, flat_checked, config),
            Self::FlatUnchecked => measure(Flat, flat_unchecked, config),
            Self::RowPtr => measure(RowPtr, RowPtr::transform, config),
            Self::Managed => measure(Managed::default(), Managed::transform, config),
            Self::MultiChecked => measure(Multi, multi::transform_checked, config),
            Self::MultiUnchecked => measure(Multi, multi::transform_unchecked, config),
            Self::Nested => measure(Nested, nested_indexed, config),
            Self::NestedIter => measure(Nested, nested_iter, config),
            Self::NestedUnchecked => measure(Nested, nested_unchecked, config),
        }
    }
}

fn flat_checked(input: &FlatGrid, nx: usize, ny: usize, out: &mut FlatGrid) {
    flat::transform_checked(input.as_slice(), nx, ny, out.as_mut_slice());
}

fn flat_unchecked(input: &FlatGrid, nx: usize, ny: usize, out: &mut FlatGrid) {
    flat::transform_unchecked(input.as_slice(), nx, ny, out.as_mut_slice());
}

fn nested_indexed(input: &NestedGrid, nx: usize, ny: usize, out: &mut NestedGrid) {
    nested::transform(input, nx, ny, out);
}

fn nested_iter(input: &NestedGrid, nx: usize, ny: usize, out: &mut NestedGrid) {
    nested::transform_iter(input, nx, ny, out);
}

fn nested_unchecked(input: &NestedGrid, nx: usize, ny: usize, out: &mut NestedGrid) {
    nested::transform_unchecked(input, nx, ny, out);
}

/// Settings of a comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareConfig {
    /// Calls per timed run; raised to 2 if lower
    pub repeats: usize,
    /// Timed passes per mode; the lowest estimate wins
    pub passes: usize,
    /// Columns
    pub nx: usize,
    /// Rows
    pub ny: usize,
    /// Modes to run, in report order
    pub modes: Vec<KernelMode>,
}

impl CompareConfig {
    /// All modes with the given sizes.
    #[must_use]
    pub fn new(repeats: usize, passes: usize, nx: usize, ny: usize) -> Self {
        Self {
            repeats,
            passes,
            nx,
            ny,
            modes: KernelMode::ALL.to_vec(),
        }
    }

    /// Shape of the arrays.
    #[must_use]
    pub const fn dims(&self) -> Dims {
        Dims::new(self.nx, self.ny)
    }

    /// The repeat count actually used, at least 2.
    #[must_use]
    pub fn effective_repeats(&self) -> usize {
        self.repeats.max(2)
    }

    /// The pass count actually used, at least 1.
    #[must_use]
    pub fn effective_passes(&self) -> usize {
        self.passes.max(1)
    }
}

/// Raw result of timing one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Lowest positive estimate of `repeats` calls, in seconds
    pub secs: Option<f64>,
    /// First bad cell seen in any run
    pub mismatch: Option<Mismatch>,
}

/// Estimated cost of `repeats` calls from a run of `repeats` and a run of 1.
#[must_use]
pub fn extrapolate(full: Duration, single: Duration, repeats: usize) -> f64 {
    let n = repeats as f64;
    (full.as_secs_f64() - single.as_secs_f64()) * n / (n - 1.0)
}

fn timed_run<V: Variant>(
    variant: &mut V,
    kernel: Kernel<V::Grid>,
    dims: Dims,
    repeats: usize,
) -> anyhow::Result<(Duration, Option<Mismatch>)> {
    let start = Instant::now();
    let mut prepared = prepare(variant, dims)?;
    repeat(&mut prepared, kernel, repeats);
    let mismatch = find_mismatch(&prepared.input, &prepared.output);
    variant.recycle(prepared.input);
    variant.recycle(prepared.output);
    Ok((start.elapsed(), mismatch))
}

fn measure<V: Variant>(
    mut variant: V,
    kernel: Kernel<V::Grid>,
    config: &CompareConfig,
) -> anyhow::Result<Measurement> {
    let dims = config.dims();
    let repeats = config.effective_repeats();
    let mut best: Option<f64> = None;
    let mut mismatch = None;
    for pass in 0..config.effective_passes() {
        let (full, full_mismatch) = timed_run(&mut variant, kernel, dims, repeats)?;
        let (single, single_mismatch) = timed_run(&mut variant, kernel, dims, 1)?;
        mismatch = mismatch.or(full_mismatch).or(single_mismatch);
        let estimate = extrapolate(full, single, repeats);
        debug!(
            "{}: pass {pass}: {repeats} calls {full:?}, 1 call {single:?}, estimate {estimate:.6}s",
            V::NAME
        );
        if estimate > 0.0 && best.is_none_or(|b| estimate < b) {
            best = Some(estimate);
        }
    }
    Ok(Measurement {
        secs: best,
        mismatch,
    })
}

/// Report line for one mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModeResult {
    /// Which kernel
    pub mode: KernelMode,
    /// Estimated seconds for `repeats` calls
    pub secs: Option<f64>,
    /// Estimated seconds per 1000 calls
    pub kiter_secs: Option<f64>,
    /// `kiter_secs` over the fastest mode's
    pub relative: Option<f64>,
    /// First bad cell, if the mode failed validation
    pub mismatch: Option<Mismatch>,
}

/// Outcome of a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareReport {
    /// Shape of the arrays
    pub dims: Dims,
    /// Calls per timed run
    pub repeats: usize,
    /// Passes per mode
    pub passes: usize,
    /// Kernel behind `gb-flat` in this build
    pub default_flat: KernelMode,
    /// Kernel behind `gb-multi` in this build
    pub default_multi: KernelMode,
    /// Per-mode results in run order
    pub results: Vec<ModeResult>,
    /// Fastest mode that passed validation
    pub fastest: Option<KernelMode>,
}

impl CompareReport {
    /// Rank raw measurements against the fastest valid one.
    #[must_use]
    pub fn from_measurements(
        config: &CompareConfig,
        measurements: &[(KernelMode, Measurement)],
    ) -> Self {
        let repeats = config.effective_repeats();
        let kiter = |secs: f64| secs * 1000.0 / repeats as f64;

        let fastest = measurements
            .iter()
            .filter(|(_, m)| m.mismatch.is_none())
            .filter_map(|(mode, m)| m.secs.map(|secs| (*mode, secs)))
            .min_by(|a, b| a.1.total_cmp(&b.1));
        let fastest_kiter = fastest.map(|(_, secs)| kiter(secs));

        let results = measurements
            .iter()
            .map(|&(mode, m)| {
                let kiter_secs = m.secs.map(kiter);
                let relative = match (kiter_secs, fastest_kiter) {
                    (Some(k), Some(f)) if m.mismatch.is_none() => Some(k / f),
                    _ => None,
                };
                ModeResult {
                    mode,
                    secs: m.secs,
                    kiter_secs,
                    relative,
                    mismatch: m.mismatch,
                }
            })
            .collect();

        Self {
            dims: config.dims(),
            repeats,
            passes: config.effective_passes(),
            default_flat: KernelMode::default_flat(),
            default_multi: KernelMode::default_multi(),
            results,
            fastest: fastest.map(|(mode, _)| mode),
        }
    }
}

/// Time every mode in `config.modes`.
///
/// # Errors
///
/// Fails if any mode cannot allocate its arrays.
pub fn compare(config: &CompareConfig) -> anyhow::Result<CompareReport> {
    let mut measurements = Vec::with_capacity(config.modes.len());
    for &mode in &config.modes {
        let measurement = mode.measure(config)?;
        debug!("{}: {measurement:?}", mode.name());
        measurements.push((mode, measurement));
    }
    Ok(CompareReport::from_measurements(config, &measurements))
}

/// A report every [`OutputFormat`] can render.
pub trait Report: Serialize {
    /// Aligned, human-readable form.
    ///
    /// # Errors
    ///
    /// Fails if `out` cannot be written.
    fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()>;

    /// Comma-separated form with a header row.
    ///
    /// # Errors
    ///
    /// Fails if `out` cannot be written.
    fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()>;
}

impl Report for CompareReport {
    fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_table(self, out)
    }

    fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_csv(self, out)
    }
}

/// How a report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns with a summary line
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Render `report` to `out`.
    ///
    /// # Errors
    ///
    /// Fails if `out` cannot be written.
    pub fn write<R: Report, W: Write>(self, report: &R, out: &mut W) -> io::Result<()> {
        match self {
            Self::Table => report.write_table(out),
            Self::Csv => report.write_csv(out),
            Self::Json => write_json(report, out),
        }
    }
}

pub(crate) fn or_na(value: Option<f64>, render: impl Fn(f64) -> String) -> String {
    value.map_or_else(|| "n/a".to_owned(), render)
}

/// Aligned table, one row per mode.
///
/// # Errors
///
/// Fails if `out` cannot be written.
pub fn write_table<W: Write>(report: &CompareReport, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Arrays have {} rows of {} columns, repeats = {}, passes = {}",
        report.dims.ny, report.dims.nx, report.repeats, report.passes
    )?;
    writeln!(
        out,
        "{:<18} {:>12} {:>12} {:>9}",
        "mode", "secs", "1K iter", "relative"
    )?;
    for result in &report.results {
        writeln!(
            out,
            "{:<18} {:>12} {:>12} {:>9}",
            result.mode.name(),
            or_na(result.secs, |v| format!("{v:.6}")),
            or_na(result.kiter_secs, |v| format!("{v:.3e}")),
            or_na(result.relative, |v| format!("{v:.2}")),
        )?;
        if let Some(mismatch) = &result.mismatch {
            writeln!(out, "  {mismatch}")?;
        }
    }
    let fastest = report.fastest.map_or("n/a", KernelMode::name);
    writeln!(out, "Fastest: {fastest}")?;
    writeln!(
        out,
        "Default kernels: {}, {}",
        report.default_flat.name(),
        report.default_multi.name()
    )?;
    out.flush()
}

/// `mode,repeats,secs,kiter_secs,relative`, blank fields where unknown.
///
/// # Errors
///
/// Fails if `out` cannot be written.
pub fn write_csv<W: Write>(report: &CompareReport, out: &mut W) -> io::Result<()> {
    let field = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    writeln!(out, "mode,repeats,secs,kiter_secs,relative")?;
    for result in &report.results {
        writeln!(
            out,
            "{},{},{},{},{}",
            result.mode.name(),
            report.repeats,
            field(result.secs),
            field(result.kiter_secs),
            field(result.relative),
        )?;
    }
    out.flush()
}

/// The whole report as pretty JSON.
///
/// # Errors
///
/// Fails if `out` cannot be written.
pub fn write_json<R: Serialize, W: Write>(report: &R, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    out.flush()
}
