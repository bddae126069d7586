// SPDX-License-Identifier: MIT OR Apache-2.0
//! Representation by build profile timing matrix.
//!
//! The `gb-*` binaries are built once per optimisation profile and timed as
//! whole processes: one run with the variant's own default repeat count and
//! one run with a single repeat. Process start, allocation and validation
//! cancel out of `(t_n - t_1) * n / (n - 1)`, as in [`compare`](crate::compare).
//!
//! Profiles live in the workspace `Cargo.toml`:
//!
//! | Profile | Optimisation |
//! |---------|--------------|
//! | `dev` | `opt-level = 0`, debug assertions |
//! | `opt0` | `opt-level = 0` |
//! | `opt1` | `opt-level = 1` |
//! | `opt2` | `opt-level = 2` |
//! | `release` | `opt-level = 3`, fat LTO |
//! | `release_native` | `release` with `-C target-cpu=native` |

use crate::compare::{Report, extrapolate, or_na};
use crate::variant::VariantKind;
use anyhow::{Context, bail};
use clap::ValueEnum;
use gridbench_core::Dims;
use log::{debug, info, warn};
use serde::Serialize;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A cargo profile the variant binaries are built under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum BuildProfile {
    /// Unoptimised debug build
    Dev,
    /// Release settings at `opt-level = 0`
    Opt0,
    /// Release settings at `opt-level = 1`
    Opt1,
    /// Release settings at `opt-level = 2`
    Opt2,
    /// Full release build, `opt-level = 3`
    Release,
    /// Release build tuned for the host CPU
    ReleaseNative,
}

impl BuildProfile {
    /// Every profile in column order.
    pub const ALL: [Self; 6] = [
        Self::Dev,
        Self::Opt0,
        Self::Opt1,
        Self::Opt2,
        Self::Release,
        Self::ReleaseNative,
    ];

    /// Profiles timed when none are named.
    pub const DEFAULT: [Self; 4] = [Self::Opt0, Self::Opt1, Self::Opt2, Self::Release];

    /// Column name in reports and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Opt0 => "opt0",
            Self::Opt1 => "opt1",
            Self::Opt2 => "opt2",
            Self::Release => "release",
            Self::ReleaseNative => "release_native",
        }
    }

    /// Name passed to `cargo build --profile`.
    #[must_use]
    pub const fn cargo_profile(self) -> &'static str {
        match self {
            Self::ReleaseNative => "release",
            other => other.name(),
        }
    }

    /// Directory cargo writes this profile's binaries to, under the target
    /// directory.
    #[must_use]
    pub const fn output_dir(self) -> &'static str {
        match self {
            Self::Dev => "debug",
            other => other.cargo_profile(),
        }
    }

    /// Extra `RUSTFLAGS` for the build.
    #[must_use]
    pub const fn rustflags(self) -> Option<&'static str> {
        match self {
            Self::ReleaseNative => Some("-C target-cpu=native"),
            _ => None,
        }
    }

    /// Target directory for this profile. Native builds get their own so
    /// their `RUSTFLAGS` never invalidate the plain release build.
    #[must_use]
    pub fn target_dir(self, root: &Path) -> PathBuf {
        if self.rustflags().is_some() {
            root.join("native")
        } else {
            root.to_path_buf()
        }
    }

    /// Path of the `gb-*` binary for `variant` under this profile.
    #[must_use]
    pub fn binary(self, root: &Path, variant: VariantKind) -> PathBuf {
        self.target_dir(root)
            .join(self.output_dir())
            .join(format!("gb-{}{}", variant.name(), env::consts::EXE_SUFFIX))
    }
}

/// Settings of a matrix run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixConfig {
    /// Profiles to build and time, in column order
    pub profiles: Vec<BuildProfile>,
    /// Representations to time, in row order
    pub variants: Vec<VariantKind>,
    /// Repeat count for every variant instead of its own default
    pub repeats: Option<usize>,
    /// Timed passes per cell; the lowest estimate wins
    pub passes: usize,
    /// Columns
    pub nx: usize,
    /// Rows
    pub ny: usize,
    /// Cargo target directory holding the builds
    pub target_dir: PathBuf,
    /// Run `cargo build` for each profile before timing
    pub build: bool,
}

impl MatrixConfig {
    /// Default profiles and every variant at their default shape.
    #[must_use]
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        let defaults = VariantKind::Flat.defaults();
        Self {
            profiles: BuildProfile::DEFAULT.to_vec(),
            variants: VariantKind::ALL.to_vec(),
            repeats: None,
            passes: 1,
            nx: defaults.nx,
            ny: defaults.ny,
            target_dir: target_dir.into(),
            build: true,
        }
    }

    /// Shape of the arrays.
    #[must_use]
    pub const fn dims(&self) -> Dims {
        Dims::new(self.nx, self.ny)
    }

    /// Repeat count used for `variant`, at least 2.
    #[must_use]
    pub fn repeats_for(&self, variant: VariantKind) -> usize {
        self.repeats
            .unwrap_or_else(|| variant.defaults().repeats)
            .max(2)
    }

    /// The pass count actually used, at least 1.
    #[must_use]
    pub fn effective_passes(&self) -> usize {
        self.passes.max(1)
    }
}

/// `$CARGO_TARGET_DIR`, or `target` relative to the working directory.
#[must_use]
pub fn default_target_dir() -> PathBuf {
    env::var_os("CARGO_TARGET_DIR").map_or_else(|| PathBuf::from("target"), PathBuf::from)
}

/// Build every variant binary under `profile`.
///
/// # Errors
///
/// Fails if cargo cannot be started or the build fails.
pub fn build(profile: BuildProfile, target_root: &Path) -> anyhow::Result<()> {
    let cargo = env::var_os("CARGO").unwrap_or_else(|| "cargo".into());
    let target_dir = profile.target_dir(target_root);
    let mut command = Command::new(&cargo);
    command
        .args(["build", "--quiet", "--bins", "-p", "gridbench-cli"])
        .args(["--profile", profile.cargo_profile()])
        .arg("--target-dir")
        .arg(&target_dir)
        .stdout(Stdio::null());
    if let Some(flags) = profile.rustflags() {
        command.env("RUSTFLAGS", flags);
    }
    info!("building {} into {}", profile.name(), target_dir.display());
    let status = command
        .status()
        .with_context(|| format!("failed to start {}", cargo.to_string_lossy()))?;
    if !status.success() {
        bail!("cargo build for profile {} failed: {status}", profile.name());
    }
    Ok(())
}

/// Wall time of one whole run of `exe`, and the first validation error it
/// printed.
///
/// # Errors
///
/// Fails if the process cannot be started, exits unsuccessfully, or prints
/// something other than the configuration line for `dims` and `repeats`.
pub fn time_process(
    exe: &Path,
    repeats: usize,
    dims: Dims,
) -> anyhow::Result<(Duration, Option<String>)> {
    let start = Instant::now();
    let output = Command::new(exe)
        .arg(repeats.to_string())
        .arg(dims.nx.to_string())
        .arg(dims.ny.to_string())
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .with_context(|| format!("failed to run {}", exe.display()))?;
    let elapsed = start.elapsed();

    if !output.status.success() {
        bail!("{} exited with {}", exe.display(), output.status);
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    let expected = format!("Arrays have {dims}, repeats = {repeats}");
    if lines.next() != Some(expected.as_str()) {
        bail!("{} did not report {expected:?}", exe.display());
    }
    Ok((elapsed, lines.next().map(str::to_owned)))
}

/// Raw result of timing one variant under one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessMeasurement {
    /// Repeat count of the full run
    pub repeats: usize,
    /// Lowest positive estimate of `repeats` calls, in seconds
    pub secs: Option<f64>,
    /// Why the cell has no valid time: a run failed or the output was wrong
    pub failure: Option<String>,
}

/// Time `variant` as built under `profile`.
///
/// Run failures are recorded in the measurement, not returned, so one
/// missing build leaves the rest of the matrix intact.
#[must_use]
pub fn measure(
    config: &MatrixConfig,
    variant: VariantKind,
    profile: BuildProfile,
) -> ProcessMeasurement {
    let exe = profile.binary(&config.target_dir, variant);
    let repeats = config.repeats_for(variant);
    let dims = config.dims();
    let mut best: Option<f64> = None;
    let mut failure = None;
    for pass in 0..config.effective_passes() {
        let runs = time_process(&exe, repeats, dims)
            .and_then(|full| time_process(&exe, 1, dims).map(|single| (full, single)));
        let ((full, full_error), (single, single_error)) = match runs {
            Ok(runs) => runs,
            Err(err) => {
                warn!("{} {}: {err:#}", variant.name(), profile.name());
                failure = Some(format!("{err:#}"));
                break;
            }
        };
        failure = failure.or(full_error).or(single_error);
        let estimate = extrapolate(full, single, repeats);
        debug!(
            "{} {}: pass {pass}: {repeats} repeats {full:?}, 1 repeat {single:?}, estimate {estimate:.6}s",
            variant.name(),
            profile.name()
        );
        if estimate > 0.0 && best.is_none_or(|b| estimate < b) {
            best = Some(estimate);
        }
    }
    ProcessMeasurement {
        repeats,
        secs: best,
        failure,
    }
}

/// One representation under one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixCell {
    /// Build profile of this column
    pub profile: BuildProfile,
    /// Estimated seconds per 1000 calls
    pub kiter_secs: Option<f64>,
    /// `kiter_secs` over the fastest cell's
    pub relative: Option<f64>,
    /// Why the cell has no valid time
    pub failure: Option<String>,
}

/// One representation across every profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    /// Representation of this row
    pub variant: VariantKind,
    /// Repeats per full run
    pub repeats: usize,
    /// One cell per profile, in column order
    pub cells: Vec<MatrixCell>,
}

/// Fastest valid cell of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fastest {
    /// Row
    pub variant: VariantKind,
    /// Column
    pub profile: BuildProfile,
}

/// Relative times of every representation under every profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixReport {
    /// Shape of the arrays
    pub dims: Dims,
    /// Passes per cell
    pub passes: usize,
    /// Column order
    pub profiles: Vec<BuildProfile>,
    /// One row per representation
    pub rows: Vec<MatrixRow>,
    /// Fastest valid cell
    pub fastest: Option<Fastest>,
}

impl MatrixReport {
    /// Lay measurements out by representation and profile and rank them
    /// against the fastest valid cell.
    ///
    /// Cells with no measurement are left empty.
    #[must_use]
    pub fn from_measurements(
        config: &MatrixConfig,
        measurements: &[(VariantKind, BuildProfile, ProcessMeasurement)],
    ) -> Self {
        let kiter = |m: &ProcessMeasurement| {
            m.secs
                .filter(|_| m.failure.is_none())
                .map(|secs| secs * 1000.0 / m.repeats as f64)
        };
        let fastest = measurements
            .iter()
            .filter_map(|(variant, profile, m)| kiter(m).map(|k| (*variant, *profile, k)))
            .min_by(|a, b| a.2.total_cmp(&b.2));
        let fastest_kiter = fastest.map(|(_, _, k)| k);

        let rows = config
            .variants
            .iter()
            .map(|&variant| {
                let cells = config
                    .profiles
                    .iter()
                    .map(|&profile| {
                        let found = measurements
                            .iter()
                            .find(|(v, p, _)| *v == variant && *p == profile)
                            .map(|(_, _, m)| m);
                        let kiter_secs = found.and_then(kiter);
                        MatrixCell {
                            profile,
                            kiter_secs,
                            relative: kiter_secs.zip(fastest_kiter).map(|(k, f)| k / f),
                            failure: found.and_then(|m| m.failure.clone()),
                        }
                    })
                    .collect();
                MatrixRow {
                    variant,
                    repeats: config.repeats_for(variant),
                    cells,
                }
            })
            .collect();

        Self {
            dims: config.dims(),
            passes: config.effective_passes(),
            profiles: config.profiles.clone(),
            rows,
            fastest: fastest.map(|(variant, profile, _)| Fastest { variant, profile }),
        }
    }
}

impl Report for MatrixReport {
    fn write_table<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "Arrays have {} rows of {} columns, passes = {}",
            self.dims.ny, self.dims.nx, self.passes
        )?;
        write!(out, "{:<10} {:>8}", "", "repeats")?;
        for profile in &self.profiles {
            write!(out, " {:>14}", profile.name())?;
        }
        writeln!(out)?;
        for row in &self.rows {
            write!(out, "{:<10} {:>8}", row.variant.name(), row.repeats)?;
            for cell in &row.cells {
                write!(out, " {:>14}", or_na(cell.relative, |v| format!("{v:.2}")))?;
            }
            writeln!(out)?;
            for cell in &row.cells {
                if let Some(failure) = &cell.failure {
                    writeln!(out, "  {}: {failure}", cell.profile.name())?;
                }
            }
        }
        let fastest = self.fastest.map_or_else(
            || "n/a".to_owned(),
            |f| format!("{} under {}", f.variant.name(), f.profile.name()),
        );
        writeln!(out, "Fastest: {fastest}")?;
        out.flush()
    }

    /// `representation,<profile>...`, one row per representation holding
    /// relative times to two decimals, blank where there is no valid time.
    fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "representation")?;
        for profile in &self.profiles {
            write!(out, ",{}", profile.name())?;
        }
        writeln!(out)?;
        for row in &self.rows {
            write!(out, "{}", row.variant.name())?;
            for cell in &row.cells {
                let value = cell.relative.map(|v| format!("{v:.2}")).unwrap_or_default();
                write!(out, ",{value}")?;
            }
            writeln!(out)?;
        }
        out.flush()
    }
}

/// Build (unless disabled) and time every variant under every profile.
///
/// # Errors
///
/// Fails if a requested build fails.
pub fn run_matrix(config: &MatrixConfig) -> anyhow::Result<MatrixReport> {
    if config.build {
        for &profile in &config.profiles {
            build(profile, &config.target_dir)?;
        }
    }
    let mut measurements = Vec::with_capacity(config.variants.len() * config.profiles.len());
    for &variant in &config.variants {
        for &profile in &config.profiles {
            let measurement = measure(config, variant, profile);
            debug!("{} {}: {measurement:?}", variant.name(), profile.name());
            measurements.push((variant, profile, measurement));
        }
    }
    Ok(MatrixReport::from_measurements(config, &measurements))
}
