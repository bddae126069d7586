// SPDX-License-Identifier: MIT OR Apache-2.0
//! Positional argument plumbing shared by every benchmark binary.
//!
//! Every binary takes `[repeat_count] [columns] [rows]`, each optional and
//! read left to right. Conversion is best effort: a clean integer is used as
//! is, otherwise its leading digits (`"250x"` reads as 250), otherwise the
//! default. Anything other than a clean integer is logged at `warn`.

use clap::Args;
use gridbench_core::Dims;
use log::{debug, warn};

/// Default column count for every variant.
pub const DEFAULT_COLUMNS: usize = 2000;
/// Default row count for every variant.
pub const DEFAULT_ROWS: usize = 10;
/// Default repeat count for most variants.
pub const DEFAULT_REPEATS: usize = 1000;
/// Default repeat count for the nested vector variant.
pub const NESTED_DEFAULT_REPEATS: usize = 100_000;

/// Fallback values for omitted or unreadable arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defaults {
    /// Transform calls
    pub repeats: usize,
    /// Columns
    pub nx: usize,
    /// Rows
    pub ny: usize,
}

impl Defaults {
    /// Standard shape with the given repeat count.
    #[must_use]
    pub const fn with_repeats(repeats: usize) -> Self {
        Self {
            repeats,
            nx: DEFAULT_COLUMNS,
            ny: DEFAULT_ROWS,
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::with_repeats(DEFAULT_REPEATS)
    }
}

/// `[repeat_count] [columns] [rows]` as raw strings.
///
/// Kept as strings so that conversion can fall back instead of rejecting.
#[derive(Args, Debug, Clone, Default)]
pub struct PositionalArgs {
    /// Number of times to call the transform
    #[arg(value_name = "REPEATS", allow_hyphen_values = true)]
    pub repeats: Option<String>,

    /// Number of columns (row length)
    #[arg(value_name = "COLUMNS", allow_hyphen_values = true)]
    pub columns: Option<String>,

    /// Number of rows
    #[arg(value_name = "ROWS", allow_hyphen_values = true)]
    pub rows: Option<String>,

    /// Anything past the third positional; ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    pub ignored: Vec<String>,
}

impl PositionalArgs {
    /// Resolve against `defaults`.
    #[must_use]
    pub fn resolve(&self, defaults: Defaults) -> RunConfig {
        if !self.ignored.is_empty() {
            debug!("ignoring extra arguments {:?}", self.ignored);
        }
        RunConfig::from_positionals(
            self.repeats.as_deref(),
            self.columns.as_deref(),
            self.rows.as_deref(),
            defaults,
        )
    }
}

/// Resolved run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Transform calls
    pub repeats: usize,
    /// Columns
    pub nx: usize,
    /// Rows
    pub ny: usize,
}

impl RunConfig {
    /// Read up to three positionals from `args` (program name already
    /// stripped). Arguments past the third are ignored.
    pub fn from_args<I, S>(args: I, defaults: Defaults) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().take(3).collect();
        let arg = |i: usize| args.get(i).map(AsRef::as_ref);
        Self::from_positionals(arg(0), arg(1), arg(2), defaults)
    }

    /// Resolve three optional positionals.
    #[must_use]
    pub fn from_positionals(
        repeats: Option<&str>,
        columns: Option<&str>,
        rows: Option<&str>,
        defaults: Defaults,
    ) -> Self {
        Self {
            repeats: resolve("Repeats", repeats, defaults.repeats),
            nx: resolve("Columns", columns, defaults.nx),
            ny: resolve("Rows", rows, defaults.ny),
        }
    }

    /// Array shape.
    #[must_use]
    pub const fn dims(&self) -> Dims {
        Dims::new(self.nx, self.ny)
    }
}

fn resolve(label: &str, arg: Option<&str>, default: usize) -> usize {
    let Some(arg) = arg else {
        return default;
    };
    if let Ok(value) = arg.trim().parse() {
        return value;
    }
    if let Some(value) = parse_count(arg) {
        warn!("{label} {arg:?} read as {value}");
        return value;
    }
    warn!("{label} {arg:?} invalid, using {default}");
    default
}

/// Best-effort conversion: skip leading whitespace and an optional `+`, then
/// read decimal digits up to the first non-digit.
///
/// Returns `None` when there are no leading digits or the value overflows.
#[must_use]
pub fn parse_count(arg: &str) -> Option<usize> {
    let trimmed = arg.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}
