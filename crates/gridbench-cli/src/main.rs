// SPDX-License-Identifier: MIT OR Apache-2.0
//! gridbench CLI binary - every representation behind one command

use clap::{Parser, Subcommand};
use gridbench_cli::args::{DEFAULT_COLUMNS, DEFAULT_REPEATS, DEFAULT_ROWS, PositionalArgs};
use gridbench_cli::compare::{CompareConfig, KernelMode, OutputFormat, compare};
use gridbench_cli::driver;
use gridbench_cli::init_logging;
use gridbench_cli::matrix::{BuildProfile, MatrixConfig, default_target_dir, run_matrix};
use gridbench_cli::variant::{Flat, Managed, Multi, Nested, RowPtr, Variant, VariantKind};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gridbench")]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the gridbench CLI
#[derive(Subcommand)]
enum Commands {
    /// Flat buffer, offsets computed per element
    Flat(PositionalArgs),
    /// Row table with hand-built row starts
    Rowptr(PositionalArgs),
    /// Row table built by the array manager
    Managed(PositionalArgs),
    /// ndarray `Array2<f32>`
    Multi(PositionalArgs),
    /// Vector of row vectors
    Nested(PositionalArgs),
    /// Time every kernel mode and rank them
    Compare {
        /// Calls per timed run (at least 2)
        #[arg(short, long, default_value_t = DEFAULT_REPEATS)]
        repeats: usize,
        /// Passes per mode; the lowest estimate is kept
        #[arg(short, long, default_value_t = 3)]
        passes: usize,
        /// Number of columns
        #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
        columns: usize,
        /// Number of rows
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,
        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Restrict to these modes (repeatable)
        #[arg(long, value_enum)]
        only: Vec<KernelMode>,
    },
    /// Build the variant binaries per optimisation profile and time each
    /// as a whole process
    Matrix {
        /// Profiles to time, in column order (repeatable; default opt0,
        /// opt1, opt2, release)
        #[arg(long = "profile", value_enum)]
        profiles: Vec<BuildProfile>,
        /// Restrict to these representations (repeatable)
        #[arg(long, value_enum)]
        only: Vec<VariantKind>,
        /// Repeats for every representation instead of each one's default
        #[arg(short, long)]
        repeats: Option<usize>,
        /// Passes per cell; the lowest estimate is kept
        #[arg(short, long, default_value_t = 1)]
        passes: usize,
        /// Number of columns
        #[arg(short, long, default_value_t = DEFAULT_COLUMNS)]
        columns: usize,
        /// Number of rows
        #[arg(long, default_value_t = DEFAULT_ROWS)]
        rows: usize,
        /// Cargo target directory holding the builds [default:
        /// $CARGO_TARGET_DIR or target]
        #[arg(long)]
        target_dir: Option<PathBuf>,
        /// Time existing binaries without running cargo
        #[arg(long)]
        no_build: bool,
        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the representations and kernel modes
    List,
}

fn main() {
    init_logging();
    let args = Args::parse();
    if let Err(e) = dispatch(args.command) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn dispatch(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Flat(positionals) => run_variant(Flat, &positionals),
        Commands::Rowptr(positionals) => run_variant(RowPtr, &positionals),
        Commands::Managed(positionals) => run_variant(Managed::default(), &positionals),
        Commands::Multi(positionals) => run_variant(Multi, &positionals),
        Commands::Nested(positionals) => run_variant(Nested, &positionals),
        Commands::Compare {
            repeats,
            passes,
            columns,
            rows,
            format,
            only,
        } => {
            let mut config = CompareConfig::new(repeats, passes, columns, rows);
            if !only.is_empty() {
                config.modes = only;
            }
            let report = compare(&config)?;
            format.write(&report, &mut io::stdout().lock())?;
            Ok(())
        }
        Commands::Matrix {
            profiles,
            only,
            repeats,
            passes,
            columns,
            rows,
            target_dir,
            no_build,
            format,
        } => {
            let mut config = MatrixConfig::new(target_dir.unwrap_or_else(default_target_dir));
            if !profiles.is_empty() {
                config.profiles = profiles;
            }
            if !only.is_empty() {
                config.variants = only;
            }
            config.repeats = repeats;
            config.passes = passes;
            config.nx = columns;
            config.ny = rows;
            config.build = !no_build;
            let report = run_matrix(&config)?;
            format.write(&report, &mut io::stdout().lock())?;
            Ok(())
        }
        Commands::List => list(&mut io::stdout().lock()),
    }
}

fn run_variant<V: Variant>(mut variant: V, positionals: &PositionalArgs) -> anyhow::Result<()> {
    let config = positionals.resolve(V::defaults());
    driver::run(&mut variant, &config, &mut io::stdout().lock())?;
    Ok(())
}

fn list<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Representations:")?;
    for kind in VariantKind::ALL {
        let defaults = kind.defaults();
        writeln!(
            out,
            "  {:<8} {} (default repeats {})",
            kind.name(),
            kind.summary(),
            defaults.repeats
        )?;
    }
    writeln!(out, "Kernel modes:")?;
    for mode in KernelMode::ALL {
        writeln!(out, "  {}", mode.name())?;
    }
    writeln!(
        out,
        "Default kernels: {}, {}",
        KernelMode::default_flat().name(),
        KernelMode::default_multi().name()
    )?;
    writeln!(out, "Build profiles:")?;
    for profile in BuildProfile::ALL {
        writeln!(out, "  {}", profile.name())?;
    }
    Ok(())
}
