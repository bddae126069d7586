// SPDX-License-Identifier: MIT OR Apache-2.0
//! # gridbench-cli
//!
//! Command-line front end for gridbench: one binary per representation
//! plus the `gridbench` multiplexer.
//!
//! ## Usage
//!
//! ```bash
//! # 1000 transforms over 10 rows of 2000 columns, flat buffer
//! gb-flat
//!
//! # 500 transforms over 20 rows of 64 columns, vector of vectors
//! gb-nested 500 64 20
//!
//! # Same thing through the multiplexer
//! gridbench nested 500 64 20
//!
//! # Rank every kernel mode
//! gridbench compare --repeats 2000 --format csv
//!
//! # Build the gb-* binaries under opt0..opt2 and release, time each as a
//! # whole process, print the representation x profile matrix
//! gridbench matrix --format csv
//! ```
//!
//! ## Binaries
//!
//! | Binary | Representation |
//! |--------|----------------|
//! | `gb-flat` | flat buffer, kernel computes offsets |
//! | `gb-rowptr` | row table with hand-built row starts |
//! | `gb-managed` | row table from the array manager |
//! | `gb-multi` | `ndarray::Array2<f32>` |
//! | `gb-nested` | `Vec<Vec<f32>>` |
//!
//! Stdout carries only the report. Diagnostics go through `log` to stderr,
//! filtered by `RUST_LOG` (default `warn`).

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod args;
pub mod compare;
pub mod driver;
pub mod matrix;
pub mod variant;

use crate::args::PositionalArgs;
use crate::variant::Variant;
use clap::Parser;
use std::io;

/// Start `env_logger` on stderr, `warn` unless `RUST_LOG` says otherwise.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(version, about = "Time a 2D array transform", long_about = None)]
struct VariantCli {
    #[command(flatten)]
    positionals: PositionalArgs,
}

/// Entry point shared by the single-variant binaries.
///
/// A validation mismatch is printed but still exits 0; only setup failures
/// exit 1.
pub fn variant_main<V: Variant + Default>() {
    init_logging();
    let cli = VariantCli::parse();
    let config = cli.positionals.resolve(V::defaults());
    let mut variant = V::default();
    if let Err(e) = driver::run(&mut variant, &config, &mut io::stdout().lock()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
