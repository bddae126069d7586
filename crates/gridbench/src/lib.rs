// SPDX-License-Identifier: MIT OR Apache-2.0
//! # gridbench
//!
//! How much does the way you store a 2D array cost?
//!
//! gridbench applies one trivial transform, `out[y][x] = in[y][x] + x + y`,
//! to the same `f32` data held five different ways and times it:
//!
//! | Representation | Type | Access |
//! |----------------|------|--------|
//! | flat buffer | [`FlatGrid`] | `a[y * nx + x]` |
//! | hand-built row table | [`RowTable<f32>`](RowTable) | `a[y][x]` |
//! | managed row table | [`ManagedArray<f32>`](ManagedArray) | `a[y][x]` |
//! | library array | [`MultiGrid`] (`ndarray::Array2<f32>`) | `a[[y, x]]` |
//! | nested vectors | [`NestedGrid`] (`Vec<Vec<f32>>`) | `a[y][x]` |
//!
//! ## Crate layout
//!
//! - [`gridbench_core`]: shapes, representations, the array manager,
//!   initialisation and validation
//! - [`gridbench_kernels`]: the transform for each representation, in
//!   checked and unchecked forms
//! - `gridbench-cli`: the benchmark binaries
//!
//! ## Example
//!
//! ```
//! use gridbench::{Dims, FlatGrid, fill_input, find_mismatch, kernels};
//!
//! let dims = Dims::new(3, 2);
//! let mut input = FlatGrid::zeroed(dims)?;
//! let mut output = FlatGrid::zeroed(dims)?;
//! fill_input(&mut input);
//!
//! kernels::flat::transform(input.as_slice(), dims.nx, dims.ny, output.as_mut_slice());
//!
//! assert_eq!(output.as_slice(), &[5.0; 6]);
//! assert!(find_mismatch(&input, &output).is_none());
//! # Ok::<(), gridbench::GridError>(())
//! ```
//!
//! ## Features
//!
//! - `bounds-check`: the default `flat` kernel checks every index
//! - `unchecked`: the default `multi` kernel skips per-element checks

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub use gridbench_core::*;

/// Transform kernels, one module per representation.
pub use gridbench_kernels as kernels;

/// The library array crate behind [`MultiGrid`].
pub use ndarray;

/// Everything a benchmark needs in one import.
pub mod prelude {
    pub use crate::kernels::{flat, multi, nested, rowptr};
    pub use gridbench_core::{
        ArrayManager, Dims, FlatGrid, Grid2d, ManagedArray, Mismatch, MultiGrid, NestedGrid,
        RowTable, expected_cell, fill_input, find_mismatch,
    };
    pub use gridbench_core::repr::{zeroed_multi, zeroed_nested};
}
