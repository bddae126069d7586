// SPDX-License-Identifier: MIT OR Apache-2.0
//! Transform kernels for gridbench
//!
//! Each module holds the transform `Out[y][x] = In[y][x] + x + y` for one
//! array representation. Every kernel is `#[inline(never)]` and lives
//! apart from the driver that calls it.
//!
//! - [`flat`] - manual `y * nx + x` offsets on a flat slice
//! - [`rowptr`] - `a[y][x]` through a [`RowTable`](gridbench_core::RowTable)
//! - [`multi`] - `a[[y, x]]` on an `ndarray::Array2`
//! - [`nested`] - `a[y][x]` on `Vec<Vec<f32>>`
//!
//! [`flat::transform`] uses unchecked offsets unless the `bounds-check`
//! feature is enabled. [`multi::transform`] is checked, as `ndarray` is by
//! default, unless the `unchecked` feature is enabled. Unchecked kernels
//! verify the shapes once on entry and then index without per-element
//! checks.
//!
//! All kernels iterate rows outer, columns inner.

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![allow(clippy::multiple_crate_versions)]

/// Flat buffer kernels
pub mod flat;
/// `ndarray` kernels
pub mod multi;
/// Nested vector kernels
pub mod nested;
/// Row table kernels
pub mod rowptr;

/// Whether [`flat::transform`] is the bounds-checked kernel.
pub const FLAT_BOUNDS_CHECKED: bool = cfg!(feature = "bounds-check");

/// Whether [`multi::transform`] is the `uget` kernel.
pub const MULTI_UNCHECKED: bool = cfg!(feature = "unchecked");
