// SPDX-License-Identifier: MIT OR Apache-2.0
//! The representations under comparison.
//!
//! | type | addressing | contiguity |
//! |------|------------|------------|
//! | [`FlatGrid`] | caller computes `y * nx + x` | whole array |
//! | [`RowTable`] | `a[y][x]` through a table of row starts | whole array |
//! | [`MultiGrid`] | `a[[y, x]]` via `ndarray` | whole array |
//! | [`NestedGrid`] | `a[y][x]` on `Vec<Vec<f32>>` | within a row only |
//!
//! The managed variant uses [`RowTable`] too; only its construction differs
//! (see [`crate::manager`]).

mod flat;
mod multi;
mod nested;
mod rowtable;

pub use flat::FlatGrid;
pub use multi::{MultiGrid, zeroed_multi};
pub use nested::{NestedGrid, zeroed_nested};
pub use rowtable::RowTable;
