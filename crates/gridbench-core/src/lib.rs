// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core types for gridbench: 2D array representations and their access contract
//!
//! This crate provides the pieces every benchmark variant shares:
//!
//! - [`dims`] - Array shape and row-major offset arithmetic
//! - [`grid`] - The [`Grid2d`] access contract
//! - [`repr`] - The representations under test (flat, row table, ndarray, nested)
//! - [`manager`] - Allocation helper that builds ready-to-index row tables
//!   and 3-D volumes
//! - [`init`] - Deterministic input initialisation
//! - [`verify`] - Post-transform validation pass
//! - [`error`] - Error types and Result alias

#![deny(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Array shape and offset arithmetic
pub mod dims;
/// Error types for gridbench operations
pub mod error;
/// The two-index access contract shared by every representation
pub mod grid;
/// Deterministic input initialisation
pub mod init;
/// Managed allocation of row tables
pub mod manager;
/// Concrete 2D array representations
pub mod repr;
/// Validation of transform output
pub mod verify;

// Re-exports for convenience
pub use dims::Dims;
pub use error::{GridError, Result};
pub use grid::Grid2d;
pub use init::{expected_cell, fill_input};
pub use manager::{
    ArrayId, ArrayManager, ArrayRecord, ArrayShape, ManagedArray, ManagedHandle, ManagedVolume,
    row_table,
};
pub use repr::{FlatGrid, MultiGrid, NestedGrid, RowTable};
pub use verify::{Mismatch, check_same_shape, find_mismatch};
