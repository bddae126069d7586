// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for array construction and validation.

use crate::dims::Dims;
use crate::manager::ArrayId;
use thiserror::Error;

/// Errors raised while building or checking 2D arrays.
///
/// Allocation failure is not represented here; the global allocator aborts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// `rows * columns` (or the byte size) does not fit in `usize`.
    #[error("array of {rows} rows by {columns} columns overflows addressable memory")]
    ShapeOverflow {
        /// Requested row count
        rows: usize,
        /// Requested column count
        columns: usize,
    },

    /// `planes * rows * columns` (or the byte size) does not fit in `usize`.
    #[error("array of {planes} planes of {rows} rows by {columns} columns overflows addressable memory")]
    VolumeOverflow {
        /// Requested plane count
        planes: usize,
        /// Requested rows per plane
        rows: usize,
        /// Requested column count
        columns: usize,
    },

    /// A backing buffer does not hold exactly `rows * columns` elements.
    #[error("buffer holds {actual} elements, shape needs {expected}")]
    BufferSize {
        /// Elements the shape requires
        expected: usize,
        /// Elements actually supplied
        actual: usize,
    },

    /// A row start places (part of) a row outside the buffer.
    #[error("row {row} starts at offset {start}, which runs past the {len}-element buffer")]
    RowOutOfBounds {
        /// Offending row
        row: usize,
        /// Its start offset
        start: usize,
        /// Length of the backing buffer
        len: usize,
    },

    /// Two rows share buffer elements.
    #[error("row {row} overlaps row {other}")]
    RowOverlap {
        /// Offending row
        row: usize,
        /// Row it overlaps
        other: usize,
    },

    /// Input and output arrays disagree on shape.
    #[error("shape mismatch: input is {input}, output is {output}")]
    ShapeMismatch {
        /// Shape of the input array
        input: Dims,
        /// Shape of the output array
        output: Dims,
    },

    /// The array manager has no live record for this id.
    #[error("no managed array with id {0}")]
    UnknownArray(ArrayId),
}

/// Result type for gridbench operations.
pub type Result<T> = std::result::Result<T, GridError>;
