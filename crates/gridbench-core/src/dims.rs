// SPDX-License-Identifier: MIT OR Apache-2.0
//! Array shape.
//!
//! `nx` counts columns and `ny` counts rows. Element `(y, x)` of a row-major
//! array lives at offset `y * nx + x`.

use crate::error::{GridError, Result};
use serde::Serialize;
use std::fmt;

/// Shape of a 2D array: `nx` columns by `ny` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dims {
    /// Number of columns (length of one row)
    pub nx: usize,
    /// Number of rows
    pub ny: usize,
}

impl Dims {
    /// Create a shape of `nx` columns by `ny` rows.
    #[must_use]
    pub const fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Total element count.
    ///
    /// Wraps on overflow; use [`Self::checked_len`] when sizing an allocation.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nx.wrapping_mul(self.ny)
    }

    /// Whether the shape has no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0
    }

    /// Total element count, or [`GridError::ShapeOverflow`].
    ///
    /// # Errors
    ///
    /// Returns an error if `nx * ny` overflows `usize`.
    pub const fn checked_len(&self) -> Result<usize> {
        match self.nx.checked_mul(self.ny) {
            Some(len) => Ok(len),
            None => Err(GridError::ShapeOverflow {
                rows: self.ny,
                columns: self.nx,
            }),
        }
    }

    /// Row-major offset of element `(y, x)`. No bounds check.
    #[inline]
    #[must_use]
    pub const fn offset(&self, y: usize, x: usize) -> usize {
        y * self.nx + x
    }

    /// Whether `(y, x)` lies inside the shape.
    #[inline]
    #[must_use]
    pub const fn contains(&self, y: usize, x: usize) -> bool {
        y < self.ny && x < self.nx
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows of {} columns", self.ny, self.nx)
    }
}
