// SPDX-License-Identifier: MIT OR Apache-2.0
//! Vector of independently allocated row vectors.
//!
//! Each row is its own heap allocation, so elements are contiguous within a
//! row but nothing is promised across rows.

use crate::dims::Dims;
use crate::error::Result;
use crate::grid::Grid2d;

/// `ny` rows, each a `Vec` of `nx` floats.
pub type NestedGrid = Vec<Vec<f32>>;

/// Allocate `ny` zero-filled rows of `nx` elements.
///
/// # Errors
///
/// Returns [`crate::GridError::ShapeOverflow`] if the element count overflows.
pub fn zeroed_nested(dims: Dims) -> Result<NestedGrid> {
    dims.checked_len()?;
    Ok(vec![vec![0.0; dims.nx]; dims.ny])
}

impl Grid2d for Vec<Vec<f32>> {
    /// Columns are taken from the first row; an empty outer vector has none.
    #[inline]
    fn dims(&self) -> Dims {
        Dims::new(self.first().map_or(0, Vec::len), self.len())
    }

    #[inline]
    fn get(&self, y: usize, x: usize) -> f32 {
        self[y][x]
    }

    #[inline]
    fn set(&mut self, y: usize, x: usize, value: f32) {
        self[y][x] = value;
    }
}
