// SPDX-License-Identifier: MIT OR Apache-2.0
//! General-purpose N-dimensional array library, fixed at two dimensions.

use crate::dims::Dims;
use crate::error::Result;
use crate::grid::Grid2d;
use ndarray::Array2;

/// `ndarray`'s owned 2D array, standard (row-major) layout, shape `(ny, nx)`.
pub type MultiGrid = Array2<f32>;

/// Allocate a zero-filled `(ny, nx)` array in standard layout.
///
/// # Errors
///
/// Returns [`crate::GridError::ShapeOverflow`] if the element count overflows.
pub fn zeroed_multi(dims: Dims) -> Result<MultiGrid> {
    dims.checked_len()?;
    Ok(Array2::zeros((dims.ny, dims.nx)))
}

impl Grid2d for Array2<f32> {
    #[inline]
    fn dims(&self) -> Dims {
        let (ny, nx) = self.dim();
        Dims::new(nx, ny)
    }

    #[inline]
    fn get(&self, y: usize, x: usize) -> f32 {
        self[[y, x]]
    }

    #[inline]
    fn set(&mut self, y: usize, x: usize, value: f32) {
        self[[y, x]] = value;
    }
}
