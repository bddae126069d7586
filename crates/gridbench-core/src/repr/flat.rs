// SPDX-License-Identifier: MIT OR Apache-2.0
//! Flat buffer with manual offset arithmetic.

use crate::dims::Dims;
use crate::error::{GridError, Result};
use crate::grid::Grid2d;

/// One contiguous row-major buffer; the caller computes `y * nx + x`.
///
/// [`Self::as_slice`] and [`Self::as_mut_slice`] hand out the raw buffer for
/// kernels that do their own offset arithmetic. [`Self::get_checked`] and
/// [`Self::set_checked`] are the bounds-respecting accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatGrid {
    data: Vec<f32>,
    dims: Dims,
}

impl FlatGrid {
    /// Allocate a zero-filled `nx * ny` buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeOverflow`] if the element count overflows.
    pub fn zeroed(dims: Dims) -> Result<Self> {
        let len = dims.checked_len()?;
        Ok(Self {
            data: vec![0.0; len],
            dims,
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::BufferSize`] if `data.len() != nx * ny`.
    pub fn from_vec(data: Vec<f32>, dims: Dims) -> Result<Self> {
        let expected = dims.checked_len()?;
        if data.len() != expected {
            return Err(GridError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { data, dims })
    }

    /// The whole buffer in row-major order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The whole buffer in row-major order, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Element `(y, x)`, or `None` when outside the shape.
    ///
    /// A plain slice lookup would accept `(0, nx)` as `(1, 0)`; this does not.
    #[inline]
    #[must_use]
    pub fn get_checked(&self, y: usize, x: usize) -> Option<f32> {
        self.dims
            .contains(y, x)
            .then(|| self.data[self.dims.offset(y, x)])
    }

    /// Write element `(y, x)`; returns `false` when outside the shape.
    #[inline]
    pub fn set_checked(&mut self, y: usize, x: usize, value: f32) -> bool {
        if !self.dims.contains(y, x) {
            return false;
        }
        let offset = self.dims.offset(y, x);
        self.data[offset] = value;
        true
    }

    /// Consume the grid, returning its buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

impl Grid2d for FlatGrid {
    #[inline]
    fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    fn get(&self, y: usize, x: usize) -> f32 {
        assert!(self.dims.contains(y, x), "({y}, {x}) outside {}", self.dims);
        self.data[self.dims.offset(y, x)]
    }

    #[inline]
    fn set(&mut self, y: usize, x: usize, value: f32) {
        assert!(self.dims.contains(y, x), "({y}, {x}) outside {}", self.dims);
        let offset = self.dims.offset(y, x);
        self.data[offset] = value;
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed_shape() {
        let grid = FlatGrid::zeroed(Dims::new(3, 2)).unwrap();
        assert_eq!(grid.as_slice().len(), 6);
        assert!(grid.as_slice().iter().all(|&v| v == 0.0));
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
    }

    #[test]
    fn test_offset_layout() {
        let mut grid = FlatGrid::zeroed(Dims::new(3, 2)).unwrap();
        grid.set(1, 2, 7.0);
        assert_eq!(grid.as_slice()[5], 7.0);
        grid.as_mut_slice()[3] = 4.0;
        assert_eq!(grid.get(1, 0), 4.0);
    }

    #[test]
    fn test_checked_accessors_reject_row_spill() {
        let mut grid = FlatGrid::zeroed(Dims::new(3, 2)).unwrap();
        assert_eq!(grid.get_checked(0, 3), None);
        assert_eq!(grid.get_checked(2, 0), None);
        assert!(!grid.set_checked(0, 3, 1.0));
        assert!(grid.set_checked(1, 1, 1.0));
        assert_eq!(grid.get_checked(1, 1), Some(1.0));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_get_out_of_bounds_panics() {
        let grid = FlatGrid::zeroed(Dims::new(3, 2)).unwrap();
        let _ = grid.get(0, 3);
    }

    #[test]
    fn test_from_vec_size_check() {
        let err = FlatGrid::from_vec(vec![0.0; 5], Dims::new(3, 2)).unwrap_err();
        assert_eq!(
            err,
            GridError::BufferSize {
                expected: 6,
                actual: 5
            }
        );
        let grid = FlatGrid::from_vec(vec![1.0; 6], Dims::new(3, 2)).unwrap();
        assert_eq!(grid.into_vec(), vec![1.0; 6]);
    }
}
