// SPDX-License-Identifier: MIT OR Apache-2.0
//! The access contract every representation satisfies.
//!
//! A [`Grid2d`] is a fixed-shape array of `f32` addressed by logical row `y`
//! and column `x`. Representations differ in how they map `(y, x)` to memory,
//! not in what the mapping means, so initialisation and validation are written
//! once against this trait. Kernels never go through it; each addresses its
//! own representation directly.

use crate::dims::Dims;

/// Fixed-shape 2D array of `f32` with `[row][column]` access.
pub trait Grid2d {
    /// Shape of the array. Never changes after construction.
    fn dims(&self) -> Dims;

    /// Read element `(y, x)`.
    ///
    /// # Panics
    ///
    /// Implementations panic when `(y, x)` is outside [`Self::dims`].
    fn get(&self, y: usize, x: usize) -> f32;

    /// Write element `(y, x)`.
    ///
    /// # Panics
    ///
    /// Implementations panic when `(y, x)` is outside [`Self::dims`].
    fn set(&mut self, y: usize, x: usize, value: f32);

    /// Number of rows.
    fn rows(&self) -> usize {
        self.dims().ny
    }

    /// Number of columns.
    fn columns(&self) -> usize {
        self.dims().nx
    }

    /// Copy the contents out as one `Vec` per row.
    fn to_nested(&self) -> Vec<Vec<f32>> {
        let dims = self.dims();
        (0..dims.ny)
            .map(|y| (0..dims.nx).map(|x| self.get(y, x)).collect())
            .collect()
    }
}
