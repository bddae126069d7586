// SPDX-License-Identifier: MIT OR Apache-2.0
//! Contiguous buffer addressed through a table of row starts.
//!
//! This is the safe counterpart of an array of row pointers: the buffer is
//! owned once, and each row is located by a start *offset* computed when the
//! table is built. Indexing yields a row slice, so `a[y][x]` reads naturally
//! and the column index is still checked against the row length.
//!
//! Building the table by hand ([`RowTable::from_raw_parts`]) is where setup
//! mistakes happen, so the raw constructor validates what it is given. The
//! managed path in [`crate::manager`] builds the table itself.

use crate::dims::Dims;
use crate::error::{GridError, Result};
use crate::grid::Grid2d;
use std::ops::{Index, IndexMut};

/// Owned row-major buffer plus derived row start offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct RowTable<T> {
    data: Vec<T>,
    row_starts: Vec<usize>,
    dims: Dims,
}

impl<T> RowTable<T> {
    /// Assemble a table from a buffer and caller-computed row starts.
    ///
    /// The row count is `row_starts.len()`. Rows may appear in any order
    /// inside `data`, but each must lie fully inside it and no two may
    /// overlap; together they must cover the buffer exactly.
    ///
    /// # Errors
    ///
    /// - [`GridError::BufferSize`] if `data.len() != nx * row_starts.len()`
    /// - [`GridError::RowOutOfBounds`] if a row runs past the buffer
    /// - [`GridError::RowOverlap`] if two rows share elements
    pub fn from_raw_parts(data: Vec<T>, row_starts: Vec<usize>, nx: usize) -> Result<Self> {
        let dims = Dims::new(nx, row_starts.len());
        let expected = dims.checked_len()?;
        if data.len() != expected {
            return Err(GridError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        validate_row_starts(&row_starts, nx, data.len())?;
        Ok(Self {
            data,
            row_starts,
            dims,
        })
    }

    /// Build a table whose starts are known to be `y * nx`.
    pub(crate) fn contiguous(data: Vec<T>, dims: Dims) -> Self {
        let row_starts = (0..dims.ny).map(|y| y * dims.nx).collect();
        Self {
            data,
            row_starts,
            dims,
        }
    }

    /// Shape of the table.
    #[inline]
    #[must_use]
    pub const fn shape(&self) -> Dims {
        self.dims
    }

    /// Row `y` as a slice of `nx` elements.
    ///
    /// # Panics
    ///
    /// Panics if `y >= ny`.
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[T] {
        let start = self.row_starts[y];
        &self.data[start..start + self.dims.nx]
    }

    /// Row `y` as a mutable slice of `nx` elements.
    ///
    /// # Panics
    ///
    /// Panics if `y >= ny`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = self.row_starts[y];
        &mut self.data[start..start + self.dims.nx]
    }

    /// Rows in logical order.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.dims.ny).map(move |y| self.row(y))
    }

    /// The derived row start offsets.
    #[inline]
    #[must_use]
    pub fn row_starts(&self) -> &[usize] {
        &self.row_starts
    }

    /// The base contiguous block, in storage order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Size of one element in bytes.
    #[inline]
    #[must_use]
    pub const fn element_bytes(&self) -> usize {
        size_of::<T>()
    }

    /// Size of the data block in bytes (the row table itself excluded).
    #[inline]
    #[must_use]
    pub fn data_bytes(&self) -> usize {
        self.data.len() * size_of::<T>()
    }
}

fn validate_row_starts(row_starts: &[usize], nx: usize, len: usize) -> Result<()> {
    for (row, &start) in row_starts.iter().enumerate() {
        if start.checked_add(nx).is_none_or(|end| end > len) {
            return Err(GridError::RowOutOfBounds { row, start, len });
        }
    }
    if nx == 0 {
        return Ok(());
    }
    let mut order: Vec<usize> = (0..row_starts.len()).collect();
    order.sort_unstable_by_key(|&row| row_starts[row]);
    for pair in order.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if row_starts[prev] + nx > row_starts[next] {
            let (row, other) = if prev > next { (prev, next) } else { (next, prev) };
            return Err(GridError::RowOverlap { row, other });
        }
    }
    Ok(())
}

impl<T> Index<usize> for RowTable<T> {
    type Output = [T];

    #[inline]
    fn index(&self, y: usize) -> &[T] {
        self.row(y)
    }
}

impl<T> IndexMut<usize> for RowTable<T> {
    #[inline]
    fn index_mut(&mut self, y: usize) -> &mut [T] {
        self.row_mut(y)
    }
}

impl Grid2d for RowTable<f32> {
    #[inline]
    fn dims(&self) -> Dims {
        self.dims
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

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn starts(nx: usize, ny: usize) -> Vec<usize> {
        (0..ny).map(|y| y * nx).collect()
    }

    #[test]
    fn test_raw_parts_row_major() {
        let data: Vec<f32> = (0..6).map(|v| v as f32).collect();
        let table = RowTable::from_raw_parts(data, starts(3, 2), 3).unwrap();
        assert_eq!(table.shape(), Dims::new(3, 2));
        assert_eq!(&table[0], &[0.0, 1.0, 2.0]);
        assert_eq!(&table[1], &[3.0, 4.0, 5.0]);
        assert_eq!(table[1][2], 5.0);
    }

    #[test]
    fn test_index_mut_writes_through_to_block() {
        let mut table = RowTable::from_raw_parts(vec![0.0f32; 6], starts(3, 2), 3).unwrap();
        table[1][0] = 9.0;
        assert_eq!(table.as_slice()[3], 9.0);
    }

    #[test]
    fn test_permuted_rows_are_valid() {
        let data: Vec<f32> = (0..6).map(|v| v as f32).collect();
        let table = RowTable::from_raw_parts(data, vec![3, 0], 3).unwrap();
        assert_eq!(table[0][0], 3.0);
        assert_eq!(table[1][0], 0.0);
    }

    #[test]
    fn test_buffer_size_mismatch() {
        let err = RowTable::from_raw_parts(vec![0.0f32; 5], starts(3, 2), 3).unwrap_err();
        assert_eq!(
            err,
            GridError::BufferSize {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn test_row_past_end() {
        let err = RowTable::from_raw_parts(vec![0.0f32; 6], vec![0, 4], 3).unwrap_err();
        assert_eq!(
            err,
            GridError::RowOutOfBounds {
                row: 1,
                start: 4,
                len: 6
            }
        );
    }

    #[test]
    fn test_overlapping_rows() {
        // Classic setup slip: stepping by one element instead of one row.
        let err = RowTable::from_raw_parts(vec![0.0f32; 9], vec![0, 1, 2], 3).unwrap_err();
        assert_eq!(err, GridError::RowOverlap { row: 1, other: 0 });
    }

    #[test]
    fn test_duplicate_row_start() {
        let err = RowTable::from_raw_parts(vec![0u8; 4], vec![2, 2], 2).unwrap_err();
        assert_eq!(err, GridError::RowOverlap { row: 1, other: 0 });
    }

    #[test]
    fn test_zero_columns() {
        let table = RowTable::<f32>::from_raw_parts(Vec::new(), vec![0, 0, 0], 0).unwrap();
        assert_eq!(table.shape(), Dims::new(0, 3));
        assert!(table[2].is_empty());
    }

    #[test]
    fn test_byte_sizes() {
        let table = RowTable::contiguous(vec![0u16; 12], Dims::new(4, 3));
        assert_eq!(table.element_bytes(), 2);
        assert_eq!(table.data_bytes(), 24);
        assert_eq!(table.row_starts(), &[0, 4, 8]);
        assert_eq!(table.rows_iter().count(), 3);
    }
}
