// SPDX-License-Identifier: MIT OR Apache-2.0
//! Managed allocation of row tables.
//!
//! Setting up a row table by hand means computing one start offset per row.
//! [`row_table`] does the allocation and the setup in one call for any
//! element type, and [`ArrayManager`] adds a ledger of what it has handed
//! out so shapes and byte counts can be queried or listed later.
//!
//! Besides 2-D row tables the manager hands out 3-D volumes: one contiguous
//! block addressed as `volume[(z, y)][x]`.
//!
//! The ledger only describes arrays. Memory is owned by the returned
//! [`ManagedArray`] or [`ManagedVolume`] handle and freed when the handle is
//! dropped.

use crate::dims::Dims;
use crate::error::{GridError, Result};
use crate::grid::Grid2d;
use crate::repr::RowTable;
use log::debug;
use serde::Serialize;
use std::fmt;
use std::ops::{Deref, DerefMut, Index, IndexMut};

/// Allocate a default-filled `ny` by `nx` row table with its row starts set up.
///
/// The element size is that of `T`.
///
/// # Errors
///
/// Returns [`GridError::ShapeOverflow`] if the element or byte count overflows.
pub fn row_table<T: Copy + Default>(ny: usize, nx: usize) -> Result<RowTable<T>> {
    let dims = Dims::new(nx, ny);
    let len = dims.checked_len()?;
    if len.checked_mul(size_of::<T>()).is_none() {
        return Err(GridError::ShapeOverflow { rows: ny, columns: nx });
    }
    Ok(RowTable::contiguous(vec![T::default(); len], dims))
}

/// Identifier of an array handed out by an [`ArrayManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ArrayId(u64);

impl fmt::Display for ArrayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shape of a managed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayShape {
    /// `ny` rows of `nx` columns
    Plane(Dims),
    /// `planes` stacked planes of the same shape
    Volume {
        /// Plane count
        planes: usize,
        /// Shape of each plane
        dims: Dims,
    },
}

impl ArrayShape {
    /// Number of dimensions.
    #[must_use]
    pub const fn ndims(&self) -> usize {
        match self {
            Self::Plane(_) => 2,
            Self::Volume { .. } => 3,
        }
    }

    /// Extent of each dimension, outermost first.
    #[must_use]
    pub fn extents(&self) -> Vec<usize> {
        match *self {
            Self::Plane(dims) => vec![dims.ny, dims.nx],
            Self::Volume { planes, dims } => vec![planes, dims.ny, dims.nx],
        }
    }

    /// Total element count. Only meaningful for shapes the manager has
    /// allocated, whose counts are known not to overflow.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Plane(dims) => dims.len(),
            Self::Volume { planes, dims } => planes.wrapping_mul(dims.len()),
        }
    }

    /// Whether the shape holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ArrayShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plane(dims) => write!(f, "{} x {}", dims.ny, dims.nx),
            Self::Volume { planes, dims } => write!(f, "{planes} x {} x {}", dims.ny, dims.nx),
        }
    }
}

/// Ledger entry for one managed array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrayRecord {
    /// Identifier of the array
    pub id: ArrayId,
    /// Shape of the array
    pub shape: ArrayShape,
    /// Size of one element in bytes
    pub element_bytes: usize,
}

impl ArrayRecord {
    /// Number of dimensions.
    #[must_use]
    pub const fn ndims(&self) -> usize {
        self.shape.ndims()
    }

    /// Size of the data block in bytes.
    #[must_use]
    pub const fn bytes(&self) -> usize {
        self.shape.len() * self.element_bytes
    }
}

impl fmt::Display for ArrayRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-D array of {} bytes ({}, {}-byte elements) {}",
            self.ndims(),
            self.bytes(),
            self.shape,
            self.element_bytes,
            self.id
        )
    }
}

/// A handle the manager can take back.
pub trait ManagedHandle {
    /// Ledger id of the array.
    fn id(&self) -> ArrayId;
}

/// A row table handed out by an [`ArrayManager`].
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedArray<T> {
    id: ArrayId,
    table: RowTable<T>,
}

impl<T> ManagedArray<T> {
    /// Ledger id of this array.
    #[must_use]
    pub const fn id(&self) -> ArrayId {
        self.id
    }

    /// Drop the handle, keeping the table. The ledger entry is left alone.
    #[must_use]
    pub fn into_inner(self) -> RowTable<T> {
        self.table
    }
}

impl<T> ManagedHandle for ManagedArray<T> {
    fn id(&self) -> ArrayId {
        self.id
    }
}

impl<T> Deref for ManagedArray<T> {
    type Target = RowTable<T>;

    fn deref(&self) -> &RowTable<T> {
        &self.table
    }
}

impl<T> DerefMut for ManagedArray<T> {
    fn deref_mut(&mut self) -> &mut RowTable<T> {
        &mut self.table
    }
}

impl Grid2d for ManagedArray<f32> {
    #[inline]
    fn dims(&self) -> Dims {
        self.table.shape()
    }

    #[inline]
    fn get(&self, y: usize, x: usize) -> f32 {
        self.table[y][x]
    }

    #[inline]
    fn set(&mut self, y: usize, x: usize, value: f32) {
        self.table[y][x] = value;
    }
}

/// A 3-D array handed out by an [`ArrayManager`].
///
/// Stored as one row table of `planes * ny` rows; row `y` of plane `z` is
/// `volume[(z, y)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedVolume<T> {
    id: ArrayId,
    planes: usize,
    dims: Dims,
    table: RowTable<T>,
}

impl<T> ManagedVolume<T> {
    /// Ledger id of this volume.
    #[must_use]
    pub const fn id(&self) -> ArrayId {
        self.id
    }

    /// Number of planes.
    #[must_use]
    pub const fn planes(&self) -> usize {
        self.planes
    }

    /// Shape of every plane.
    #[must_use]
    pub const fn plane_dims(&self) -> Dims {
        self.dims
    }

    /// Rows of plane `z`, in order.
    ///
    /// # Panics
    ///
    /// Panics if `z >= self.planes()`.
    pub fn plane(&self, z: usize) -> impl Iterator<Item = &[T]> + '_ {
        assert!(z < self.planes, "plane {z} out of range for {} planes", self.planes);
        let ny = self.dims.ny;
        (z * ny..(z + 1) * ny).map(|row| self.table.row(row))
    }

    /// The whole block, plane after plane.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.table.as_slice()
    }

    fn row_index(&self, (z, y): (usize, usize)) -> usize {
        let ny = self.dims.ny;
        assert!(
            z < self.planes && y < ny,
            "row ({z}, {y}) out of range for {} planes of {ny} rows",
            self.planes
        );
        z * ny + y
    }
}

impl<T> ManagedHandle for ManagedVolume<T> {
    fn id(&self) -> ArrayId {
        self.id
    }
}

impl<T> Index<(usize, usize)> for ManagedVolume<T> {
    type Output = [T];

    fn index(&self, at: (usize, usize)) -> &[T] {
        self.table.row(self.row_index(at))
    }
}

impl<T> IndexMut<(usize, usize)> for ManagedVolume<T> {
    fn index_mut(&mut self, at: (usize, usize)) -> &mut [T] {
        let row = self.row_index(at);
        self.table.row_mut(row)
    }
}

/// Allocator with a ledger of live arrays.
#[derive(Debug, Default)]
pub struct ArrayManager {
    records: Vec<ArrayRecord>,
    next_id: u64,
}

impl ArrayManager {
    /// Create an empty manager.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 0,
        }
    }

    /// Allocate a `ny` by `nx` array of `T` and record it.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::ShapeOverflow`] if the shape is too large to address.
    pub fn alloc_2d<T: Copy + Default>(&mut self, ny: usize, nx: usize) -> Result<ManagedArray<T>> {
        let table = row_table::<T>(ny, nx)?;
        let id = self.register::<T>(ArrayShape::Plane(table.shape()));
        Ok(ManagedArray { id, table })
    }

    /// Allocate `planes` planes of `ny` by `nx` elements of `T` in one block
    /// and record it.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::VolumeOverflow`] if the shape is too large to
    /// address.
    pub fn alloc_3d<T: Copy + Default>(
        &mut self,
        planes: usize,
        ny: usize,
        nx: usize,
    ) -> Result<ManagedVolume<T>> {
        let overflow = GridError::VolumeOverflow {
            planes,
            rows: ny,
            columns: nx,
        };
        let rows = planes.checked_mul(ny).ok_or_else(|| overflow.clone())?;
        let table = row_table::<T>(rows, nx).map_err(|_| overflow)?;
        let dims = Dims::new(nx, ny);
        let id = self.register::<T>(ArrayShape::Volume { planes, dims });
        Ok(ManagedVolume {
            id,
            planes,
            dims,
            table,
        })
    }

    fn register<T>(&mut self, shape: ArrayShape) -> ArrayId {
        let id = ArrayId(self.next_id);
        self.next_id += 1;
        let record = ArrayRecord {
            id,
            shape,
            element_bytes: size_of::<T>(),
        };
        debug!("ArrayManager: allocated {record}");
        self.records.push(record);
        id
    }

    /// Free an array and forget its ledger entry.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownArray`] if the array was not handed out by
    /// this manager or was already released. The array is freed either way.
    pub fn release<A: ManagedHandle>(&mut self, array: A) -> Result<()> {
        let id = array.id();
        drop(array);
        let index = self.position(id)?;
        let record = self.records.remove(index);
        debug!("ArrayManager: released {record}");
        Ok(())
    }

    /// Ledger entry for `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownArray`] if `id` has no live entry.
    pub fn record(&self, id: ArrayId) -> Result<&ArrayRecord> {
        self.position(id).map(|index| &self.records[index])
    }

    /// Shape of the array `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownArray`] if `id` has no live entry.
    pub fn dimensions(&self, id: ArrayId) -> Result<ArrayShape> {
        self.record(id).map(|record| record.shape)
    }

    /// Element size of the array `id`.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::UnknownArray`] if `id` has no live entry.
    pub fn element_bytes(&self, id: ArrayId) -> Result<usize> {
        self.record(id).map(|record| record.element_bytes)
    }

    /// Live ledger entries in allocation order.
    pub fn list(&self) -> impl Iterator<Item = &ArrayRecord> + '_ {
        self.records.iter()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the ledger is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of the data block sizes of all live entries.
    #[must_use]
    pub fn total_bytes(&self) -> usize {
        self.records.iter().map(ArrayRecord::bytes).sum()
    }

    fn position(&self, id: ArrayId) -> Result<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(GridError::UnknownArray(id))
    }
}
