// SPDX-License-Identifier: MIT OR Apache-2.0
//! Binding of each representation to its allocator and kernel.

use crate::args::{DEFAULT_REPEATS, Defaults, NESTED_DEFAULT_REPEATS};
use clap::ValueEnum;
use gridbench_core::repr::{zeroed_multi, zeroed_nested};
use gridbench_core::{
    ArrayManager, Dims, FlatGrid, Grid2d, ManagedArray, MultiGrid, NestedGrid, Result, RowTable,
};
use gridbench_kernels::{flat, multi, nested, rowptr};
use log::debug;
use serde::Serialize;

/// A transform entry point: `(input, nx, ny, output)`.
pub type Kernel<G> = fn(&G, usize, usize, &mut G);

/// One benchmarked representation.
pub trait Variant {
    /// The array type both input and output use.
    type Grid: Grid2d;

    /// Short name, also the subcommand name.
    const NAME: &'static str;

    /// Repeat count when none is given.
    const DEFAULT_REPEATS: usize = DEFAULT_REPEATS;

    /// Allocate one zero-filled array.
    ///
    /// # Errors
    ///
    /// Fails if the shape cannot be addressed.
    fn allocate(&mut self, dims: Dims) -> Result<Self::Grid>;

    /// The default kernel for this representation.
    fn transform(input: &Self::Grid, nx: usize, ny: usize, out: &mut Self::Grid);

    /// Give back an array this variant allocated.
    fn recycle(&mut self, grid: Self::Grid) {
        drop(grid);
    }

    /// Human-readable description of the live allocations.
    fn allocations(&self) -> Vec<String> {
        Vec::new()
    }

    /// Argument defaults for this variant.
    #[must_use]
    fn defaults() -> Defaults {
        Defaults::with_repeats(Self::DEFAULT_REPEATS)
    }
}

/// Flat buffer, offsets computed by the kernel.
#[derive(Debug, Default)]
pub struct Flat;

impl Variant for Flat {
    type Grid = FlatGrid;
    const NAME: &'static str = "flat";

    fn allocate(&mut self, dims: Dims) -> Result<FlatGrid> {
        FlatGrid::zeroed(dims)
    }

    fn transform(input: &FlatGrid, nx: usize, ny: usize, out: &mut FlatGrid) {
        flat::transform(input.as_slice(), nx, ny, out.as_mut_slice());
    }
}

/// Row table whose row starts are computed by hand.
#[derive(Debug, Default)]
pub struct RowPtr;

impl Variant for RowPtr {
    type Grid = RowTable<f32>;
    const NAME: &'static str = "rowptr";

    fn allocate(&mut self, dims: Dims) -> Result<RowTable<f32>> {
        let data = vec![0.0f32; dims.checked_len()?];
        let row_starts = (0..dims.ny).map(|y| y * dims.nx).collect();
        RowTable::from_raw_parts(data, row_starts, dims.nx)
    }

    fn transform(input: &RowTable<f32>, nx: usize, ny: usize, out: &mut RowTable<f32>) {
        rowptr::transform(input, nx, ny, out);
    }
}

/// Row table built by an [`ArrayManager`].
#[derive(Debug, Default)]
pub struct Managed {
    manager: ArrayManager,
}

impl Variant for Managed {
    type Grid = ManagedArray<f32>;
    const NAME: &'static str = "managed";

    fn allocate(&mut self, dims: Dims) -> Result<ManagedArray<f32>> {
        self.manager.alloc_2d(dims.ny, dims.nx)
    }

    fn transform(input: &ManagedArray<f32>, nx: usize, ny: usize, out: &mut ManagedArray<f32>) {
        rowptr::transform(input, nx, ny, out);
    }

    fn recycle(&mut self, grid: ManagedArray<f32>) {
        let id = grid.id();
        if let Err(err) = self.manager.release(grid) {
            debug!("managed: release of {id} failed: {err}");
        }
    }

    fn allocations(&self) -> Vec<String> {
        self.manager.list().map(ToString::to_string).collect()
    }
}

/// `ndarray::Array2<f32>`.
#[derive(Debug, Default)]
pub struct Multi;

impl Variant for Multi {
    type Grid = MultiGrid;
    const NAME: &'static str = "multi";

    fn allocate(&mut self, dims: Dims) -> Result<MultiGrid> {
        zeroed_multi(dims)
    }

    fn transform(input: &MultiGrid, nx: usize, ny: usize, out: &mut MultiGrid) {
        multi::transform(input, nx, ny, out);
    }
}

/// `Vec<Vec<f32>>`, one allocation per row.
#[derive(Debug, Default)]
pub struct Nested;

impl Variant for Nested {
    type Grid = NestedGrid;
    const NAME: &'static str = "nested";
    const DEFAULT_REPEATS: usize = NESTED_DEFAULT_REPEATS;

    fn allocate(&mut self, dims: Dims) -> Result<NestedGrid> {
        zeroed_nested(dims)
    }

    fn transform(input: &NestedGrid, nx: usize, ny: usize, out: &mut NestedGrid) {
        nested::transform(input, nx, ny, out);
    }
}

/// The variants by name, for dispatch and listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    /// Flat buffer with manual offsets
    Flat,
    /// Hand-built row table
    Rowptr,
    /// Manager-built row table
    Managed,
    /// ndarray
    Multi,
    /// Vector of vectors
    Nested,
}

impl VariantKind {
    /// Every variant in listing order.
    pub const ALL: [Self; 5] = [
        Self::Flat,
        Self::Rowptr,
        Self::Managed,
        Self::Multi,
        Self::Nested,
    ];

    /// Short name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Flat => Flat::NAME,
            Self::Rowptr => RowPtr::NAME,
            Self::Managed => Managed::NAME,
            Self::Multi => Multi::NAME,
            Self::Nested => Nested::NAME,
        }
    }

    /// Argument defaults.
    #[must_use]
    pub fn defaults(self) -> Defaults {
        match self {
            Self::Flat => Flat::defaults(),
            Self::Rowptr => RowPtr::defaults(),
            Self::Managed => Managed::defaults(),
            Self::Multi => Multi::defaults(),
            Self::Nested => Nested::defaults(),
        }
    }

    /// One-line description of the representation.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Flat => "flat buffer, kernel computes y * nx + x",
            Self::Rowptr => "contiguous buffer + hand-built row start table, a[y][x]",
            Self::Managed => "contiguous buffer + manager-built row start table, a[y][x]",
            Self::Multi => "ndarray::Array2<f32>, a[[y, x]]",
            Self::Nested => "Vec<Vec<f32>>, one allocation per row, a[y][x]",
        }
    }
}
