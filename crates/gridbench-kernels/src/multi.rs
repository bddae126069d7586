// SPDX-License-Identifier: MIT OR Apache-2.0
//! Kernels over `ndarray::Array2<f32>`.
//!
//! `ndarray` checks every `[[y, x]]` index, which costs throughput. The
//! unchecked kernel trades that for `uget`, mirroring a library whose
//! assertions can be compiled out.

use gridbench_core::expected_cell;
use ndarray::Array2;

/// Default ndarray kernel: [`transform_checked`], or [`transform_unchecked`]
/// with the `unchecked` feature.
#[cfg(not(feature = "unchecked"))]
pub use self::transform_checked as transform;
/// Default ndarray kernel: [`transform_checked`], or [`transform_unchecked`]
/// with the `unchecked` feature.
#[cfg(feature = "unchecked")]
pub use self::transform_unchecked as transform;

/// Transform with bounds-checked `[[y, x]]` indexing.
///
/// # Panics
///
/// Panics if either array is smaller than `(ny, nx)`.
#[inline(never)]
pub fn transform_checked(input: &Array2<f32>, nx: usize, ny: usize, out: &mut Array2<f32>) {
    for iy in 0..ny {
        for ix in 0..nx {
            out[[iy, ix]] = expected_cell(input[[iy, ix]], iy, ix);
        }
    }
}

/// Transform with unchecked `uget` after one shape check on entry.
///
/// # Panics
///
/// Panics if either array is smaller than `(ny, nx)`.
#[inline(never)]
pub fn transform_unchecked(input: &Array2<f32>, nx: usize, ny: usize, out: &mut Array2<f32>) {
    let fits = |(rows, columns): (usize, usize)| rows >= ny && columns >= nx;
    assert!(
        fits(input.dim()) && fits(out.dim()),
        "arrays too small for {ny} rows of {nx} columns"
    );
    for iy in 0..ny {
        for ix in 0..nx {
            // SAFETY: iy < ny and ix < nx, and both arrays are at least
            // (ny, nx) (asserted above).
            unsafe {
                *out.uget_mut((iy, ix)) = expected_cell(*input.uget((iy, ix)), iy, ix);
            }
        }
    }
}
