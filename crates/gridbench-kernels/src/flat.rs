// SPDX-License-Identifier: MIT OR Apache-2.0
//! Kernels over a flat row-major buffer with caller-side offset arithmetic.

use gridbench_core::expected_cell;

/// Default flat kernel: [`transform_unchecked`], or [`transform_checked`]
/// with the `bounds-check` feature.
#[cfg(not(feature = "bounds-check"))]
pub use self::transform_unchecked as transform;
/// Default flat kernel: [`transform_unchecked`], or [`transform_checked`]
/// with the `bounds-check` feature.
#[cfg(feature = "bounds-check")]
pub use self::transform_checked as transform;

/// Transform with slice indexing; every access is bounds-checked.
///
/// # Panics
///
/// Panics if either slice holds fewer than `nx * ny` elements.
#[inline(never)]
pub fn transform_checked(input: &[f32], nx: usize, ny: usize, out: &mut [f32]) {
    for iy in 0..ny {
        for ix in 0..nx {
            out[iy * nx + ix] = expected_cell(input[iy * nx + ix], iy, ix);
        }
    }
}

/// Transform with raw pointer offsets after one length check on entry.
///
/// # Panics
///
/// Panics if either slice holds fewer than `nx * ny` elements.
#[inline(never)]
pub fn transform_unchecked(input: &[f32], nx: usize, ny: usize, out: &mut [f32]) {
    assert!(
        nx.checked_mul(ny)
            .is_some_and(|len| input.len() >= len && out.len() >= len),
        "flat buffers too small for {ny} rows of {nx} columns"
    );
    let src = input.as_ptr();
    let dst = out.as_mut_ptr();
    for iy in 0..ny {
        let row = iy * nx;
        for ix in 0..nx {
            // SAFETY: row + ix < nx * ny, and both slices hold at least
            // nx * ny elements (asserted above).
            unsafe {
                *dst.add(row + ix) = expected_cell(*src.add(row + ix), iy, ix);
            }
        }
    }
}
