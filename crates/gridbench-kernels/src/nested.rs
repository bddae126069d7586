// SPDX-License-Identifier: MIT OR Apache-2.0
//! Kernels over a vector of row vectors.

use gridbench_core::expected_cell;

/// Transform with `out[y][x]` indexing; both index levels are checked.
///
/// # Panics
///
/// Panics if either array has fewer than `ny` rows or `nx` columns.
#[inline(never)]
#[allow(clippy::needless_range_loop)]
pub fn transform(input: &[Vec<f32>], nx: usize, ny: usize, out: &mut [Vec<f32>]) {
    for iy in 0..ny {
        for ix in 0..nx {
            out[iy][ix] = expected_cell(input[iy][ix], iy, ix);
        }
    }
}

/// Transform by zipping row iterators. The shape comes from the vectors
/// themselves; `_nx` and `_ny` keep the call signature uniform.
///
/// Rows or columns present in only one of the arrays are skipped.
#[inline(never)]
pub fn transform_iter(input: &[Vec<f32>], _nx: usize, _ny: usize, out: &mut [Vec<f32>]) {
    for (iy, (src, dst)) in input.iter().zip(out.iter_mut()).enumerate() {
        for (ix, (value, cell)) in src.iter().zip(dst.iter_mut()).enumerate() {
            *cell = expected_cell(*value, iy, ix);
        }
    }
}

/// Transform with `get_unchecked` after checking every row length on entry.
///
/// # Panics
///
/// Panics if either array has fewer than `ny` rows, or any of the first `ny`
/// rows has fewer than `nx` columns.
#[inline(never)]
pub fn transform_unchecked(input: &[Vec<f32>], nx: usize, ny: usize, out: &mut [Vec<f32>]) {
    let fits = |rows: &[Vec<f32>]| rows.len() >= ny && rows[..ny].iter().all(|row| row.len() >= nx);
    assert!(
        fits(input) && fits(out),
        "nested arrays too small for {ny} rows of {nx} columns"
    );
    for iy in 0..ny {
        // SAFETY: iy < ny <= len of both outer vectors (asserted above).
        let (src, dst) = unsafe { (input.get_unchecked(iy), out.get_unchecked_mut(iy)) };
        for ix in 0..nx {
            // SAFETY: ix < nx <= len of both rows (asserted above).
            unsafe {
                *dst.get_unchecked_mut(ix) = expected_cell(*src.get_unchecked(ix), iy, ix);
            }
        }
    }
}
