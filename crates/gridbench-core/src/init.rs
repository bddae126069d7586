// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deterministic input values and the per-cell transform formula.

use crate::grid::Grid2d;

/// Fill `input` with `In[y][x] = Nx - x + Ny - y`.
///
/// The values are small positive integers, exact in `f32` for any array that
/// fits in memory, so the expected output can be computed independently.
pub fn fill_input<G: Grid2d + ?Sized>(input: &mut G) {
    let dims = input.dims();
    for y in 0..dims.ny {
        for x in 0..dims.nx {
            input.set(y, x, input_cell(dims.nx, dims.ny, y, x));
        }
    }
}

/// The initial value of cell `(y, x)` in an `nx` by `ny` input.
#[inline]
#[must_use]
pub const fn input_cell(nx: usize, ny: usize, y: usize, x: usize) -> f32 {
    (nx - x + ny - y) as f32
}

/// The transform of one cell: `input + (x + y)`.
///
/// Every kernel and the validator use this exact expression, so results are
/// comparable bit for bit.
#[inline]
#[must_use]
pub const fn expected_cell(input: f32, y: usize, x: usize) -> f32 {
    input + (x + y) as f32
}
