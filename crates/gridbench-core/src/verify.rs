// SPDX-License-Identifier: MIT OR Apache-2.0
//! Post-transform validation.

use crate::dims::Dims;
use crate::error::{GridError, Result};
use crate::grid::Grid2d;
use crate::init::expected_cell;
use serde::Serialize;
use std::fmt;

/// First cell whose output disagrees with the transform of its input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mismatch {
    /// Row index
    pub row: usize,
    /// Column index
    pub column: usize,
    /// Value found in the output
    pub actual: f32,
    /// Value the transform should have produced
    pub expected: f32,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error Out[{}][{}] = {:.6}, not {:.6}",
            self.row, self.column, self.actual, self.expected
        )
    }
}

/// Ensure `input` and `output` have the same shape.
///
/// # Errors
///
/// Returns [`GridError::ShapeMismatch`] when they differ.
pub fn check_same_shape<I, O>(input: &I, output: &O) -> Result<Dims>
where
    I: Grid2d + ?Sized,
    O: Grid2d + ?Sized,
{
    let (input, output) = (input.dims(), output.dims());
    if input == output {
        Ok(input)
    } else {
        Err(GridError::ShapeMismatch { input, output })
    }
}

/// Scan `output` row by row and return the first cell that is not
/// `input[y][x] + x + y`.
///
/// The comparison is exact; a NaN in the output is always a mismatch.
///
/// # Panics
///
/// Panics if `output` is smaller than `input`; call [`check_same_shape`]
/// first when that is not already guaranteed.
#[allow(clippy::float_cmp)]
pub fn find_mismatch<I, O>(input: &I, output: &O) -> Option<Mismatch>
where
    I: Grid2d + ?Sized,
    O: Grid2d + ?Sized,
{
    let dims = input.dims();
    for y in 0..dims.ny {
        for x in 0..dims.nx {
            let actual = output.get(y, x);
            let expected = expected_cell(input.get(y, x), y, x);
            if actual != expected {
                return Some(Mismatch {
                    row: y,
                    column: x,
                    actual,
                    expected,
                });
            }
        }
    }
    None
}
