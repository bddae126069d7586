// SPDX-License-Identifier: MIT OR Apache-2.0
//! Kernel over a row table. Used by both the hand-built and managed variants.

use gridbench_core::{RowTable, expected_cell};

/// Transform with `out[y][x] = input[y][x] + x + y` through the row table.
///
/// # Panics
///
/// Panics if either table has fewer than `ny` rows or `nx` columns.
#[inline(never)]
#[allow(clippy::needless_range_loop)]
pub fn transform(input: &RowTable<f32>, nx: usize, ny: usize, out: &mut RowTable<f32>) {
    for iy in 0..ny {
        for ix in 0..nx {
            out[iy][ix] = expected_cell(input[iy][ix], iy, ix);
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use gridbench_core::{fill_input, row_table};

    #[test]
    fn test_three_by_two() {
        let mut input = row_table::<f32>(2, 3).unwrap();
        let mut out = row_table::<f32>(2, 3).unwrap();
        fill_input(&mut input);
        transform(&input, 3, 2, &mut out);
        assert_eq!(out.as_slice(), &[5.0; 6]);
    }

    #[test]
    fn test_permuted_rows_follow_logical_order() {
        let input = RowTable::from_raw_parts(vec![1.0f32, 1.0, 2.0, 2.0], vec![2, 0], 2).unwrap();
        let mut out = RowTable::from_raw_parts(vec![0.0f32; 4], vec![0, 2], 2).unwrap();
        transform(&input, 2, 2, &mut out);
        // input row 0 is [2, 2], row 1 is [1, 1]
        assert_eq!(&out[0], &[2.0, 3.0]);
        assert_eq!(&out[1], &[2.0, 3.0]);
    }
}
