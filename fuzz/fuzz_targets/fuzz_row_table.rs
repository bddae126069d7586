#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for row table validation
//!
//! Tests:
//! - from_raw_parts on arbitrary row start tables
//! - Every accepted table can be read row by row and transformed
//! - No panics on rejected tables

use gridbench_core::{Dims, RowTable, fill_input, find_mismatch, row_table};
use gridbench_kernels::rowptr;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte: columns, second: scale row starts by nx if even, rest: row starts
    let [nx, mode, starts @ ..] = data else {
        return;
    };
    if starts.len() > 64 {
        return;
    }

    let nx = usize::from(*nx % 16);
    let scale = if mode % 2 == 0 { nx } else { 1 };
    let row_starts: Vec<usize> = starts.iter().map(|&s| usize::from(s) * scale).collect();
    let ny = row_starts.len();
    let len = nx * ny;

    let Ok(mut input) = RowTable::from_raw_parts(vec![0.0f32; len], row_starts, nx) else {
        return;
    };

    // === Contract: every row is in bounds and nx long ===
    assert_eq!(input.shape(), Dims::new(nx, ny));
    for row in input.rows_iter() {
        assert_eq!(row.len(), nx);
    }

    // === Contract: rows are disjoint, so the transform validates ===
    fill_input(&mut input);
    let Ok(mut output) = row_table::<f32>(ny, nx) else {
        return;
    };
    rowptr::transform(&input, nx, ny, &mut output);
    assert!(find_mismatch(&input, &output).is_none());
});
