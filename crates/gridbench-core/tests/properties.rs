// SPDX-License-Identifier: MIT OR Apache-2.0
// Tests: clippy lints relaxed for test code
#![allow(clippy::float_cmp, clippy::unwrap_used)]
//! Property tests for initialisation and row-table construction.

use gridbench_core::{
    ArrayManager, Dims, FlatGrid, Grid2d, GridError, RowTable, fill_input, find_mismatch,
    repr::{zeroed_multi, zeroed_nested},
};
use proptest::prelude::*;

fn dims_strategy() -> impl Strategy<Value = Dims> {
    (1usize..48, 1usize..24).prop_map(|(nx, ny)| Dims::new(nx, ny))
}

proptest! {
    #[test]
    fn fill_input_matches_formula(dims in dims_strategy()) {
        let mut grid = FlatGrid::zeroed(dims).unwrap();
        fill_input(&mut grid);
        for y in 0..dims.ny {
            for x in 0..dims.nx {
                let expected = (dims.nx - x + dims.ny - y) as f32;
                prop_assert_eq!(grid.get(y, x), expected);
            }
        }
    }

    #[test]
    fn every_representation_initialises_identically(dims in dims_strategy()) {
        let mut flat = FlatGrid::zeroed(dims).unwrap();
        let mut nested = zeroed_nested(dims).unwrap();
        let mut multi = zeroed_multi(dims).unwrap();
        let mut manager = ArrayManager::new();
        let mut managed = manager.alloc_2d::<f32>(dims.ny, dims.nx).unwrap();
        fill_input(&mut flat);
        fill_input(&mut nested);
        fill_input(&mut multi);
        fill_input(&mut managed);
        let reference = flat.to_nested();
        prop_assert_eq!(&nested, &reference);
        prop_assert_eq!(&multi.to_nested(), &reference);
        prop_assert_eq!(&managed.to_nested(), &reference);
    }

    #[test]
    fn identity_output_fails_just_past_origin(dims in dims_strategy()) {
        // Out == In is correct only where x + y == 0, so the first mismatch
        // must be (0, 1) or, for a single column, (1, 0).
        let mut input = FlatGrid::zeroed(dims).unwrap();
        fill_input(&mut input);
        let output = input.clone();
        let mismatch = find_mismatch(&input, &output);
        match (dims.nx, dims.ny) {
            (1, 1) => prop_assert!(mismatch.is_none()),
            (1, _) => prop_assert_eq!(mismatch.map(|m| (m.row, m.column)), Some((1, 0))),
            _ => prop_assert_eq!(mismatch.map(|m| (m.row, m.column)), Some((0, 1))),
        }
    }

    #[test]
    fn raw_row_table_never_panics(
        nx in 0usize..6,
        starts in proptest::collection::vec(0usize..40, 0..8),
    ) {
        let len = nx * starts.len();
        match RowTable::from_raw_parts(vec![0u8; len], starts.clone(), nx) {
            Ok(table) => {
                // Accepted tables expose every row in full.
                for y in 0..starts.len() {
                    prop_assert_eq!(table[y].len(), nx);
                }
            }
            Err(
                GridError::RowOutOfBounds { .. }
                | GridError::RowOverlap { .. }
                | GridError::BufferSize { .. },
            ) => {}
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    }

    #[test]
    fn row_major_starts_are_always_accepted(dims in dims_strategy()) {
        let starts: Vec<usize> = (0..dims.ny).map(|y| y * dims.nx).collect();
        let table = RowTable::from_raw_parts(vec![0.0f32; dims.len()], starts, dims.nx).unwrap();
        prop_assert_eq!(table.shape(), dims);
    }
}
