#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for kernel agreement
//!
//! Tests:
//! - Flat, ndarray and nested kernels on arbitrary small shapes
//! - Checked and unchecked forms produce identical bits

use gridbench_core::repr::{zeroed_multi, zeroed_nested};
use gridbench_core::{Dims, FlatGrid, Grid2d, fill_input, find_mismatch};
use gridbench_kernels::{flat, multi, nested};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let [nx, ny, ..] = data else {
        return;
    };
    let dims = Dims::new(usize::from(*nx), usize::from(*ny));

    let (Ok(mut flat_in), Ok(mut flat_out)) = (FlatGrid::zeroed(dims), FlatGrid::zeroed(dims))
    else {
        return;
    };
    fill_input(&mut flat_in);
    flat::transform_checked(flat_in.as_slice(), dims.nx, dims.ny, flat_out.as_mut_slice());
    assert!(find_mismatch(&flat_in, &flat_out).is_none());
    let reference = flat_out.to_nested();

    let Ok(mut unchecked) = FlatGrid::zeroed(dims) else {
        return;
    };
    flat::transform_unchecked(flat_in.as_slice(), dims.nx, dims.ny, unchecked.as_mut_slice());
    assert_eq!(unchecked.as_slice(), flat_out.as_slice());

    let (Ok(mut multi_in), Ok(mut multi_out)) = (zeroed_multi(dims), zeroed_multi(dims)) else {
        return;
    };
    fill_input(&mut multi_in);
    multi::transform_unchecked(&multi_in, dims.nx, dims.ny, &mut multi_out);
    assert_eq!(multi_out.to_nested(), reference);

    let (Ok(mut nested_in), Ok(mut nested_out)) = (zeroed_nested(dims), zeroed_nested(dims))
    else {
        return;
    };
    fill_input(&mut nested_in);
    nested::transform_iter(&nested_in, dims.nx, dims.ny, &mut nested_out);
    assert_eq!(nested_out, reference);
});
