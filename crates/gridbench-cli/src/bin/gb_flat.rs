// SPDX-License-Identifier: MIT OR Apache-2.0
//! `gb-flat [repeat_count] [columns] [rows]`

use gridbench_cli::variant::Flat;

fn main() {
    gridbench_cli::variant_main::<Flat>();
}
