// SPDX-License-Identifier: MIT OR Apache-2.0
//! `gb-rowptr [repeat_count] [columns] [rows]`

use gridbench_cli::variant::RowPtr;

fn main() {
    gridbench_cli::variant_main::<RowPtr>();
}
