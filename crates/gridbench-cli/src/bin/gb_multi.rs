// SPDX-License-Identifier: MIT OR Apache-2.0
//! `gb-multi [repeat_count] [columns] [rows]`

use gridbench_cli::variant::Multi;

fn main() {
    gridbench_cli::variant_main::<Multi>();
}
