// SPDX-License-Identifier: MIT OR Apache-2.0
//! `gb-nested [repeat_count] [columns] [rows]`

use gridbench_cli::variant::Nested;

fn main() {
    gridbench_cli::variant_main::<Nested>();
}
