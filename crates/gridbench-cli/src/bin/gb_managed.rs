// SPDX-License-Identifier: MIT OR Apache-2.0
//! `gb-managed [repeat_count] [columns] [rows]`

use gridbench_cli::variant::Managed;

fn main() {
    gridbench_cli::variant_main::<Managed>();
}
