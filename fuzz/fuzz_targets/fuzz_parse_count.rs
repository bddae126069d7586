#![no_main]
// SPDX-License-Identifier: MIT OR Apache-2.0
//! libFuzzer target for positional argument conversion
//!
//! Tests:
//! - parse_count on arbitrary input
//! - RunConfig resolution on arbitrary argument lists
//! - No panics on malformed numbers

use gridbench_cli::args::{Defaults, RunConfig, parse_count};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 {
        return;
    }

    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // === Contract: a clean integer parses to itself ===
    if let Ok(clean) = input.parse::<usize>() {
        assert_eq!(parse_count(input), Some(clean));
    }

    // === Contract: any result is spelled by the leading digits ===
    if parse_count(input).is_some() {
        let trimmed = input.trim_start();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        assert!(digits.starts_with(|c: char| c.is_ascii_digit()));
    }

    // === Test: resolution never panics, whatever the split ===
    let args: Vec<&str> = input.split(' ').collect();
    let defaults = Defaults::default();
    let config = RunConfig::from_args(&args, defaults);
    if args.len() < 3 {
        assert_eq!(config.ny, defaults.ny);
    }
});
