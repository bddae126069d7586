// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end runs of the built binaries.

use gridbench_cli::matrix::BuildProfile;
use std::path::Path;
use std::process::{Command, Output};

fn run(exe: &str, args: &[&str]) -> Output {
    Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|err| panic!("failed to launch {exe}: {err}"))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const VARIANT_BINARIES: [&str; 5] = [
    env!("CARGO_BIN_EXE_gb-flat"),
    env!("CARGO_BIN_EXE_gb-rowptr"),
    env!("CARGO_BIN_EXE_gb-managed"),
    env!("CARGO_BIN_EXE_gb-multi"),
    env!("CARGO_BIN_EXE_gb-nested"),
];

#[test]
fn every_binary_prints_only_the_configuration_line() {
    for exe in VARIANT_BINARIES {
        let output = run(exe, &["5", "7", "3"]);
        assert!(output.status.success(), "{exe}");
        assert_eq!(
            stdout(&output),
            "Arrays have 3 rows of 7 columns, repeats = 5\n",
            "{exe}"
        );
    }
}

#[test]
fn sloppy_arguments_fall_back() {
    let output = run(env!("CARGO_BIN_EXE_gb-flat"), &["4x", "abc", "2"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Arrays have 2 rows of 2000 columns, repeats = 4\n"
    );
    // Fallbacks are logged on stderr, never stdout.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("abc"), "{stderr}");
}

#[test]
fn extra_arguments_are_ignored() {
    let output = run(env!("CARGO_BIN_EXE_gb-multi"), &["1", "2", "3", "4", "-5"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Arrays have 3 rows of 2 columns, repeats = 1\n"
    );
}

#[test]
fn zero_rows_run_clean() {
    let output = run(env!("CARGO_BIN_EXE_gb-rowptr"), &["3", "4", "0"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Arrays have 0 rows of 4 columns, repeats = 3\n"
    );
}

#[test]
fn zero_repeats_report_the_first_cell() {
    let output = run(env!("CARGO_BIN_EXE_gb-nested"), &["0", "3", "2"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Arrays have 2 rows of 3 columns, repeats = 0\n\
         Error Out[0][0] = 0.000000, not 5.000000\n"
    );
}

#[test]
fn multiplexer_runs_each_variant() {
    let exe = env!("CARGO_BIN_EXE_gridbench");
    for name in ["flat", "rowptr", "managed", "multi", "nested"] {
        let output = run(exe, &[name, "2", "6", "4"]);
        assert!(output.status.success(), "{name}");
        assert_eq!(
            stdout(&output),
            "Arrays have 4 rows of 6 columns, repeats = 2\n",
            "{name}"
        );
    }
}

#[test]
fn multiplexer_lists_everything() {
    let output = run(env!("CARGO_BIN_EXE_gridbench"), &["list"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for name in ["flat", "rowptr", "managed", "multi", "nested", "nested_iter", "opt2"] {
        assert!(text.contains(name), "{name} missing from:\n{text}");
    }
}

#[test]
#[cfg(not(any(feature = "bounds-check", feature = "unchecked")))]
fn default_build_runs_unchecked_flat_and_checked_multi() {
    let output = run(env!("CARGO_BIN_EXE_gridbench"), &["list"]);
    assert!(
        stdout(&output).contains("Default kernels: flat_unchecked, multi_checked\n"),
        "{}",
        stdout(&output)
    );
}

/// Target directory and profile the test binaries were built under.
fn test_build() -> Option<(&'static Path, BuildProfile)> {
    let dir = Path::new(env!("CARGO_BIN_EXE_gb-flat")).parent()?;
    let name = dir.file_name()?.to_str()?;
    let profile = BuildProfile::ALL
        .into_iter()
        .find(|p| p.rustflags().is_none() && p.output_dir() == name)?;
    Some((dir.parent()?, profile))
}

fn run_matrix(format: &str) -> Option<Output> {
    let (target_dir, profile) = test_build()?;
    let target_dir = target_dir.to_str()?;
    Some(run(
        env!("CARGO_BIN_EXE_gridbench"),
        &[
            "matrix",
            "--no-build",
            "--target-dir",
            target_dir,
            "--profile",
            profile.name(),
            "--columns",
            "8",
            "--rows",
            "2",
            "--format",
            format,
        ],
    ))
}

#[test]
fn matrix_times_each_binary_with_its_own_repeats() {
    // Built under a profile the matrix does not know: nothing to time.
    let Some(output) = run_matrix("json") else {
        return;
    };
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = value["rows"].as_array().unwrap();
    let names: Vec<_> = rows.iter().map(|row| row["variant"].as_str().unwrap()).collect();
    assert_eq!(names, ["flat", "rowptr", "managed", "multi", "nested"]);
    assert_eq!(rows[0]["repeats"], 1000);
    assert_eq!(rows[4]["repeats"], 100_000);
    for row in rows {
        let cells = row["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 1);
        assert!(cells[0]["failure"].is_null(), "{row}");
    }
}

#[test]
fn matrix_csv_has_a_row_per_representation() {
    let Some(output) = run_matrix("csv") else {
        return;
    };
    assert!(output.status.success());
    let (_, profile) = test_build().unwrap();
    let text = stdout(&output);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], format!("representation,{}", profile.name()));
    assert_eq!(lines.len(), 6);
    for (line, name) in lines[1..].iter().zip(["flat", "rowptr", "managed", "multi", "nested"]) {
        assert!(line.starts_with(&format!("{name},")), "{line}");
    }
}

#[test]
fn matrix_reports_missing_builds_per_cell() {
    let output = run(
        env!("CARGO_BIN_EXE_gridbench"),
        &[
            "matrix",
            "--no-build",
            "--target-dir",
            "/nonexistent/gridbench-target",
            "--only",
            "flat",
            "--format",
            "csv",
        ],
    );
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "representation,opt0,opt1,opt2,release\nflat,,,,\n"
    );
}

#[test]
fn compare_emits_csv_for_selected_modes() {
    let output = run(
        env!("CARGO_BIN_EXE_gridbench"),
        &[
            "compare",
            "--repeats",
            "3",
            "--passes",
            "1",
            "--columns",
            "16",
            "--rows",
            "4",
            "--format",
            "csv",
            "--only",
            "flat_checked",
            "--only",
            "nested_iter",
        ],
    );
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines[0], "mode,repeats,secs,kiter_secs,relative");
    assert!(lines[1].starts_with("flat_checked,3,"));
    assert!(lines[2].starts_with("nested_iter,3,"));
    assert_eq!(lines.len(), 3);
}

#[test]
fn compare_emits_json() {
    let output = run(
        env!("CARGO_BIN_EXE_gridbench"),
        &["compare", "-r", "2", "-p", "1", "-c", "8", "--rows", "2", "-f", "json"],
    );
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["repeats"], 2);
    assert_eq!(value["results"].as_array().map(Vec::len), Some(9));
    assert!(value["default_flat"].is_string());
    assert!(value["default_multi"].is_string());
}
