//! Smoke tests for the `calc` fuzz target binary

#![allow(deprecated)] // Allow deprecated cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use covfuzz_rt::{CoverageLog, CoverageSet};
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Get a command for the calc binary
fn calc() -> Command {
    Command::cargo_bin("calc").expect("calc binary should exist")
}

/// Copy the binary into a private directory so its `.cov` file is ours alone
fn private_calc(dir: &TempDir) -> PathBuf {
    let src = assert_cmd::cargo::cargo_bin("calc");
    let dst = dir.path().join("calc");
    std::fs::copy(&src, &dst).expect("copy calc binary");
    dst
}

// ============================================================================
// Exit behaviour
// ============================================================================

#[test]
fn test_small_sum_exits_cleanly() {
    calc()
        .write_stdin("1+2\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_sum_at_threshold_exits_cleanly() {
    calc().write_stdin("500+500\n").assert().success();
}

#[test]
fn test_sum_over_threshold_crashes() {
    calc()
        .write_stdin("600+401\n")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Divide-by-zero detected at line "))
        .stdout(predicate::str::contains(" and col "));
}

#[test]
fn test_missing_operator_reports_sentinel_not_crash() {
    calc()
        .write_stdin("hello world\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_empty_stdin_exits_cleanly() {
    calc().write_stdin("").assert().success();
}

#[test]
fn test_only_first_line_is_read() {
    calc().write_stdin("1+1\n999+999\n").assert().success();
}

#[test]
fn test_crash_message_is_stable() {
    let first = calc().write_stdin("2000+0").output().unwrap();
    let second = calc().write_stdin("0+5000").output().unwrap();
    assert_eq!(first.stdout, second.stdout);
}

// ============================================================================
// Coverage log
// ============================================================================

#[test]
fn test_run_writes_coverage_next_to_binary() {
    let dir = TempDir::new().unwrap();
    let bin = private_calc(&dir);

    Command::new(&bin).write_stdin("1+2\n").assert().success();

    let cov_path = CoverageLog::path_for(&bin);
    assert_eq!(cov_path, dir.path().join("calc.cov"));
    let set = CoverageSet::load(&cov_path).unwrap();
    assert!(set.len() >= 3, "expected entry, branch and exit hits");
}

#[test]
fn test_each_run_resets_coverage() {
    let dir = TempDir::new().unwrap();
    let bin = private_calc(&dir);
    let cov_path = CoverageLog::path_for(&bin);

    Command::new(&bin).write_stdin("1+2\n").assert().success();
    let clean = CoverageSet::load(&cov_path).unwrap();

    Command::new(&bin).write_stdin("1+2\n").assert().success();
    let again = CoverageSet::load(&cov_path).unwrap();

    assert_eq!(clean, again);
}

#[test]
fn test_crash_path_reaches_new_locations() {
    let dir = TempDir::new().unwrap();
    let bin = private_calc(&dir);
    let cov_path = CoverageLog::path_for(&bin);

    Command::new(&bin).write_stdin("1+2\n").assert().success();
    let normal = CoverageSet::load(&cov_path).unwrap();

    Command::new(&bin).write_stdin("1000+1\n").assert().code(1);
    let crashing = CoverageSet::load(&cov_path).unwrap();

    assert!(!normal.new_locations(&crashing).is_empty());
}

#[test]
fn test_missing_operator_takes_other_branch() {
    let dir = TempDir::new().unwrap();
    let bin = private_calc(&dir);
    let cov_path = CoverageLog::path_for(&bin);

    Command::new(&bin).write_stdin("1+2\n").assert().success();
    let with_op = CoverageSet::load(&cov_path).unwrap();

    Command::new(&bin).write_stdin("12\n").assert().success();
    let without_op = CoverageSet::load(&cov_path).unwrap();

    assert_ne!(with_op.locations(), without_op.locations());
}
