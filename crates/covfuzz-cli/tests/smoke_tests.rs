//! Smoke tests for the covfuzz CLI

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the covfuzz binary
fn covfuzz() -> Command {
    Command::cargo_bin("covfuzz").expect("covfuzz binary should exist")
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    covfuzz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    covfuzz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("fuzz"))
        .stdout(predicate::str::contains("score"));
}

#[test]
fn test_no_args_fails() {
    covfuzz().assert().failure();
}

#[test]
fn test_fuzz_help_mentions_passing_inputs() {
    covfuzz()
        .args(["fuzz", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--store-passing-input"));
}

#[test]
fn test_fuzz_missing_target_reports_error() {
    let dir = TempDir::new().unwrap();
    covfuzz()
        .args(["fuzz", "./does-not-exist"])
        .arg(dir.path())
        .arg(dir.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: "));
}

#[test]
fn test_fuzz_bad_campaign_file_reports_error() {
    let dir = TempDir::new().unwrap();
    let campaign = dir.path().join("campaign.yaml");
    fs::write(&campaign, "no_such_key: 1\n").unwrap();

    covfuzz()
        .args(["fuzz", "--config"])
        .arg(&campaign)
        .args(["./calc", "seeds", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

// ============================================================================
// End-to-end campaign against a shell target
// ============================================================================

#[cfg(unix)]
mod campaign {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};

    /// Passes only on the input "1"; records coverage the way the runtime does
    const TARGET: &str = r#"#!/bin/sh
read -r line
printf '1,1\n' >> "$0.cov"
if [ "$line" = "1" ]; then
    printf '2,5\n' >> "$0.cov"
    exit 0
fi
printf '3,5\n' >> "$0.cov"
echo "Divide-by-zero detected at line 3 and col 5"
exit 1
"#;

    fn setup(dir: &TempDir) -> (PathBuf, PathBuf, PathBuf) {
        let target = dir.path().join("target.sh");
        fs::write(&target, TARGET).unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o755)).unwrap();

        let seeds = dir.path().join("seeds");
        fs::create_dir(&seeds).unwrap();
        fs::write(seeds.join("one"), "1").unwrap();

        (target, seeds, dir.path().join("out"))
    }

    fn count(dir: &Path) -> usize {
        fs::read_dir(dir).map(Iterator::count).unwrap_or(0)
    }

    #[test]
    fn test_fuzz_then_score() {
        let dir = TempDir::new().unwrap();
        let (target, seeds, out) = setup(&dir);

        covfuzz()
            .args(["-q", "fuzz", "-s", "-n", "30", "--rng-seed", "1"])
            .arg(&target)
            .arg(&seeds)
            .arg(&out)
            .assert()
            .success();

        let crashes = count(&out.join("crash"));
        let passes = count(&out.join("pass"));
        assert!(crashes > 0);
        // The seed itself passes; mutants like "1\n..." may pass too
        assert!(passes >= 1);

        let output = covfuzz()
            .args(["score", "--format", "json"])
            .arg(&target)
            .arg(&out)
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["crashes"], crashes);
        assert_eq!(report["passes"], passes);
        assert_eq!(report["unique_crashes"], 1);
        assert_eq!(report["coverage"], 3);
        assert_eq!(
            report["crash_signatures"][0],
            "Divide-by-zero detected at line 3 and col 5"
        );
    }

    #[test]
    fn test_passing_inputs_not_stored_by_default() {
        let dir = TempDir::new().unwrap();
        let (target, seeds, out) = setup(&dir);

        covfuzz()
            .args(["-q", "fuzz", "-n", "5"])
            .arg(&target)
            .arg(&seeds)
            .arg(&out)
            .assert()
            .success();

        assert!(out.join("pass").is_dir());
        assert_eq!(count(&out.join("pass")), 0);
    }

    #[test]
    fn test_score_text_report() {
        let dir = TempDir::new().unwrap();
        let (target, _seeds, out) = setup(&dir);
        fs::create_dir_all(out.join("crash")).unwrap();
        fs::write(out.join("crash").join("x"), "2").unwrap();

        covfuzz()
            .arg("score")
            .arg(&target)
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("CAMPAIGN SCORE"))
            .stdout(predicate::str::contains("Unique crashes:   1"))
            .stderr(predicate::str::contains("Replaying"));
    }

    #[test]
    fn test_score_quiet_keeps_stderr_clean() {
        let dir = TempDir::new().unwrap();
        let (target, _seeds, out) = setup(&dir);
        fs::create_dir_all(out.join("crash")).unwrap();

        covfuzz()
            .args(["-q", "--color", "never", "score", "--format", "json"])
            .arg(&target)
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::starts_with("{"))
            .stderr(predicate::str::is_empty());
    }
}
