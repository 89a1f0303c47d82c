//! Campaign scoring
//!
//! Replays everything a campaign stored and measures it:
//!
//! | Metric | Meaning |
//! |--------|---------|
//! | crashes | files under `crash/` |
//! | passes | files under `pass/` |
//! | coverage | distinct locations reached by all stored inputs |
//! | unique crashes | distinct non-empty stdout lines of crashing replays |

use covfuzz_rt::CoverageSet;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::corpus::{list_inputs, InputKind};
use crate::error::{CliError, CliResult};
use crate::executor::Executor;

/// Score of a campaign output directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    /// Stored crashing inputs
    pub crashes: usize,
    /// Stored passing inputs
    pub passes: usize,
    /// Distinct locations covered across all replays
    pub coverage: usize,
    /// Distinct crash messages
    pub unique_crashes: usize,
    /// The crash messages themselves, sorted
    pub crash_signatures: Vec<String>,
    /// Stored crashes that no longer crash on replay
    pub stale_crashes: Vec<PathBuf>,
}

/// Replay every stored input of an output directory
pub async fn score<E: Executor>(executor: &E, root: &Path) -> CliResult<ScoreReport> {
    if !root.is_dir() {
        return Err(CliError::invalid_argument(format!(
            "output directory {} does not exist",
            root.display()
        )));
    }

    let crash_files = list_inputs(&root.join(InputKind::Crash.dir_name()))?;
    let pass_files = list_inputs(&root.join(InputKind::Pass.dir_name()))?;
    tracing::info!(
        crashes = crash_files.len(),
        passes = pass_files.len(),
        "replaying stored inputs"
    );

    let mut coverage = CoverageSet::new();
    let mut signatures = BTreeSet::new();
    let mut stale_crashes = Vec::new();

    for path in &crash_files {
        let input = std::fs::read(path)?;
        let execution = executor.execute(&input).await?;
        coverage.merge(&execution.coverage);
        if execution.outcome.is_crash() {
            signatures.extend(execution.crash_signatures());
        } else {
            tracing::warn!(path = %path.display(), "stored crash did not reproduce");
            stale_crashes.push(path.clone());
        }
    }

    for path in &pass_files {
        let input = std::fs::read(path)?;
        let execution = executor.execute(&input).await?;
        coverage.merge(&execution.coverage);
    }

    let crash_signatures: Vec<String> = signatures.into_iter().collect();
    Ok(ScoreReport {
        crashes: crash_files.len(),
        passes: pass_files.len(),
        coverage: coverage.len(),
        unique_crashes: crash_signatures.len(),
        crash_signatures,
        stale_crashes,
    })
}

/// Render a score report as text
#[must_use]
pub fn render_score_report(report: &ScoreReport) -> String {
    let mut output = String::new();

    output.push_str("CAMPAIGN SCORE\n");
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    let _ = writeln!(output, "Crashing inputs:  {}", report.crashes);
    let _ = writeln!(output, "Passing inputs:   {}", report.passes);
    let _ = writeln!(output, "Coverage:         {} locations", report.coverage);
    let _ = writeln!(output, "Unique crashes:   {}", report.unique_crashes);

    if !report.crash_signatures.is_empty() {
        output.push_str("\nCrash signatures:\n");
        for signature in &report.crash_signatures {
            let _ = writeln!(output, "  {signature}");
        }
    }

    if !report.stale_crashes.is_empty() {
        output.push_str("\nNot reproducible:\n");
        for path in &report.stale_crashes {
            let _ = writeln!(output, "  {}", path.display());
        }
    }

    output
}

/// Render a score report as JSON
pub fn render_score_json(report: &ScoreReport) -> CliResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| CliError::report_generation(e.to_string()))
}
