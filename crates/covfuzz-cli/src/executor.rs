//! Running a target on one input
//!
//! The [`Executor`] trait is the seam between the campaign logic and the
//! process plumbing: [`TargetRunner`] spawns the real binary, tests plug in
//! in-memory executors.

use async_trait::async_trait;
use covfuzz_rt::{CoverageLog, CoverageSet};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{ChildStdin, ChildStdout, Command};

use crate::error::{CliError, CliResult};

/// How one execution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Exited with status 0
    Pass,
    /// Exited non-zero or was killed by a signal
    Crash {
        /// Exit code, if the process exited
        code: Option<i32>,
        /// Terminating signal, if any
        signal: Option<i32>,
    },
    /// Killed after exceeding the timeout
    Hang,
}

impl Outcome {
    /// Classify an exit status
    #[must_use]
    pub fn from_status(status: ExitStatus) -> Self {
        if status.success() {
            return Self::Pass;
        }

        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        Self::Crash {
            code: status.code(),
            signal,
        }
    }

    /// Whether this outcome is a crash
    #[must_use]
    pub const fn is_crash(&self) -> bool {
        matches!(self, Self::Crash { .. })
    }
}

/// Result of running one input
#[derive(Debug, Clone)]
pub struct Execution {
    /// How the run ended
    pub outcome: Outcome,
    /// Everything the target wrote to stdout
    pub stdout: Vec<u8>,
    /// Coverage the run produced
    pub coverage: CoverageSet,
    /// Wall-clock time of the run
    pub duration: Duration,
}

impl Execution {
    /// Create an execution with no output and no coverage
    #[must_use]
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            stdout: Vec::new(),
            coverage: CoverageSet::new(),
            duration: Duration::ZERO,
        }
    }

    /// Attach stdout
    #[must_use]
    pub fn with_stdout(mut self, stdout: impl Into<Vec<u8>>) -> Self {
        self.stdout = stdout.into();
        self
    }

    /// Attach coverage
    #[must_use]
    pub fn with_coverage(mut self, coverage: CoverageSet) -> Self {
        self.coverage = coverage;
        self
    }

    /// Distinct non-empty stdout lines, trimmed
    #[must_use]
    pub fn crash_signatures(&self) -> Vec<String> {
        let mut lines: Vec<String> = String::from_utf8_lossy(&self.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        lines.sort();
        lines.dedup();
        lines
    }
}

/// Something that can run one input
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run the input and report what happened
    async fn execute(&self, input: &[u8]) -> CliResult<Execution>;
}

/// Executes a target binary, feeding the input on stdin
#[derive(Debug, Clone)]
pub struct TargetRunner {
    target: PathBuf,
    coverage_path: PathBuf,
    timeout: Duration,
}

impl TargetRunner {
    /// Create a runner for a target binary.
    ///
    /// The path is canonicalized so the coverage file matches the one the
    /// runtime derives from the resolved executable path.
    pub fn new(target: &Path, timeout: Duration) -> CliResult<Self> {
        let target = std::fs::canonicalize(target).map_err(|e| CliError::target(target, e))?;
        if !target.is_file() {
            return Err(CliError::target(
                &target,
                std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
            ));
        }
        let coverage_path = CoverageLog::path_for(&target);
        Ok(Self {
            target,
            coverage_path,
            timeout,
        })
    }

    /// Resolved target path
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    async fn clear_coverage(&self) -> CliResult<()> {
        match tokio::fs::remove_file(&self.coverage_path).await {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

async fn feed_stdin(pipe: Option<ChildStdin>, input: &[u8]) -> std::io::Result<()> {
    let Some(mut pipe) = pipe else {
        return Ok(());
    };
    match pipe.write_all(input).await {
        // The target may exit before consuming everything
        Err(e) if e.kind() != ErrorKind::BrokenPipe => Err(e),
        _ => Ok(()),
    }
}

async fn drain_stdout(pipe: Option<ChildStdout>) -> std::io::Result<Vec<u8>> {
    let mut stdout = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut stdout).await?;
    }
    Ok(stdout)
}

#[async_trait]
impl Executor for TargetRunner {
    async fn execute(&self, input: &[u8]) -> CliResult<Execution> {
        // Stale records from the previous run must not leak into this one
        self.clear_coverage().await?;

        let started = Instant::now();
        let mut child = Command::new(&self.target)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CliError::execution(format!("{}: {e}", self.target.display())))?;

        let stdin = child.stdin.take();
        let stdout_pipe = child.stdout.take();

        let interaction = async {
            // A target may fill stdout before it reads its input
            let (written, read) =
                tokio::join!(feed_stdin(stdin, input), drain_stdout(stdout_pipe));
            written?;
            let stdout = read?;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>((status, stdout))
        };

        let result = tokio::time::timeout(self.timeout, interaction).await;
        let duration = started.elapsed();

        let (outcome, stdout) = match result {
            Ok(Ok((status, stdout))) => (Outcome::from_status(status), stdout),
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                tracing::debug!(timeout_ms = self.timeout.as_millis() as u64, "target hung");
                let _ = child.kill().await;
                (Outcome::Hang, Vec::new())
            }
        };

        let coverage = CoverageSet::load(&self.coverage_path)?;
        tracing::trace!(?outcome, coverage = coverage.len(), "execution finished");

        Ok(Execution {
            outcome,
            stdout,
            coverage,
            duration,
        })
    }
}
