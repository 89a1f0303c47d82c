//! Append-only coverage log written by the coverage callback.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{RuntimeError, RuntimeResult};
use crate::location::SourceLocation;

/// Suffix appended to the executable path to name its coverage file
pub const COVERAGE_SUFFIX: &str = ".cov";

/// Process-wide log, created on the first coverage callback
static PROCESS_LOG: Mutex<Option<CoverageLog>> = Mutex::new(None);

/// Coverage log bound to one file.
///
/// The first [`record`](Self::record) removes whatever the file held from an
/// earlier run; every record after that is appended. The log never reads
/// the file.
#[derive(Debug)]
pub struct CoverageLog {
    path: PathBuf,
    initialized: bool,
}

impl CoverageLog {
    /// Create a log for an explicit coverage file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            initialized: false,
        }
    }

    /// Create the log for the currently running executable
    pub fn for_current_exe() -> RuntimeResult<Self> {
        let exe =
            std::env::current_exe().map_err(|source| RuntimeError::ExecutableNotFound { source })?;
        Ok(Self::new(Self::path_for(&exe)))
    }

    /// Coverage file path for an executable: the full path plus `.cov`
    #[must_use]
    pub fn path_for(executable: &Path) -> PathBuf {
        let mut name = OsString::from(executable.as_os_str());
        name.push(COVERAGE_SUFFIX);
        PathBuf::from(name)
    }

    /// Path of the coverage file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the one-time reset has already happened
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Append one `line,col` record, resetting the file on first use
    pub fn record(&mut self, location: SourceLocation) -> RuntimeResult<()> {
        if !self.initialized {
            self.reset()?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RuntimeError::coverage_io(&self.path, e))?;
        writeln!(file, "{location}").map_err(|e| RuntimeError::coverage_io(&self.path, e))
    }

    fn reset(&mut self) -> RuntimeResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::trace!(path = %self.path.display(), "reset coverage file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(RuntimeError::coverage_io(&self.path, e)),
        }
        self.initialized = true;
        Ok(())
    }
}

fn record_in_process_log(location: SourceLocation) -> RuntimeResult<()> {
    // Poisoning leaves the log state intact
    let mut guard = PROCESS_LOG
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    if guard.is_none() {
        *guard = Some(CoverageLog::for_current_exe()?);
    }

    match guard.as_mut() {
        Some(log) => log.record(location),
        None => Ok(()),
    }
}

/// Record a coverage hit for the running process.
///
/// Failures are fatal: the message goes to stderr and the process exits
/// with status 1.
pub fn record_hit(line: i32, col: i32) {
    if let Err(err) = record_in_process_log(SourceLocation::new(line, col)) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
