//! Source locations reported by instrumentation hooks.
//!
//! A location is the `(line, col)` pair an instrumenting compiler passes to
//! the hooks. Its record form in a coverage file is `line,col`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A line/column position in the instrumented source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLocation {
    /// 1-based source line
    pub line: i32,
    /// 1-based source column
    pub col: i32,
}

impl SourceLocation {
    /// Create a new location
    #[inline]
    #[must_use]
    pub const fn new(line: i32, col: i32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.col)
    }
}

/// Failure to parse a `line,col` record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected `line,col`, found {record:?}")]
pub struct ParseLocationError {
    /// The offending record text
    pub record: String,
}

impl FromStr for SourceLocation {
    type Err = ParseLocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseLocationError {
            record: s.to_string(),
        };

        let (line, col) = s.split_once(',').ok_or_else(malformed)?;
        let line = line.parse().map_err(|_| malformed())?;
        let col = col.parse().map_err(|_| malformed())?;
        Ok(Self { line, col })
    }
}
