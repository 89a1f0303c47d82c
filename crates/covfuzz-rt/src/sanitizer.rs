//! Divide-by-zero sanitizer.
//!
//! An instrumenting compiler inserts a call before each integer division,
//! passing the divisor and the source position of the `/`. The hook stops
//! the process before the machine division can trap, leaving a message the
//! fuzz harness uses as the crash signature.

use std::io::Write;

use crate::location::SourceLocation;

/// Exit status used when a zero divisor is detected
pub const SANITIZER_EXIT_CODE: i32 = 1;

/// A zero divisor detected at a source location
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Divide-by-zero detected at line {} and col {}", .location.line, .location.col)]
pub struct DivideByZero {
    /// Position of the division
    pub location: SourceLocation,
}

/// Check a divisor before dividing
pub fn check_divisor(divisor: i32, location: SourceLocation) -> Result<(), DivideByZero> {
    if divisor == 0 {
        return Err(DivideByZero { location });
    }
    Ok(())
}

/// Divide after checking the divisor
///
/// `i32::MIN / -1` wraps instead of trapping.
pub fn checked_div(
    dividend: i32,
    divisor: i32,
    location: SourceLocation,
) -> Result<i32, DivideByZero> {
    check_divisor(divisor, location)?;
    Ok(dividend.wrapping_div(divisor))
}

/// Terminate the process if `divisor` is zero.
///
/// The message goes to stdout, not stderr: harnesses read crash signatures
/// from the target's standard output.
pub fn guard_division(divisor: i32, line: i32, col: i32) {
    if let Err(err) = check_divisor(divisor, SourceLocation::new(line, col)) {
        tracing::trace!(%err, "sanitizer tripped");
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{err}");
        let _ = stdout.flush();
        std::process::exit(SANITIZER_EXIT_CODE);
    }
}
