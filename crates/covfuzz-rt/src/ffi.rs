//! C ABI entry points called by compiler-inserted instrumentation.
//!
//! The symbol names are fixed by the instrumentation pass and must not
//! change. Link the `staticlib` build of this crate into C targets.

#![allow(unsafe_code)]

use std::os::raw::c_int;

use crate::{coverage, sanitizer};

/// Sanitizer hook inserted before each division.
///
/// Prints the divide-by-zero message to stdout and exits with status 1
/// when `divisor` is zero.
#[no_mangle]
pub extern "C" fn __dbz_sanitizer__(divisor: c_int, line: c_int, col: c_int) {
    sanitizer::guard_division(divisor, line, col);
}

/// Coverage callback inserted at each instrumented location.
#[no_mangle]
pub extern "C" fn __coverage__(line: c_int, col: c_int) {
    coverage::record_hit(line, col);
}
