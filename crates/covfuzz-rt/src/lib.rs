//! covfuzz runtime: hooks linked into instrumented fuzz targets.
//!
//! Two hooks are provided, each as a safe Rust API and as an `extern "C"`
//! symbol for targets built by an instrumenting C compiler:
//!
//! - **Sanitizer hook** (`__dbz_sanitizer__`): called before every division
//!   with the divisor and the source position. A zero divisor prints
//!   `Divide-by-zero detected at line L and col C` to stdout and exits 1.
//! - **Coverage callback** (`__coverage__`): called at every instrumented
//!   source position. Appends `line,col` to `<executable>.cov`, resetting
//!   that file once per process.
//!
//! # Example
//!
//! ```rust
//! use covfuzz_rt::prelude::*;
//!
//! let at = SourceLocation::new(12, 9);
//! assert!(check_divisor(3, at).is_ok());
//!
//! let err = check_divisor(0, at).unwrap_err();
//! assert_eq!(err.to_string(), "Divide-by-zero detected at line 12 and col 9");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod coverage;
mod error;
mod ffi;
mod location;
pub mod sanitizer;

pub use coverage::{record_hit, CoverageLog, CoverageSet, COVERAGE_SUFFIX};
pub use error::{RuntimeError, RuntimeResult};
pub use ffi::{__coverage__, __dbz_sanitizer__};
pub use location::{ParseLocationError, SourceLocation};
pub use sanitizer::{check_divisor, checked_div, guard_division, DivideByZero};

/// Records the call site of the macro as a coverage hit.
///
/// Equivalent to the `__coverage__(line, col)` call an instrumenting
/// compiler would insert at this position.
#[macro_export]
macro_rules! cover {
    () => {
        $crate::coverage::record_hit(line!() as i32, column!() as i32)
    };
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::coverage::{record_hit, CoverageLog, CoverageSet};
    pub use crate::location::SourceLocation;
    pub use crate::sanitizer::{check_divisor, checked_div, guard_division, DivideByZero};
    pub use crate::{RuntimeError, RuntimeResult};
}
