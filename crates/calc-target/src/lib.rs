//! Calculator fuzz target.
//!
//! Reads one `A+B` line, adds the operands, and deliberately crashes through
//! the divide-by-zero sanitizer when the sum is larger than 1000. The crash is
//! the bug a fuzzer is expected to find.
//!
//! # Example
//!
//! ```rust
//! use calc_target::prelude::*;
//!
//! assert_eq!(job(b"400+250\n"), 650);
//! assert_eq!(job(b"no operator here"), CalcError::SENTINEL);
//!
//! let eval = Evaluator::new();
//! let sum = eval.evaluate_bytes(b"999+2").unwrap();
//! assert!(eval.exceeds_threshold(sum));
//! ```

#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod core;
pub mod input;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::core::evaluator::{job, Evaluator};
    pub use crate::core::parser::{atoi, Expression, Parser};
    pub use crate::core::{CalcError, CalcResult, CRASH_THRESHOLD, INPUT_CAPACITY};
    pub use crate::input::read_line;
}
