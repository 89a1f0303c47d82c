//! Line/column coverage logging.
//!
//! ```text
//! instrumented target                      harness
//! ─────────────────────                    ───────────────────────────
//! __coverage__(l, c) ──► CoverageLog ──►  <exe>.cov ──► CoverageSet
//!                        (reset once,      "l,c\n"       (parse, merge,
//!                         then append)                    diff)
//! ```
//!
//! The target side only appends. Reading the file back is the harness's
//! business, through [`CoverageSet`].

mod log;
mod set;

pub use log::{record_hit, CoverageLog, COVERAGE_SUFFIX};
pub use set::CoverageSet;
