//! Command handlers, kept out of main.rs so they can be tested

pub mod fuzz;
pub mod score;

pub use fuzz::{execute_fuzz, resolve_fuzz_config};
pub use score::execute_score;

use crate::error::CliResult;

/// Single-threaded runtime; executions run one at a time
pub(crate) fn runtime() -> CliResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
