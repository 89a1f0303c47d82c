//! covfuzz: coverage-guided fuzzing for stdin-driven targets
//!
//! Targets link `covfuzz-rt`, which appends every reached `line,col` to
//! `<executable>.cov`. The fuzzer replays mutated inputs, reads that file
//! back after each run and keeps inputs that reach new locations.
//!
//! ```text
//! seeds ──▶ Corpus ──▶ Mutator ──▶ TargetRunner ──▶ Outcome + CoverageSet
//!             ▲                                          │
//!             └──── new coverage ◀───────────────────────┤
//!                                    crash ──▶ OUTPUT/crash/<sha256>
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
pub mod corpus;
mod error;
pub mod executor;
pub mod fuzzer;
pub mod handlers;
pub mod logging;
pub mod mutator;
mod output;
pub mod score;

pub use commands::{Cli, ColorArg, Commands, FuzzArgs, ScoreArgs, ScoreFormat};
pub use config::{CliConfig, ColorChoice, FuzzConfig, Verbosity};
pub use corpus::{content_name, list_inputs, Corpus, InputKind, OutputStore};
pub use error::{CliError, CliResult};
pub use executor::{Execution, Executor, Outcome, TargetRunner};
pub use fuzzer::{FuzzStats, Fuzzer, StepReport};
pub use logging::{init_tracing, LogFormat};
pub use mutator::{Mutation, Mutator, MutatorConfig, Seed};
pub use output::ProgressReporter;
pub use score::{render_score_json, render_score_report, score, ScoreReport};
