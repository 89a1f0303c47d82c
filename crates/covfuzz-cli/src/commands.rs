//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ColorChoice;
use crate::logging::LogFormat;

/// covfuzz: coverage-guided fuzzer for programs that read stdin
#[derive(Parser, Debug)]
#[command(name = "covfuzz")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Diagnostic log format
    #[arg(long, value_enum, default_value = "compact", global = true)]
    pub log_format: LogFormat,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fuzz a target, storing crashing inputs under OUTPUT_DIR/crash
    Fuzz(FuzzArgs),

    /// Replay a campaign's stored inputs and report coverage and unique crashes
    Score(ScoreArgs),
}

/// Arguments for the fuzz command
#[derive(Parser, Debug)]
pub struct FuzzArgs {
    /// Target executable; reads one input on stdin
    pub target: PathBuf,

    /// Directory of seed inputs
    pub seed_dir: PathBuf,

    /// Directory receiving crash/ and pass/
    pub output_dir: PathBuf,

    /// Also store inputs that did not crash under OUTPUT_DIR/pass
    #[arg(short = 's', long)]
    pub store_passing_input: bool,

    /// Mutated executions after the seeds
    #[arg(short = 'n', long)]
    pub iterations: Option<u64>,

    /// Stop after this many seconds
    #[arg(short, long)]
    pub duration: Option<u64>,

    /// PRNG seed for reproducible campaigns
    #[arg(long)]
    pub rng_seed: Option<u64>,

    /// Per-execution timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Maximum generated input length
    #[arg(long)]
    pub max_len: Option<usize>,

    /// YAML campaign file; command-line flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the score command
#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Target executable the campaign ran against
    pub target: PathBuf,

    /// Output directory of the campaign
    pub output_dir: PathBuf,

    /// Report format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ScoreFormat,

    /// Per-execution timeout in milliseconds
    #[arg(long, default_value = "1000")]
    pub timeout_ms: u64,
}

/// Score report formats
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScoreFormat {
    /// Human readable summary
    #[default]
    Text,
    /// Machine readable JSON
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}
