//! CLI and campaign configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - minimal output
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default log filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn log_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when output is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Fuzzing campaign settings.
///
/// Loadable from YAML; every field is optional there and falls back to the
/// default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuzzConfig {
    /// Mutated executions after the seeds have run
    pub iterations: u64,
    /// Wall-clock limit for the whole campaign, in seconds
    pub duration_secs: Option<u64>,
    /// Seed for the mutation PRNG
    pub rng_seed: u64,
    /// Per-execution timeout in milliseconds
    pub timeout_ms: u64,
    /// Maximum generated input length in bytes
    pub max_len: usize,
    /// Upper bound on mutations stacked into one input
    pub max_stacked_mutations: u32,
    /// Keep inputs that did not crash
    pub store_passing_input: bool,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            duration_secs: None,
            rng_seed: 0x5eed,
            timeout_ms: 1_000,
            max_len: 4_096,
            max_stacked_mutations: 4,
            store_passing_input: false,
        }
    }
}

impl FuzzConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML campaign file
    pub fn from_yaml_str(yaml: &str) -> CliResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)
            .map_err(|e| CliError::config(format!("invalid campaign file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML campaign file
    pub fn load(path: &Path) -> CliResult<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| CliError::config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml_str(&yaml)
    }

    /// Reject settings that cannot run
    pub fn validate(&self) -> CliResult<()> {
        if self.timeout_ms == 0 {
            return Err(CliError::config("timeout_ms must be greater than 0"));
        }
        if self.max_stacked_mutations == 0 {
            return Err(CliError::config(
                "max_stacked_mutations must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Set iteration count
    #[must_use]
    pub const fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the campaign wall-clock limit
    #[must_use]
    pub const fn with_duration_secs(mut self, secs: u64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Set PRNG seed
    #[must_use]
    pub const fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Set per-execution timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout_ms = ms;
        self
    }

    /// Set maximum input length
    #[must_use]
    pub const fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Keep passing inputs
    #[must_use]
    pub const fn with_store_passing_input(mut self, store: bool) -> Self {
        self.store_passing_input = store;
        self
    }

    /// Per-execution timeout
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Campaign wall-clock limit, if any
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(Duration::from_secs)
    }
}
