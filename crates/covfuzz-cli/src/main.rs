//! covfuzz CLI
//!
//! ## Usage
//!
//! ```bash
//! covfuzz fuzz ./calc seeds/ out/                # Fuzz, keep crashes in out/crash
//! covfuzz fuzz -s -n 50000 ./calc seeds/ out/    # Also keep passing inputs
//! covfuzz score ./calc out/ --format json        # Replay and score a campaign
//! ```

use clap::Parser;
use covfuzz::{
    handlers::{execute_fuzz, execute_score},
    init_tracing, Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(config.verbosity, cli.log_format);

    match cli.command {
        Commands::Fuzz(args) => execute_fuzz(&config, &args).map(|_| ()),
        Commands::Score(args) => execute_score(&config, &args).map(|_| ()),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
