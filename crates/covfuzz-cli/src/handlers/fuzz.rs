//! Fuzz command handler

use crate::commands::FuzzArgs;
use crate::config::{CliConfig, FuzzConfig};
use crate::corpus::{Corpus, OutputStore};
use crate::error::CliResult;
use crate::executor::TargetRunner;
use crate::fuzzer::{FuzzStats, Fuzzer};
use crate::output::ProgressReporter;

/// Campaign file (if any) with command-line overrides applied
pub fn resolve_fuzz_config(args: &FuzzArgs) -> CliResult<FuzzConfig> {
    let mut config = match args.config {
        Some(ref path) => FuzzConfig::load(path)?,
        None => FuzzConfig::default(),
    };

    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(secs) = args.duration {
        config.duration_secs = Some(secs);
    }
    if let Some(seed) = args.rng_seed {
        config.rng_seed = seed;
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout_ms = ms;
    }
    if let Some(max_len) = args.max_len {
        config.max_len = max_len;
    }
    if args.store_passing_input {
        config.store_passing_input = true;
    }

    config.validate()?;
    Ok(config)
}

/// Execute the fuzz command
pub fn execute_fuzz(config: &CliConfig, args: &FuzzArgs) -> CliResult<FuzzStats> {
    let fuzz_config = resolve_fuzz_config(args)?;
    let runner = TargetRunner::new(&args.target, fuzz_config.timeout())?;
    let corpus = Corpus::from_seed_dir(&args.seed_dir)?;
    let store = OutputStore::create(&args.output_dir)?;

    let mut reporter = ProgressReporter::new(
        config.color.should_color(),
        config.verbosity.is_quiet(),
    );
    reporter.info(&format!(
        "Fuzzing {} with {} seed(s)",
        runner.target().display(),
        corpus.len()
    ));

    let mut fuzzer = Fuzzer::new(runner, corpus, store, fuzz_config);
    let stats = super::runtime()?.block_on(fuzzer.run(&mut reporter))?;

    print_summary(&reporter, &stats, args);
    Ok(stats)
}

fn print_summary(reporter: &ProgressReporter, stats: &FuzzStats, args: &FuzzArgs) {
    reporter.header("Campaign summary");
    reporter.info(&format!(
        "Executions:       {} ({} mutated)",
        stats.executions, stats.mutations
    ));
    reporter.info(&format!("Coverage:         {} locations", stats.coverage));
    reporter.info(&format!("Corpus size:      {}", stats.corpus_size));
    if stats.hangs > 0 {
        reporter.warning(&format!("Timeouts:         {}", stats.hangs));
    }
    if stats.passes_stored > 0 {
        reporter.info(&format!("Passing stored:   {}", stats.passes_stored));
    }
    if stats.crashes > 0 {
        reporter.crash(&format!(
            "{} new crashing input(s), {} total in {}",
            stats.crashes,
            stats.crashes_on_disk,
            args.output_dir.join("crash").display()
        ));
    } else {
        reporter.success("No new crashes");
    }
}
