//! Score command handler

use std::time::Duration;

use crate::commands::{ScoreArgs, ScoreFormat};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::executor::TargetRunner;
use crate::output::ProgressReporter;
use crate::score::{render_score_json, render_score_report, score, ScoreReport};

/// Execute the score command, printing the report to stdout
pub fn execute_score(config: &CliConfig, args: &ScoreArgs) -> CliResult<ScoreReport> {
    if args.timeout_ms == 0 {
        return Err(CliError::invalid_argument("--timeout-ms must be greater than 0"));
    }
    let runner = TargetRunner::new(&args.target, Duration::from_millis(args.timeout_ms))?;
    let reporter = ProgressReporter::new(config.color.should_color(), config.verbosity.is_quiet());
    reporter.info(&format!(
        "Replaying {} against {}",
        args.output_dir.display(),
        runner.target().display()
    ));

    let report = super::runtime()?.block_on(score(&runner, &args.output_dir))?;

    let rendered = match args.format {
        ScoreFormat::Text => render_score_report(&report),
        ScoreFormat::Json => render_score_json(&report)?,
    };
    println!("{rendered}");
    Ok(report)
}
