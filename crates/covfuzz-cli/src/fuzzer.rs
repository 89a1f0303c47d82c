//! Coverage-guided fuzzing loop
//!
//! Every seed runs once, then mutated corpus entries run until the
//! iteration budget or the wall-clock limit is spent. Passing inputs that
//! reach a location never seen before join the corpus; crashes and hangs
//! never do.

use covfuzz_rt::CoverageSet;
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::config::FuzzConfig;
use crate::corpus::{Corpus, InputKind, OutputStore};
use crate::error::CliResult;
use crate::executor::{Executor, Outcome};
use crate::mutator::{Mutator, MutatorConfig, Seed};
use crate::output::ProgressReporter;

/// Counters for a campaign
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FuzzStats {
    /// Target executions
    pub executions: u64,
    /// Distinct crashing inputs written to disk
    pub crashes: u64,
    /// Crashing inputs in the output directory, earlier campaigns included
    pub crashes_on_disk: usize,
    /// Executions that crashed, duplicates included
    pub crash_executions: u64,
    /// Distinct passing inputs written to disk
    pub passes_stored: u64,
    /// Executions killed by the timeout
    pub hangs: u64,
    /// Inputs produced by the mutator
    pub mutations: u64,
    /// Distinct source locations reached
    pub coverage: usize,
    /// Corpus size at the end
    pub corpus_size: usize,
    /// Wall-clock time spent
    pub elapsed_ms: u64,
}

/// What one execution contributed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// How the run ended
    pub outcome: Outcome,
    /// Locations reached for the first time
    pub new_locations: usize,
    /// File written for a previously unseen crash
    pub crash_file: Option<PathBuf>,
}

/// A fuzzing campaign over one target
pub struct Fuzzer<E: Executor> {
    executor: E,
    config: FuzzConfig,
    mutator: Mutator,
    corpus: Corpus,
    store: OutputStore,
    coverage: CoverageSet,
    stats: FuzzStats,
}

impl<E: Executor> std::fmt::Debug for Fuzzer<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fuzzer")
            .field("config", &self.config)
            .field("corpus", &self.corpus.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<E: Executor> Fuzzer<E> {
    /// Create a campaign
    pub fn new(executor: E, mut corpus: Corpus, store: OutputStore, config: FuzzConfig) -> Self {
        if corpus.is_empty() {
            corpus.add(Vec::new());
        }
        let mutator = Mutator::with_config(
            Seed::from_u64(config.rng_seed),
            MutatorConfig {
                max_len: config.max_len,
                max_stacked: config.max_stacked_mutations,
            },
        );
        Self {
            executor,
            config,
            mutator,
            corpus,
            store,
            coverage: CoverageSet::new(),
            stats: FuzzStats::default(),
        }
    }

    /// Campaign settings
    #[must_use]
    pub const fn config(&self) -> &FuzzConfig {
        &self.config
    }

    /// Current corpus
    #[must_use]
    pub const fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Union of the coverage of every execution so far
    #[must_use]
    pub const fn coverage(&self) -> &CoverageSet {
        &self.coverage
    }

    /// Counters so far
    #[must_use]
    pub fn stats(&self) -> FuzzStats {
        let mut stats = self.stats.clone();
        stats.coverage = self.coverage.len();
        stats.corpus_size = self.corpus.len();
        stats.mutations = self.mutator.inputs_generated();
        stats.crashes_on_disk = self.store.count(InputKind::Crash);
        stats
    }

    /// Run seeds, then mutations, until a budget is exhausted
    pub async fn run(&mut self, reporter: &mut ProgressReporter) -> CliResult<FuzzStats> {
        let started = Instant::now();
        let deadline = self.config.duration().map(|limit| started + limit);
        let seeds = self.corpus.entries().to_vec();

        reporter.start_progress(seeds.len() as u64 + self.config.iterations, "seeds");
        tracing::info!(
            seeds = seeds.len(),
            iterations = self.config.iterations,
            "starting campaign"
        );

        for seed in seeds {
            self.step(seed, reporter).await?;
        }

        reporter.set_message("mutating");
        for _ in 0..self.config.iterations {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                tracing::info!("time limit reached");
                break;
            }
            let input = self.next_input();
            self.step(input, reporter).await?;
        }
        reporter.finish();

        self.stats.elapsed_ms = duration_ms(started.elapsed());
        let stats = self.stats();
        tracing::info!(
            executions = stats.executions,
            crashes = stats.crashes,
            coverage = stats.coverage,
            "campaign finished"
        );
        Ok(stats)
    }

    async fn step(&mut self, input: Vec<u8>, reporter: &ProgressReporter) -> CliResult<()> {
        let report = self.run_one(input).await?;
        if let Some(ref path) = report.crash_file {
            reporter.crash(&format!("new crash saved to {}", path.display()));
        }
        reporter.increment(1);
        Ok(())
    }

    fn next_input(&mut self) -> Vec<u8> {
        let parent = self.mutator.pick(self.corpus.len());
        let donor = self.mutator.pick(self.corpus.len());
        let parent = self.corpus.get(parent).unwrap_or_default();
        let donor = self.corpus.get(donor);
        self.mutator.mutate(parent, donor)
    }

    /// Execute one input and fold the result into the campaign state
    pub async fn run_one(&mut self, input: Vec<u8>) -> CliResult<StepReport> {
        let execution = self.executor.execute(&input).await?;
        self.stats.executions += 1;

        let new_locations = self.coverage.new_locations(&execution.coverage).len();
        self.coverage.merge(&execution.coverage);

        let mut crash_file = None;
        match execution.outcome {
            Outcome::Crash { code, signal } => {
                self.stats.crash_executions += 1;
                if let Some(path) = self.store.store(InputKind::Crash, &input)? {
                    tracing::info!(?code, ?signal, path = %path.display(), "new crashing input");
                    self.stats.crashes += 1;
                    crash_file = Some(path);
                }
            }
            Outcome::Pass => {
                if self.config.store_passing_input
                    && self.store.store(InputKind::Pass, &input)?.is_some()
                {
                    self.stats.passes_stored += 1;
                }
            }
            Outcome::Hang => {
                tracing::warn!(len = input.len(), "target timed out");
                self.stats.hangs += 1;
            }
        }

        if matches!(execution.outcome, Outcome::Pass)
            && new_locations > 0
            && self.corpus.add(input)
        {
            tracing::debug!(new_locations, corpus = self.corpus.len(), "corpus grew");
        }

        Ok(StepReport {
            outcome: execution.outcome,
            new_locations,
            crash_file,
        })
    }
}

fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
