//! Timeline driver: one dataset run from world generation to the last query.
//!
//! A run emits an [`InitialBundle`] once, then the interleaved sequence
//! `[change]*K [query] [change]*K [query] ...` with `K` =
//! `state_changes_per_query`, repeated `num_queries` times. When goals are
//! enabled, a goal record follows every `state_changes_per_goal`-th change.
//!
//! Records are handed to a [`TimelineSink`]; the driver never touches the
//! filesystem itself.

use chrono::{DateTime, Utc};
use homestate_planning::{PlanningEncoder, PlanningError};
use homestate_types::{InitialBundle, TimelineRecord, TimelineStep};
use homestate_world::registry::Registry;
use homestate_world::{Household, WorldError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{ConfigError, GeneratorConfig};
use crate::context::GenerationContext;
use crate::generator::{GenerateError, WorldGenerator};
use crate::simulator::{self, SimulationError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised by a timeline sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// Reading or writing a file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: std::path::PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Serialising the manifest failed.
    #[error("manifest serialisation failed: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The output directory already holds files.
    #[error("output directory {path} is not empty")]
    NotEmpty {
        /// The offending directory.
        path: std::path::PathBuf,
    },
}

/// Errors that abort a dataset run.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// The configuration is invalid or a content list could not be read.
    #[error("configuration error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// World generation failed.
    #[error("generation error: {source}")]
    Generate {
        /// The underlying generation error.
        #[from]
        source: GenerateError,
    },

    /// Simulation failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: SimulationError,
    },

    /// Encoding failed validation.
    #[error("planning error: {source}")]
    Planning {
        /// The underlying planning error.
        #[from]
        source: PlanningError,
    },

    /// The household broke an invariant.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The sink rejected a record.
    #[error("sink error: {source}")]
    Sink {
        /// The underlying sink error.
        #[from]
        source: SinkError,
    },
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Summary of a completed run. Written as the dataset manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Unique id of this run.
    pub run_id: Uuid,
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// Seed the run started from.
    pub seed: u64,
    /// Number of state-change records.
    pub state_changes: u32,
    /// Number of query records.
    pub queries: u32,
    /// Number of goal records.
    pub goals: u32,
}

impl RunSummary {
    /// Total number of timeline records.
    pub const fn records(&self) -> u32 {
        self.state_changes
            .saturating_add(self.queries)
            .saturating_add(self.goals)
    }
}

/// Receives the output of a dataset run.
pub trait TimelineSink {
    /// Accept the initial bundle. Called exactly once, first.
    fn begin(&mut self, bundle: &InitialBundle) -> Result<(), SinkError>;

    /// Accept the next record, in index order.
    fn record(&mut self, record: &TimelineRecord) -> Result<(), SinkError>;

    /// Accept the run summary. Called exactly once, last.
    fn finish(&mut self, summary: &RunSummary) -> Result<(), SinkError>;
}

/// Sink that keeps everything in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    /// The initial bundle, once received.
    pub bundle: Option<InitialBundle>,
    /// Records in arrival order.
    pub records: Vec<TimelineRecord>,
    /// The run summary, once received.
    pub summary: Option<RunSummary>,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimelineSink for MemorySink {
    fn begin(&mut self, bundle: &InitialBundle) -> Result<(), SinkError> {
        self.bundle = Some(bundle.clone());
        Ok(())
    }

    fn record(&mut self, record: &TimelineRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<(), SinkError> {
        self.summary = Some(summary.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Drives dataset runs for one configuration.
#[derive(Debug, Clone)]
pub struct TimelineDriver {
    config: GeneratorConfig,
    encoder: PlanningEncoder,
}

impl TimelineDriver {
    /// Driver over every registered entity type.
    pub fn new(config: GeneratorConfig) -> Result<Self, TimelineError> {
        Self::with_registry(config, Registry::standard())
    }

    /// Driver over a restricted registry.
    pub fn with_registry(config: GeneratorConfig, registry: Registry) -> Result<Self, TimelineError> {
        config.validate()?;
        let encoder = PlanningEncoder::new(
            registry,
            &config.planning.domain_name,
            &config.planning.problem_name,
        )?;
        Ok(Self { config, encoder })
    }

    /// The configuration this driver runs with.
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The encoder shared by every run.
    pub const fn encoder(&self) -> &PlanningEncoder {
        &self.encoder
    }

    /// Run one dataset seeded with `seed` into `sink`.
    pub fn run<S: TimelineSink + ?Sized>(
        &self,
        seed: u64,
        sink: &mut S,
    ) -> Result<RunSummary, TimelineError> {
        let mut ctx = GenerationContext::load(seed, &self.config.content)?;
        let world =
            WorldGenerator::new(self.encoder.registry(), &self.config.world).generate(&mut ctx)?;
        let mut household = world.household;

        sink.begin(&InitialBundle {
            narration: world.narration,
            domain: self.encoder.domain_text().to_owned(),
            problem: self.encoder.problem_text(&household)?,
            predicate_names: self.encoder.predicate_names(),
        })?;

        let mut run = Run {
            sink,
            next_index: 0,
            state_changes: 0,
            queries: 0,
            goals: 0,
        };
        let timeline = &self.config.timeline;
        for _ in 0..timeline.num_queries {
            for _ in 0..timeline.state_changes_per_query {
                self.state_change(&mut run, &mut household, &mut ctx)?;
                let goal_due = run
                    .state_changes
                    .checked_rem(timeline.state_changes_per_goal)
                    == Some(0);
                if goal_due {
                    self.goal(&mut run, &mut household, &mut ctx)?;
                }
            }
            let answer = simulator::query(&household, &mut ctx.rng)?;
            run.emit(TimelineStep::Query(answer))?;
            run.queries = run.queries.saturating_add(1);
        }

        let summary = RunSummary {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            seed,
            state_changes: run.state_changes,
            queries: run.queries,
            goals: run.goals,
        };
        run.sink.finish(&summary)?;
        info!(
            seed,
            run_id = %summary.run_id,
            records = summary.records(),
            "dataset run complete"
        );
        Ok(summary)
    }

    fn state_change<S: TimelineSink + ?Sized>(
        &self,
        run: &mut Run<'_, S>,
        household: &mut Household,
        ctx: &mut GenerationContext,
    ) -> Result<(), TimelineError> {
        let narration = simulator::state_change(household, &mut ctx.rng)?;
        household.check_invariants()?;
        let problem = self.encoder.problem_text(household)?;
        run.emit(TimelineStep::StateChange { narration, problem })?;
        run.state_changes = run.state_changes.saturating_add(1);
        Ok(())
    }

    /// Emit a goal record. The problem's `:init` is the state before the
    /// request; the household is left in the goal state.
    fn goal<S: TimelineSink + ?Sized>(
        &self,
        run: &mut Run<'_, S>,
        household: &mut Household,
        ctx: &mut GenerationContext,
    ) -> Result<(), TimelineError> {
        let before = self.encoder.problem(household)?;
        let goal = match simulator::goal(household, &mut ctx.rng) {
            Ok(goal) => goal,
            Err(SimulationError::NoGoalAvailable) => {
                warn!(index = run.next_index, "no goal available, skipping");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        household.check_invariants()?;
        let description = goal.description.clone();
        let problem = self.encoder.goal_problem_text(before, goal)?;
        run.emit(TimelineStep::Goal {
            description,
            problem,
        })?;
        run.goals = run.goals.saturating_add(1);
        Ok(())
    }
}

/// Mutable bookkeeping of one run.
struct Run<'s, S: TimelineSink + ?Sized> {
    sink: &'s mut S,
    next_index: u32,
    state_changes: u32,
    queries: u32,
    goals: u32,
}

impl<S: TimelineSink + ?Sized> Run<'_, S> {
    fn emit(&mut self, step: TimelineStep) -> Result<(), SinkError> {
        let record = TimelineRecord {
            index: self.next_index,
            step,
        };
        debug!(index = record.index, kind = record.step.label(), "record emitted");
        self.sink.record(&record)?;
        self.next_index = self.next_index.saturating_add(1);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::TimelineConfig;

    fn small_config(goal_every: u32) -> GeneratorConfig {
        GeneratorConfig {
            timeline: TimelineConfig {
                num_queries: 3,
                state_changes_per_query: 4,
                state_changes_per_goal: goal_every,
            },
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn timeline_interleaves_changes_and_queries() {
        let driver = TimelineDriver::new(small_config(0)).unwrap();
        let mut sink = MemorySink::new();
        let summary = driver.run(42, &mut sink).unwrap();

        let labels: Vec<&str> = sink.records.iter().map(|r| r.step.label()).collect();
        let mut expected = Vec::new();
        for _ in 0..3 {
            expected.extend(["state_change"; 4]);
            expected.push("query");
        }
        assert_eq!(labels, expected);
        assert_eq!(summary.records(), 15);
        assert_eq!(summary.goals, 0);
        for (i, record) in sink.records.iter().enumerate() {
            assert_eq!(usize::try_from(record.index).unwrap(), i);
        }
    }

    #[test]
    fn initial_bundle_carries_domain_and_problem() {
        let driver = TimelineDriver::new(small_config(0)).unwrap();
        let mut sink = MemorySink::new();
        driver.run(7, &mut sink).unwrap();

        let bundle = sink.bundle.unwrap();
        assert_eq!(bundle.domain, driver.encoder().domain_text());
        assert!(bundle.problem.starts_with("(define (problem simulation-a)"));
        assert!(bundle.problem.contains("\t\t(hand-empty me)\n"));
        assert_eq!(bundle.predicate_names.first().map(String::as_str), Some("in-hand"));
        assert!(!bundle.narration.is_empty());
    }

    #[test]
    fn goals_follow_every_nth_change() {
        let driver = TimelineDriver::new(small_config(2)).unwrap();
        let mut sink = MemorySink::new();
        let summary = driver.run(42, &mut sink).unwrap();

        assert_eq!(summary.state_changes, 12);
        assert!(summary.goals <= 6);
        for record in &sink.records {
            if let TimelineStep::Goal { problem, description } = &record.step {
                assert!(problem.contains("\t(:goal\n"));
                assert!(description.ends_with('.'));
            }
        }
    }

    #[test]
    fn same_seed_same_timeline() {
        let driver = TimelineDriver::new(small_config(3)).unwrap();
        let mut first = MemorySink::new();
        let mut second = MemorySink::new();
        driver.run(99, &mut first).unwrap();
        driver.run(99, &mut second).unwrap();
        assert_eq!(first.bundle, second.bundle);
        assert_eq!(first.records, second.records);
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = GeneratorConfig::default();
        config.world.max_rooms = 0;
        assert!(matches!(
            TimelineDriver::new(config),
            Err(TimelineError::Config { .. })
        ));
    }
}
