// crates/todo-contract-core/src/runtime/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Sequential execution of the scenario catalog for one session.
// Purpose: Produce one judged outcome per scenario and a run report.
// Dependencies: crate::{core, interfaces, runtime}, serde
// ============================================================================

//! ## Overview
//! The runner acquires a session once, then runs the selected scenarios in
//! catalog order. A failing scenario never stops later ones; every failure is
//! turned into a [`Verdict::Failed`] carrying its ordered reasons. The runner
//! reports start and finish of each scenario to the [`RunObserver`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::ScenarioId;
use crate::interfaces::RequestExecutor;
use crate::interfaces::RunEvent;
use crate::interfaces::RunObserver;
use crate::runtime::scenarios::ScenarioContext;
use crate::runtime::scenarios::run_scenario;
use crate::runtime::session::Session;
use crate::runtime::session::SessionError;
use crate::runtime::session::SessionManager;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default number of challenges `GET /challenges` must list.
pub const DEFAULT_EXPECTED_CHALLENGE_COUNT: usize = 59;
/// Default status expected for `PUT` on an unknown id.
pub const DEFAULT_REPLACE_UNKNOWN_STATUS: u16 = 404;

/// Tunable expectations for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Number of challenges the target lists.
    pub expected_challenge_count: usize,
    /// Status expected for `PUT /todos/{unknown}`.
    pub replace_unknown_status: u16,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            expected_challenge_count: DEFAULT_EXPECTED_CHALLENGE_COUNT,
            replace_unknown_status: DEFAULT_REPLACE_UNKNOWN_STATUS,
        }
    }
}

/// Resolves the scenarios to run, in catalog order.
///
/// An empty `only` list selects the whole catalog; `skip` is applied after.
#[must_use]
pub fn plan(only: &[ScenarioId], skip: &[ScenarioId]) -> Vec<ScenarioId> {
    ScenarioId::ALL
        .into_iter()
        .filter(|id| only.is_empty() || only.contains(id))
        .filter(|id| !skip.contains(id))
        .collect()
}

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Judgement for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Every check held.
    Passed,
    /// At least one check failed.
    Failed {
        /// Failure reasons in check order.
        reasons: Vec<String>,
    },
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    /// Scenario identifier.
    pub scenario: ScenarioId,
    /// Verdict.
    #[serde(flatten)]
    pub verdict: Verdict,
}

impl ScenarioOutcome {
    /// Returns true when the scenario passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.verdict, Verdict::Passed)
    }

    /// Returns the failure reasons (empty on pass).
    #[must_use]
    pub fn reasons(&self) -> &[String] {
        match &self.verdict {
            Verdict::Passed => &[],
            Verdict::Failed {
                reasons,
            } => reasons,
        }
    }
}

/// Outcomes of a whole run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-scenario outcomes.
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    /// Number of passed scenarios.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.passed()).count()
    }

    /// Number of failed scenarios.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    /// Returns true when every scenario passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(ScenarioOutcome::passed)
    }

    /// Returns the outcome for a scenario, if it ran.
    #[must_use]
    pub fn outcome(&self, scenario: ScenarioId) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|outcome| outcome.scenario == scenario)
    }
}

// ============================================================================
// SECTION: Runner
// ============================================================================

/// Runs scenarios against one session.
pub struct ScenarioRunner<'a> {
    /// Request executor.
    executor: &'a dyn RequestExecutor,
    /// Session for the whole run.
    session: Session,
    /// Tunable expectations.
    config: RunnerConfig,
    /// Event observer.
    observer: &'a dyn RunObserver,
}

impl<'a> ScenarioRunner<'a> {
    /// Creates a runner for an existing session.
    #[must_use]
    pub const fn new(
        executor: &'a dyn RequestExecutor,
        session: Session,
        config: RunnerConfig,
        observer: &'a dyn RunObserver,
    ) -> Self {
        Self {
            executor,
            session,
            config,
            observer,
        }
    }

    /// Acquires a session and creates a runner for it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when no session can be acquired.
    pub fn start(
        executor: &'a dyn RequestExecutor,
        config: RunnerConfig,
        observer: &'a dyn RunObserver,
    ) -> Result<Self, SessionError> {
        let session = SessionManager::acquire(executor)?;
        observer.record(&RunEvent::SessionAcquired {
            location: session.redacted_location(),
        });
        Ok(Self::new(executor, session, config, observer))
    }

    /// Runs one scenario and reports it to the observer.
    #[must_use]
    pub fn run_one(&self, scenario: ScenarioId) -> ScenarioOutcome {
        self.observer.record(&RunEvent::ScenarioStarted {
            scenario,
        });
        let ctx = ScenarioContext {
            executor: self.executor,
            session: &self.session,
            config: &self.config,
            observer: self.observer,
        };
        let verdict = match run_scenario(scenario, &ctx) {
            Ok(()) => Verdict::Passed,
            Err(err) => Verdict::Failed {
                reasons: err.reasons(),
            },
        };
        let outcome = ScenarioOutcome {
            scenario,
            verdict,
        };
        self.observer.record(&RunEvent::ScenarioFinished {
            scenario,
            passed: outcome.passed(),
            reasons: outcome.reasons().to_vec(),
        });
        outcome
    }

    /// Runs scenarios in the given order.
    #[must_use]
    pub fn run(&self, scenarios: &[ScenarioId]) -> RunReport {
        let report = RunReport {
            outcomes: scenarios.iter().map(|scenario| self.run_one(*scenario)).collect(),
        };
        self.observer.record(&RunEvent::RunFinished {
            passed: report.passed_count(),
            failed: report.failed_count(),
        });
        report
    }
}
