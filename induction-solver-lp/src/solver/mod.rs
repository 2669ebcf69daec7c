//! `LpSolver` implementation backed by `good_lp`.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use induction_core::{DecisionModel, Solver, SolverOutcome};
use log::{debug, warn};

use crate::lp::{LpOutcome, solve_model};

/// Configuration for [`LpSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LpSolverConfig {
    /// Wall-clock limit for one solve. `None` waits for the backend.
    pub time_limit: Option<Duration>,
}

/// Exact 0/1 solver using `good_lp` with the `microlp` backend.
///
/// The solver holds only configuration, so one instance can serve any number
/// of concurrent planning requests.
///
/// # Examples
/// ```
/// use induction_core::{Fleet, InductionPlanner, PlannerConfig, SolveStatus, Vehicle};
/// use induction_solver_lp::LpSolver;
///
/// let vehicles = (1..=10)
///     .map(|n| Vehicle::builder(format!("TS-{n:02}")).build())
///     .collect();
/// let fleet = Fleet::new(vehicles)?;
/// let config = PlannerConfig {
///     required_service_count: 7,
///     ..PlannerConfig::default()
/// };
/// let plan = InductionPlanner::new(LpSolver::new()).plan(&fleet, &config)?;
/// assert_eq!(plan.status(), SolveStatus::Optimal);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LpSolver {
    config: LpSolverConfig,
}

impl LpSolver {
    /// Construct a solver without a time limit.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(LpSolverConfig { time_limit: None })
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: LpSolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &LpSolverConfig {
        &self.config
    }
}

impl Solver for LpSolver {
    fn solve(&self, model: &DecisionModel) -> SolverOutcome {
        let started_at = Instant::now();
        let outcome = match self.config.time_limit {
            Some(limit) => solve_with_limit(model, limit),
            None => solve_model(model),
        };
        debug!(
            "microlp finished in {:?} over {} variables",
            started_at.elapsed(),
            model.variables().len()
        );
        interpret(outcome)
    }
}

fn interpret(outcome: LpOutcome) -> SolverOutcome {
    match outcome {
        LpOutcome::Solved(assignment) => SolverOutcome::Optimal(assignment),
        LpOutcome::Infeasible => SolverOutcome::Infeasible,
        LpOutcome::Failed(reason) => {
            warn!("LP backend produced no answer: {reason}");
            SolverOutcome::Unknown
        }
    }
}

fn solve_with_limit(model: &DecisionModel, limit: Duration) -> LpOutcome {
    let owned = model.clone();
    run_with_limit(move || solve_model(&owned), limit)
}

/// Run `job` on a worker thread and stop waiting after `limit`.
///
/// A worker that misses the deadline is detached; its result is discarded.
fn run_with_limit<F>(job: F, limit: Duration) -> LpOutcome
where
    F: FnOnce() -> LpOutcome + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    let spawned = thread::Builder::new()
        .name("induction-lp".to_owned())
        .spawn(move || {
            if sender.send(job()).is_err() {
                debug!("LP result arrived after the caller stopped waiting");
            }
        });
    if let Err(err) = spawned {
        return LpOutcome::Failed(format!("failed to start solver thread: {err}"));
    }
    match receiver.recv_timeout(limit) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => {
            LpOutcome::Failed(format!("no result within the {limit:?} time limit"))
        }
        Err(RecvTimeoutError::Disconnected) => {
            LpOutcome::Failed("solver thread stopped without a result".to_owned())
        }
    }
}
