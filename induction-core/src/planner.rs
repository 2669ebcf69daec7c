//! Solve orchestration: build, solve, classify, then explain.
//!
//! Failure classification happens here and only here. The builder, encoder
//! and composer never see solver results, and the analyzer only runs once a
//! usable, verified assignment exists.

use log::{debug, info, warn};
#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

use crate::analyzer::{AnalysisError, PlanEntry, SolutionAnalyzer};
use crate::config::PlannerConfig;
use crate::constraints::apply_hard_constraints;
use crate::decision::{DecisionVariables, Status};
use crate::fleet::Fleet;
use crate::model::{Assignment, AssignmentError, DecisionModel};
use crate::objective::define_objective;
use crate::solver::{SolveStatus, Solver, SolverOutcome};

/// Advisory attached to plans whose optimality was not proven.
pub const NOT_PROVEN_OPTIMAL_ALERT: &str =
    "Solver returned a feasible plan that is not proven optimal.";

/// A fully constrained model together with its per-vehicle variables.
///
/// Built fresh for every solve; two builds over the same input are equal but
/// share nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InductionModel {
    model: DecisionModel,
    decisions: DecisionVariables,
}

impl InductionModel {
    /// Create variables, hard constraints and the objective.
    ///
    /// # Examples
    /// ```
    /// use induction_core::{Fleet, InductionModel, PlannerConfig, Vehicle};
    ///
    /// let fleet = Fleet::new(vec![Vehicle::builder("TS-01").build()])?;
    /// let built = InductionModel::build(&fleet, &PlannerConfig::default());
    /// assert_eq!(built.model().variables().len(), 4);
    /// assert_eq!(built, InductionModel::build(&fleet, &PlannerConfig::default()));
    /// # Ok::<(), induction_core::FleetError>(())
    /// ```
    #[must_use]
    pub fn build(fleet: &Fleet, config: &PlannerConfig) -> Self {
        let mut model = DecisionModel::new();
        let decisions = DecisionVariables::create(&mut model, fleet);
        apply_hard_constraints(&mut model, fleet, &decisions, config);
        define_objective(&mut model, fleet, &decisions, config);
        debug!(
            "built induction model: {} vehicles, {} variables, {} constraints, {} objective terms",
            fleet.len(),
            model.variables().len(),
            model.constraints().len(),
            model.objective().terms().len()
        );
        Self { model, decisions }
    }

    /// The linear model handed to the solver.
    #[must_use]
    pub const fn model(&self) -> &DecisionModel {
        &self.model
    }

    /// Per-vehicle status variables.
    #[must_use]
    pub const fn decisions(&self) -> &DecisionVariables {
        &self.decisions
    }
}

/// Number of vehicles per status in a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StatusCounts {
    /// Vehicles in service.
    pub in_service: usize,
    /// Vehicles on standby.
    pub on_standby: usize,
    /// Vehicles in maintenance.
    pub in_maintenance: usize,
    /// Vehicles being cleaned.
    pub being_cleaned: usize,
}

impl StatusCounts {
    /// Count for one status.
    #[must_use]
    pub const fn get(&self, status: Status) -> usize {
        match status {
            Status::InService => self.in_service,
            Status::OnStandby => self.on_standby,
            Status::InMaintenance => self.in_maintenance,
            Status::BeingCleaned => self.being_cleaned,
        }
    }

    fn record(&mut self, status: Status) {
        let slot = match status {
            Status::InService => &mut self.in_service,
            Status::OnStandby => &mut self.on_standby,
            Status::InMaintenance => &mut self.in_maintenance,
            Status::BeingCleaned => &mut self.being_cleaned,
        };
        *slot = slot.saturating_add(1);
    }
}

/// A justified plan for the whole fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct InductionPlan {
    status: SolveStatus,
    objective_value: i64,
    entries: Vec<PlanEntry>,
    alerts: Vec<String>,
}

impl InductionPlan {
    /// [`SolveStatus::Optimal`] or [`SolveStatus::Feasible`].
    #[must_use]
    pub const fn status(&self) -> SolveStatus {
        self.status
    }

    /// Objective value of the chosen assignment.
    #[must_use]
    pub const fn objective_value(&self) -> i64 {
        self.objective_value
    }

    /// Entries in roster order.
    #[must_use]
    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Advisory alerts; empty for proven-optimal plans.
    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Consume the plan, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<PlanEntry> {
        self.entries
    }

    /// Vehicles per status.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        self.entries
            .iter()
            .fold(StatusCounts::default(), |mut counts, entry| {
                counts.record(entry.assigned_status);
                counts
            })
    }
}

/// Errors returned by [`InductionPlanner::plan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// No assignment satisfies the constraints.
    #[error(
        "no feasible plan exists for the requested quotas; relax the service, standby, \
         maintenance or cleaning limits and try again"
    )]
    Infeasible,
    /// The solver produced no usable answer.
    #[error("the solver could not determine a plan")]
    Unknown,
    /// The solver reported success with an assignment the model rejects.
    #[error("solver returned an invalid assignment: {0}")]
    InvalidAssignment(#[from] AssignmentError),
    /// The assignment could not be explained per vehicle.
    #[error("failed to analyse solution: {0}")]
    Analysis(#[from] AnalysisError),
}

impl PlanError {
    /// Solve status behind the failure.
    #[must_use]
    pub const fn status(&self) -> SolveStatus {
        match self {
            Self::Infeasible => SolveStatus::Infeasible,
            Self::Unknown | Self::InvalidAssignment(_) | Self::Analysis(_) => SolveStatus::Unknown,
        }
    }
}

/// Runs the full pipeline against a [`Solver`].
///
/// Every call builds its own model, so a planner can serve concurrent
/// requests when its solver allows it.
#[derive(Debug, Clone, Default)]
pub struct InductionPlanner<S> {
    solver: S,
}

impl<S: Solver> InductionPlanner<S> {
    /// Wrap a solver.
    #[must_use]
    pub const fn new(solver: S) -> Self {
        Self { solver }
    }

    /// Borrow the solver.
    #[must_use]
    pub const fn solver(&self) -> &S {
        &self.solver
    }

    /// Build, solve, classify and justify.
    ///
    /// Infeasible and unknown outcomes are reported once, as-is; no partial
    /// plan is synthesised and nothing is retried.
    pub fn plan(&self, fleet: &Fleet, config: &PlannerConfig) -> Result<InductionPlan, PlanError> {
        let built = InductionModel::build(fleet, config);
        let outcome = self.solver.solve(built.model());
        let status = outcome.status();
        info!("induction solve finished with status {status}");

        let (assignment, alerts) = match outcome {
            SolverOutcome::Optimal(assignment) => (assignment, Vec::new()),
            SolverOutcome::Feasible(assignment) => {
                warn!("{NOT_PROVEN_OPTIMAL_ALERT}");
                (assignment, vec![NOT_PROVEN_OPTIMAL_ALERT.to_owned()])
            }
            SolverOutcome::Infeasible => {
                warn!(
                    "induction model infeasible: {} vehicles, {} unsafe, config {config:?}",
                    fleet.len(),
                    fleet.unsafe_count()
                );
                return Err(PlanError::Infeasible);
            }
            SolverOutcome::Unknown => {
                warn!("solver returned no usable plan");
                return Err(PlanError::Unknown);
            }
        };

        explain(&built, fleet, &assignment, status, alerts)
    }
}

fn explain(
    built: &InductionModel,
    fleet: &Fleet,
    assignment: &Assignment,
    status: SolveStatus,
    alerts: Vec<String>,
) -> Result<InductionPlan, PlanError> {
    built.model().verify(assignment)?;
    let entries = SolutionAnalyzer::new(fleet, built.decisions(), assignment).generate_plan()?;
    Ok(InductionPlan {
        status,
        objective_value: built.model().objective().evaluate(assignment),
        entries,
        alerts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::Vehicle;
    use crate::test_support::ScriptedSolver;
    use rstest::{fixture, rstest};

    #[fixture]
    fn fleet() -> Fleet {
        Fleet::new(vec![
            Vehicle::builder("A").build(),
            Vehicle::builder("B").build(),
        ])
        .unwrap()
    }

    #[fixture]
    fn config() -> PlannerConfig {
        PlannerConfig {
            required_service_count: 1,
            min_standby_count: 1,
            ..PlannerConfig::default()
        }
    }

    fn service_then_standby() -> Assignment {
        Assignment::from_values(vec![
            true, false, false, false, //
            false, true, false, false,
        ])
    }

    #[rstest]
    fn optimal_outcome_has_no_alerts(fleet: Fleet, config: PlannerConfig) {
        let planner = InductionPlanner::new(ScriptedSolver::optimal(service_then_standby()));
        let plan = planner.plan(&fleet, &config).unwrap();
        assert_eq!(plan.status(), SolveStatus::Optimal);
        assert!(plan.alerts().is_empty());
        assert_eq!(plan.status_counts().get(Status::InService), 1);
        assert_eq!(plan.status_counts().get(Status::OnStandby), 1);
    }

    #[rstest]
    fn feasible_outcome_carries_advisory(fleet: Fleet, config: PlannerConfig) {
        let planner = InductionPlanner::new(ScriptedSolver::feasible(service_then_standby()));
        let plan = planner.plan(&fleet, &config).unwrap();
        assert_eq!(plan.status(), SolveStatus::Feasible);
        assert_eq!(plan.alerts(), [NOT_PROVEN_OPTIMAL_ALERT]);
        assert_eq!(plan.entries().len(), 2);
    }

    #[rstest]
    #[case(ScriptedSolver::infeasible(), PlanError::Infeasible)]
    #[case(ScriptedSolver::unknown(), PlanError::Unknown)]
    fn unusable_outcomes_yield_no_plan(
        fleet: Fleet,
        config: PlannerConfig,
        #[case] solver: ScriptedSolver,
        #[case] expected: PlanError,
    ) {
        let err = InductionPlanner::new(solver).plan(&fleet, &config).unwrap_err();
        assert_eq!(err, expected);
    }

    #[rstest]
    fn assignments_breaking_constraints_are_rejected(fleet: Fleet, config: PlannerConfig) {
        let both_in_service = Assignment::from_values(vec![
            true, false, false, false, //
            true, false, false, false,
        ]);
        let err = InductionPlanner::new(ScriptedSolver::optimal(both_in_service))
            .plan(&fleet, &config)
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidAssignment(AssignmentError::Violated { .. })));
        assert_eq!(err.status(), SolveStatus::Unknown);
    }

    #[rstest]
    fn infeasible_error_suggests_relaxing_limits() {
        assert!(PlanError::Infeasible.to_string().contains("relax"));
    }
}
