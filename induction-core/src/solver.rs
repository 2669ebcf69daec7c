//! Boundary to the external optimisation capability.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::model::{Assignment, DecisionModel};

/// Four-way classification of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum SolveStatus {
    /// Best possible assignment found.
    Optimal,
    /// Valid assignment found, optimality unproven.
    Feasible,
    /// No assignment satisfies the constraints.
    Infeasible,
    /// The solver gave up, timed out or failed internally.
    Unknown,
}

impl SolveStatus {
    /// Whether a usable assignment accompanies this status.
    #[must_use]
    pub const fn has_solution(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }

    /// Upper-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Feasible => "FEASIBLE",
            Self::Infeasible => "INFEASIBLE",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of handing a [`DecisionModel`] to a [`Solver`].
///
/// Solved variants carry a value for every variable, so a status can never be
/// reported as solved without an assignment to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverOutcome {
    /// Proven-optimal assignment.
    Optimal(Assignment),
    /// Valid but not proven optimal.
    Feasible(Assignment),
    /// Constraints admit no assignment.
    Infeasible,
    /// No usable answer.
    Unknown,
}

impl SolverOutcome {
    /// Status without the payload.
    #[must_use]
    pub const fn status(&self) -> SolveStatus {
        match self {
            Self::Optimal(_) => SolveStatus::Optimal,
            Self::Feasible(_) => SolveStatus::Feasible,
            Self::Infeasible => SolveStatus::Infeasible,
            Self::Unknown => SolveStatus::Unknown,
        }
    }
}

/// Solve a 0/1 linear maximisation model.
///
/// Implementations report backend faults and time-outs as
/// [`SolverOutcome::Unknown`] rather than panicking. Solvers must be
/// `Send + Sync` so independent planning requests can each call one.
pub trait Solver: Send + Sync {
    /// Solve `model`, returning the classified outcome.
    fn solve(&self, model: &DecisionModel) -> SolverOutcome;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&self, model: &DecisionModel) -> SolverOutcome {
        (**self).solve(model)
    }
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, model: &DecisionModel) -> SolverOutcome {
        (**self).solve(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct DummySolver;

    impl Solver for DummySolver {
        fn solve(&self, model: &DecisionModel) -> SolverOutcome {
            if model.variables().is_empty() {
                SolverOutcome::Unknown
            } else {
                SolverOutcome::Optimal(Assignment::from_values(vec![
                    false;
                    model.variables().len()
                ]))
            }
        }
    }

    #[rstest]
    fn boxed_solvers_delegate() {
        let solver: Box<dyn Solver> = Box::new(DummySolver);
        let mut model = DecisionModel::new();
        assert_eq!(solver.solve(&model).status(), SolveStatus::Unknown);
        model.new_bool_var("x");
        assert_eq!(solver.solve(&model).status(), SolveStatus::Optimal);
    }

    #[rstest]
    #[case(SolveStatus::Optimal, true)]
    #[case(SolveStatus::Feasible, true)]
    #[case(SolveStatus::Infeasible, false)]
    #[case(SolveStatus::Unknown, false)]
    fn only_solved_statuses_have_solutions(#[case] status: SolveStatus, #[case] expected: bool) {
        assert_eq!(status.has_solution(), expected);
    }
}
