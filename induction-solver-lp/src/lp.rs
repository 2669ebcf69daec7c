//! `good_lp` modelling helpers for `LpSolver`.
//!
//! This module converts a [`DecisionModel`] into a binary program, runs
//! `microlp`, and translates the solved flags back into an [`Assignment`].

use good_lp::{
    Constraint, Expression, ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
    constraint, microlp, variable,
};
use induction_core::{Assignment, Comparison, DecisionModel, LinearExpr};

/// Flags at or above this value read as set.
const TRUE_THRESHOLD: f64 = 0.5;

/// Backend result before it is mapped onto a solver outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LpOutcome {
    Solved(Assignment),
    Infeasible,
    Failed(String),
}

#[expect(
    clippy::cast_precision_loss,
    reason = "model coefficients are bounded weights far below 2^53"
)]
const fn coefficient(value: i64) -> f64 {
    value as f64
}

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> Expression {
    let mut expression = Expression::from(0.0);
    for &(var, weight) in expr.terms() {
        if let Some(&lp_var) = vars.get(var.index()) {
            expression += coefficient(weight) * lp_var;
        }
    }
    expression
}

fn to_constraint(lhs: Expression, comparison: Comparison, rhs: i64) -> Constraint {
    let bound = coefficient(rhs);
    match comparison {
        Comparison::Equal => constraint::eq(lhs, bound),
        Comparison::AtMost => constraint::leq(lhs, bound),
        Comparison::AtLeast => constraint::geq(lhs, bound),
    }
}

/// Solve `model` to optimality with `microlp`.
///
/// Constraints without variables are checked directly; `microlp` is only
/// handed rows that mention at least one flag.
pub(crate) fn solve_model(model: &DecisionModel) -> LpOutcome {
    if model.variables().is_empty() {
        let empty = Assignment::from_values(Vec::new());
        return if model.verify(&empty).is_ok() {
            LpOutcome::Solved(empty)
        } else {
            LpOutcome::Infeasible
        };
    }

    let mut problem_vars = ProblemVariables::new();
    let vars: Vec<Variable> = model
        .variables()
        .iter()
        .map(|var| problem_vars.add(variable().binary().name(var.name())))
        .collect();

    let objective = to_expression(model.objective(), &vars);
    let mut problem = problem_vars.maximise(objective).using(microlp);
    for row in model.constraints() {
        if row.expr().is_empty() {
            if row.comparison().holds(0, row.rhs()) {
                continue;
            }
            return LpOutcome::Infeasible;
        }
        problem = problem.with(to_constraint(
            to_expression(row.expr(), &vars),
            row.comparison(),
            row.rhs(),
        ));
    }

    match problem.solve() {
        Ok(solution) => LpOutcome::Solved(Assignment::from_values(
            vars.iter()
                .map(|&var| solution.value(var) >= TRUE_THRESHOLD)
                .collect(),
        )),
        Err(ResolutionError::Infeasible) => LpOutcome::Infeasible,
        Err(err) => LpOutcome::Failed(err.to_string()),
    }
}
