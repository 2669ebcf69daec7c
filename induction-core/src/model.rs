//! Solver-neutral linear model over boolean decision variables.
//!
//! The vocabulary is deliberately small: 0/1 variables, integer linear
//! expressions, `==`/`<=`/`>=` constraints and one maximisation objective.
//! Backends translate a [`DecisionModel`] into their own representation and
//! hand back an [`Assignment`].

use std::fmt;

use thiserror::Error;

/// Handle to a boolean variable registered in a [`DecisionModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    /// Position of the variable in registration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A named 0/1 decision variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolVar {
    name: String,
}

impl BoolVar {
    /// Deterministic variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Integer-weighted sum of boolean variables.
///
/// # Examples
/// ```
/// use induction_core::{Assignment, DecisionModel, LinearExpr};
///
/// let mut model = DecisionModel::new();
/// let a = model.new_bool_var("a");
/// let b = model.new_bool_var("b");
/// let mut expr = LinearExpr::new();
/// expr.add_term(a, 3);
/// expr.add_term(b, -2);
/// let assignment = Assignment::from_values(vec![true, true]);
/// assert_eq!(expr.evaluate(&assignment), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinearExpr {
    terms: Vec<(VarId, i64)>,
}

impl LinearExpr {
    /// Empty expression.
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Unit-coefficient sum of the given variables.
    #[must_use]
    pub fn sum<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = VarId>,
    {
        Self {
            terms: vars.into_iter().map(|var| (var, 1)).collect(),
        }
    }

    /// Append `coefficient * var`. Zero coefficients are dropped.
    pub fn add_term(&mut self, var: VarId, coefficient: i64) {
        if coefficient != 0 {
            self.terms.push((var, coefficient));
        }
    }

    /// Terms in insertion order.
    #[must_use]
    pub fn terms(&self) -> &[(VarId, i64)] {
        &self.terms
    }

    /// Whether the expression has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Value under an assignment; unassigned variables count as 0.
    #[must_use]
    pub fn evaluate(&self, assignment: &Assignment) -> i64 {
        self.terms
            .iter()
            .filter(|(var, _)| assignment.value(*var).unwrap_or(false))
            .fold(0_i64, |acc, (_, coefficient)| acc.saturating_add(*coefficient))
    }
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `expr == rhs`
    Equal,
    /// `expr <= rhs`
    AtMost,
    /// `expr >= rhs`
    AtLeast,
}

impl Comparison {
    /// Whether `lhs` relates to `rhs` as required.
    #[must_use]
    pub const fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Self::Equal => lhs == rhs,
            Self::AtMost => lhs <= rhs,
            Self::AtLeast => lhs >= rhs,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "==",
            Self::AtMost => "<=",
            Self::AtLeast => ">=",
        })
    }
}

/// A named linear constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConstraint {
    name: String,
    expr: LinearExpr,
    comparison: Comparison,
    rhs: i64,
}

impl LinearConstraint {
    /// Deterministic constraint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Left-hand side.
    #[must_use]
    pub const fn expr(&self) -> &LinearExpr {
        &self.expr
    }

    /// Relation.
    #[must_use]
    pub const fn comparison(&self) -> Comparison {
        self.comparison
    }

    /// Right-hand side.
    #[must_use]
    pub const fn rhs(&self) -> i64 {
        self.rhs
    }

    /// Whether an assignment satisfies the constraint.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.comparison.holds(self.expr.evaluate(assignment), self.rhs)
    }
}

/// Errors returned by [`DecisionModel::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentError {
    /// The assignment does not cover exactly the model's variables.
    #[error("assignment has {actual} values but the model has {expected} variables")]
    WrongLength {
        /// Variables in the model.
        expected: usize,
        /// Values in the assignment.
        actual: usize,
    },
    /// A constraint does not hold.
    #[error("assignment violates constraint '{constraint}'")]
    Violated {
        /// Name of the first violated constraint.
        constraint: String,
    },
}

/// A complete 0/1 model: variables, constraints and a maximisation objective.
///
/// Each solve owns a freshly built model; nothing in it is shared.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecisionModel {
    variables: Vec<BoolVar>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl DecisionModel {
    /// Empty model.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: LinearExpr::new(),
        }
    }

    /// Register a boolean variable.
    pub fn new_bool_var(&mut self, name: impl Into<String>) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(BoolVar { name: name.into() });
        id
    }

    /// Add `expr <comparison> rhs`.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        expr: LinearExpr,
        comparison: Comparison,
        rhs: i64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            expr,
            comparison,
            rhs,
        });
    }

    /// Replace the objective with `maximise expr`.
    pub fn maximise(&mut self, expr: LinearExpr) {
        self.objective = expr;
    }

    /// Variables in registration order.
    #[must_use]
    pub fn variables(&self) -> &[BoolVar] {
        &self.variables
    }

    /// Name of a variable, if registered.
    #[must_use]
    pub fn variable_name(&self, var: VarId) -> Option<&str> {
        self.variables.get(var.0).map(BoolVar::name)
    }

    /// Constraints in insertion order.
    #[must_use]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Expression to maximise.
    #[must_use]
    pub const fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Check that an assignment covers every variable and satisfies every
    /// constraint.
    pub fn verify(&self, assignment: &Assignment) -> Result<(), AssignmentError> {
        if assignment.len() != self.variables.len() {
            return Err(AssignmentError::WrongLength {
                expected: self.variables.len(),
                actual: assignment.len(),
            });
        }
        match self
            .constraints
            .iter()
            .find(|constraint| !constraint.is_satisfied_by(assignment))
        {
            Some(violated) => Err(AssignmentError::Violated {
                constraint: violated.name.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Solved 0/1 values, indexed by [`VarId`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    values: Vec<bool>,
}

impl Assignment {
    /// Wrap values in variable registration order.
    #[must_use]
    pub const fn from_values(values: Vec<bool>) -> Self {
        Self { values }
    }

    /// Value of a variable, `None` when out of range.
    #[must_use]
    pub fn value(&self, var: VarId) -> Option<bool> {
        self.values.get(var.0).copied()
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the assignment is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
