//! Core domain types and decision logic for the fleet induction planner.
//!
//! A planning run turns an immutable [`Fleet`] snapshot and a
//! [`PlannerConfig`] into a [`DecisionModel`] with four status flags per
//! vehicle, hard constraints and a weighted objective. A [`Solver`] decides
//! the flags and the [`SolutionAnalyzer`] explains every assignment.
//!
//! # Examples
//! ```
//! use induction_core::{
//!     DecisionModel, Fleet, InductionPlanner, PlanError, PlannerConfig, Solver, SolverOutcome,
//!     Vehicle,
//! };
//!
//! struct GiveUp;
//!
//! impl Solver for GiveUp {
//!     fn solve(&self, _model: &DecisionModel) -> SolverOutcome {
//!         SolverOutcome::Infeasible
//!     }
//! }
//!
//! let fleet = Fleet::new(vec![Vehicle::builder("TS-01").build()])?;
//! let result = InductionPlanner::new(GiveUp).plan(&fleet, &PlannerConfig::default());
//! assert_eq!(result, Err(PlanError::Infeasible));
//! # Ok::<(), induction_core::FleetError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod analyzer;
pub mod config;
pub mod constraints;
pub mod decision;
pub mod fleet;
pub mod model;
pub mod objective;
pub mod planner;
pub mod solver;
pub mod source;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use analyzer::{AnalysisError, Justification, PlanEntry, SolutionAnalyzer};
pub use config::{PlannerConfig, PlannerConfigError, PlannerOverrides, SERVICE_FLEET_RANGE};
pub use constraints::apply_hard_constraints;
pub use decision::{DecisionVariables, Status, StatusVars};
pub use fleet::{
    CLEANING_CYCLE_DAYS, CertificateStatus, Certificates, CleaningState, ComplianceStatus, Fleet,
    FleetError, JobPriority, ParseLevelError, RiskLevel, Vehicle, VehicleBuilder, VehicleId,
};
pub use model::{
    Assignment, AssignmentError, BoolVar, Comparison, DecisionModel, LinearConstraint, LinearExpr,
    VarId,
};
pub use objective::{
    cleaning_coefficient, cleaning_score, define_objective, mileage_penalty, service_coefficient,
    sla_score,
};
pub use planner::{
    InductionModel, InductionPlan, InductionPlanner, NOT_PROVEN_OPTIMAL_ALERT, PlanError,
    StatusCounts,
};
pub use solver::{SolveStatus, Solver, SolverOutcome};
pub use source::{FleetSource, FleetSourceError};
