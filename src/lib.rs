//! Facade crate for the fleet induction planner.
//!
//! This crate re-exports the core planning types and exposes the optional
//! linear-programming solver and JSON fleet source behind feature flags.
//!
//! # Examples
//! ```
//! # #[cfg(feature = "solver-lp")]
//! # {
//! use induction_engine::{Fleet, InductionPlanner, LpSolver, PlannerConfig, Status, Vehicle};
//!
//! let vehicles = (1..=12)
//!     .map(|n| Vehicle::builder(format!("TS-{n:02}")).build())
//!     .collect();
//! let fleet = Fleet::new(vehicles)?;
//! let plan = InductionPlanner::new(LpSolver::new()).plan(&fleet, &PlannerConfig::default())?;
//! assert_eq!(plan.status_counts().get(Status::InService), 8);
//! # }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub use induction_core::{
    CertificateStatus, Certificates, ComplianceStatus, DecisionModel, Fleet, FleetError,
    FleetSource, FleetSourceError, InductionModel, InductionPlan, InductionPlanner, JobPriority,
    Justification, PlanEntry, PlanError, PlannerConfig, PlannerConfigError, PlannerOverrides,
    RiskLevel, SolveStatus, Solver, SolverOutcome, Status, StatusCounts, Vehicle, VehicleBuilder,
    VehicleId,
};

#[cfg(feature = "data")]
pub use induction_data::{JsonFleetSource, VehicleRecord};

#[cfg(feature = "solver-lp")]
pub use induction_solver_lp::{LpSolver, LpSolverConfig};
