//! Test-only fleets, a scripted solver and an in-memory fleet source used by
//! unit and behaviour tests.

use crate::fleet::{CertificateStatus, Certificates, Fleet, Vehicle};
use crate::model::{Assignment, DecisionModel};
use crate::solver::{Solver, SolverOutcome};
use crate::source::{FleetSource, FleetSourceError};

/// Roster id for a one-based position, e.g. `TS-07`.
#[must_use]
pub fn vehicle_id(position: usize) -> String {
    format!("TS-{position:02}")
}

/// Healthy vehicle with no exposure and zero shunting.
#[must_use]
pub fn healthy_vehicle(position: usize) -> Vehicle {
    Vehicle::builder(vehicle_id(position)).build()
}

/// Vehicle locked out by an expired rolling-stock certificate.
#[must_use]
pub fn expired_vehicle(position: usize) -> Vehicle {
    Vehicle::builder(vehicle_id(position))
        .certificates(Certificates {
            rolling_stock: CertificateStatus::Expired,
            ..Certificates::ALL_VALID
        })
        .build()
}

/// `size` healthy vehicles with ids `TS-01..`.
#[must_use]
pub fn healthy_fleet(size: usize) -> Fleet {
    fleet_with_unsafe(size, 0)
}

/// `size` vehicles whose first `unsafe_count` have an expired certificate.
///
/// # Panics
/// Never in practice: generated ids are unique.
#[expect(clippy::expect_used, reason = "generated ids are unique by construction")]
#[must_use]
pub fn fleet_with_unsafe(size: usize, unsafe_count: usize) -> Fleet {
    let vehicles = (1..=size)
        .map(|position| {
            if position <= unsafe_count {
                expired_vehicle(position)
            } else {
                healthy_vehicle(position)
            }
        })
        .collect();
    Fleet::new(vehicles).expect("generated fleet ids are unique")
}

/// Solver that ignores the model and returns a fixed outcome.
#[derive(Debug, Clone)]
pub struct ScriptedSolver {
    outcome: SolverOutcome,
}

impl ScriptedSolver {
    /// Always report the given outcome.
    #[must_use]
    pub const fn new(outcome: SolverOutcome) -> Self {
        Self { outcome }
    }

    /// Report a proven-optimal assignment.
    #[must_use]
    pub const fn optimal(assignment: Assignment) -> Self {
        Self::new(SolverOutcome::Optimal(assignment))
    }

    /// Report a feasible, unproven assignment.
    #[must_use]
    pub const fn feasible(assignment: Assignment) -> Self {
        Self::new(SolverOutcome::Feasible(assignment))
    }

    /// Report infeasibility.
    #[must_use]
    pub const fn infeasible() -> Self {
        Self::new(SolverOutcome::Infeasible)
    }

    /// Report an unknown outcome.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::new(SolverOutcome::Unknown)
    }
}

impl Solver for ScriptedSolver {
    fn solve(&self, _model: &DecisionModel) -> SolverOutcome {
        self.outcome.clone()
    }
}

/// In-memory [`FleetSource`]; `None` simulates a missing dataset.
#[derive(Debug, Clone, Default)]
pub struct MemoryFleetSource {
    fleet: Option<Fleet>,
}

impl MemoryFleetSource {
    /// Source backed by a fleet.
    #[must_use]
    pub const fn with_fleet(fleet: Fleet) -> Self {
        Self { fleet: Some(fleet) }
    }

    /// Source whose dataset is missing.
    #[must_use]
    pub const fn missing() -> Self {
        Self { fleet: None }
    }
}

impl FleetSource for MemoryFleetSource {
    fn load_fleet(&self) -> Result<Fleet, FleetSourceError> {
        self.fleet
            .clone()
            .ok_or_else(|| FleetSourceError::unavailable("in-memory fleet not configured"))
    }
}
