//! Explains a solved assignment, one vehicle at a time.
//!
//! The analyzer reads solved flags and fleet state and never writes to
//! either. Each vehicle's status selects a rule family; within a family the
//! checks run in a fixed order, which doubles as the tie-break. For service,
//! SLA framing is checked before stabling position.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::decision::{DecisionVariables, Status, StatusVars};
use crate::fleet::{CLEANING_CYCLE_DAYS, ComplianceStatus, Fleet, RiskLevel, Vehicle, VehicleId};
use crate::model::Assignment;

/// Rule that explains an assignment.
///
/// `Display` renders the plain-language justification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justification {
    /// Service chosen to cover branding SLA exposure at the given level.
    SlaMitigation(RiskLevel),
    /// Service chosen because the vehicle needs no shunting.
    OptimalStabling,
    /// Service chosen to fill the quota.
    ServiceQuota,
    /// Healthy reserve.
    StandbyAvailability,
    /// Maintenance forced by a critical job card.
    CriticalJobCard,
    /// Maintenance forced by a lapsed certificate.
    ExpiredCertificate,
    /// Maintenance chosen by the objective.
    CostBenefit,
    /// Cleaning of an overdue vehicle; days past the cycle.
    CleaningOverdue {
        /// Days since last clean minus the cycle length.
        days_overdue: i64,
    },
    /// Routine cleaning slot.
    RoutineCleaning,
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SlaMitigation(level) => write!(
                f,
                "Prioritized for service to mitigate a '{level}' branding SLA penalty risk."
            ),
            Self::OptimalStabling => f.write_str(
                "Selected for service due to optimal depot position (zero shunting time).",
            ),
            Self::ServiceQuota => f.write_str("Assigned to meet daily service fleet requirement."),
            Self::StandbyAvailability => {
                f.write_str("Healthy and available; assigned to meet standby fleet requirement.")
            }
            Self::CriticalJobCard => {
                f.write_str("Mandatory maintenance due to a 'Critical' open job card.")
            }
            Self::ExpiredCertificate => {
                f.write_str("Mandatory maintenance due to an expired fitness certificate.")
            }
            Self::CostBenefit => {
                f.write_str("Assigned to maintenance based on model's cost-benefit analysis.")
            }
            Self::CleaningOverdue { days_overdue } => write!(
                f,
                "Prioritized for cleaning as it is {days_overdue} day(s) overdue for its \
                 {CLEANING_CYCLE_DAYS}-day deep clean."
            ),
            Self::RoutineCleaning => {
                f.write_str("Assigned to a cleaning slot to maintain schedule.")
            }
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Justification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Justification {
    /// Apply the rule family for `status` to `vehicle`.
    ///
    /// # Examples
    /// ```
    /// use induction_core::{ComplianceStatus, Justification, Status, Vehicle};
    ///
    /// let vehicle = Vehicle::builder("TS-07")
    ///     .cleaning(ComplianceStatus::Overdue, 20)
    ///     .build();
    /// let why = Justification::for_status(Status::BeingCleaned, &vehicle);
    /// assert!(why.to_string().contains("5 day(s) overdue"));
    /// ```
    #[must_use]
    pub fn for_status(status: Status, vehicle: &Vehicle) -> Self {
        match status {
            Status::InService => Self::for_service(vehicle),
            Status::OnStandby => Self::StandbyAvailability,
            Status::InMaintenance => Self::for_maintenance(vehicle),
            Status::BeingCleaned => Self::for_cleaning(vehicle),
        }
    }

    fn for_service(vehicle: &Vehicle) -> Self {
        let risk = vehicle.branding_risk();
        if matches!(risk, RiskLevel::Critical | RiskLevel::High) {
            Self::SlaMitigation(risk)
        } else if vehicle.shunting_minutes() == 0 {
            Self::OptimalStabling
        } else {
            Self::ServiceQuota
        }
    }

    fn for_maintenance(vehicle: &Vehicle) -> Self {
        if vehicle.has_critical_job() {
            Self::CriticalJobCard
        } else if vehicle.certificates().any_expired() {
            Self::ExpiredCertificate
        } else {
            Self::CostBenefit
        }
    }

    fn for_cleaning(vehicle: &Vehicle) -> Self {
        let cleaning = vehicle.cleaning();
        if cleaning.compliance == ComplianceStatus::Overdue {
            Self::CleaningOverdue {
                days_overdue: cleaning.days_overdue(),
            }
        } else {
            Self::RoutineCleaning
        }
    }
}

/// One vehicle's assignment and why it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PlanEntry {
    /// Vehicle identifier.
    pub vehicle_id: VehicleId,
    /// Solved status.
    pub assigned_status: Status,
    /// Explanation of the status.
    pub justification: Justification,
}

/// Errors raised when a solved assignment cannot be read per vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A vehicle does not have exactly one status flag set.
    #[error("vehicle '{vehicle_id}' has {true_flags} status flags set, expected exactly one")]
    AmbiguousStatus {
        /// Affected vehicle.
        vehicle_id: VehicleId,
        /// Number of flags that solved true.
        true_flags: usize,
    },
    /// A roster vehicle has no decision variables.
    #[error("vehicle '{0}' has no decision variables")]
    MissingDecision(VehicleId),
}

/// Read-only view over a solved assignment and the fleet it was built from.
#[derive(Debug, Clone, Copy)]
pub struct SolutionAnalyzer<'a> {
    fleet: &'a Fleet,
    decisions: &'a DecisionVariables,
    assignment: &'a Assignment,
}

impl<'a> SolutionAnalyzer<'a> {
    /// Borrow the inputs; nothing is copied or mutated.
    #[must_use]
    pub const fn new(
        fleet: &'a Fleet,
        decisions: &'a DecisionVariables,
        assignment: &'a Assignment,
    ) -> Self {
        Self {
            fleet,
            decisions,
            assignment,
        }
    }

    /// Solved status of one vehicle.
    pub fn status_of(&self, vehicle: &Vehicle) -> Result<Status, AnalysisError> {
        self.resolve(vehicle, self.decisions.get(vehicle.id()))
    }

    /// One justified entry per vehicle, in roster order.
    pub fn generate_plan(&self) -> Result<Vec<PlanEntry>, AnalysisError> {
        self.decisions
            .pair_with(self.fleet)
            .map(|(vehicle, vars)| {
                let status = self.resolve(vehicle, vars)?;
                Ok(PlanEntry {
                    vehicle_id: vehicle.id().clone(),
                    assigned_status: status,
                    justification: Justification::for_status(status, vehicle),
                })
            })
            .collect()
    }

    fn resolve(
        &self,
        vehicle: &Vehicle,
        vars: Option<&StatusVars>,
    ) -> Result<Status, AnalysisError> {
        let flags = vars.ok_or_else(|| AnalysisError::MissingDecision(vehicle.id().clone()))?;
        match flags.solved_statuses(self.assignment).as_slice() {
            [status] => Ok(*status),
            other => Err(AnalysisError::AmbiguousStatus {
                vehicle_id: vehicle.id().clone(),
                true_flags: other.len(),
            }),
        }
    }
}
