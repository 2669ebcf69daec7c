//! Weighted business objective.
//!
//! Every term is multiplied by the decision flag of the status it rewards or
//! penalises, so a vehicle only contributes for the status it is actually
//! given. This keeps "reward the chosen state" linear.

use crate::config::PlannerConfig;
use crate::decision::DecisionVariables;
use crate::fleet::{ComplianceStatus, Fleet, RiskLevel, Vehicle};
use crate::model::{DecisionModel, LinearExpr};

/// Points of branding SLA exposure covered by putting a vehicle into service.
#[must_use]
pub const fn sla_score(risk: RiskLevel) -> i64 {
    match risk {
        RiskLevel::Critical => 3,
        RiskLevel::High => 1,
        RiskLevel::Medium | RiskLevel::Low => 0,
    }
}

/// Points of mileage urgency incurred by putting a vehicle into service.
#[must_use]
pub const fn mileage_penalty(urgency: RiskLevel) -> i64 {
    match urgency {
        RiskLevel::Critical => 3,
        RiskLevel::High => 1,
        RiskLevel::Medium | RiskLevel::Low => 0,
    }
}

/// Reward for cleaning a vehicle with the given compliance.
#[must_use]
pub const fn cleaning_score(compliance: ComplianceStatus) -> i64 {
    match compliance {
        ComplianceStatus::Overdue => 1,
        ComplianceStatus::DueSoon | ComplianceStatus::Compliant => 0,
    }
}

/// Net objective contribution of putting a vehicle into service.
///
/// # Examples
/// ```
/// use induction_core::{PlannerConfig, RiskLevel, Vehicle, service_coefficient};
///
/// let vehicle = Vehicle::builder("TS-01")
///     .branding_risk(RiskLevel::Critical)
///     .mileage_urgency(RiskLevel::High)
///     .shunting_minutes(4)
///     .build();
/// // 50 * 3 - 10 * 1 - 5 * 4
/// assert_eq!(service_coefficient(&vehicle, &PlannerConfig::default()), 120);
/// ```
#[must_use]
pub fn service_coefficient(vehicle: &Vehicle, config: &PlannerConfig) -> i64 {
    let sla = i64::from(config.weight_sla).saturating_mul(sla_score(vehicle.branding_risk()));
    let mileage =
        i64::from(config.weight_mileage).saturating_mul(mileage_penalty(vehicle.mileage_urgency()));
    let shunting =
        i64::from(config.weight_shunting).saturating_mul(i64::from(vehicle.shunting_minutes()));
    sla.saturating_sub(mileage).saturating_sub(shunting)
}

/// Objective coefficient of a vehicle's `being_cleaned` flag.
#[must_use]
pub fn cleaning_coefficient(vehicle: &Vehicle, config: &PlannerConfig) -> i64 {
    i64::from(config.weight_cleaning).saturating_mul(cleaning_score(vehicle.cleaning().compliance))
}

/// Set the model's objective to the weighted, flag-gated sum over the fleet.
///
/// Per vehicle: `+weight_sla * sla * in_service`,
/// `+weight_cleaning * cleaning * being_cleaned`,
/// `-weight_mileage * mileage * in_service` and
/// `-weight_shunting * minutes * in_service`. The three in-service terms are
/// folded into one [`service_coefficient`]. Standby and maintenance carry no
/// reward.
pub fn define_objective(
    model: &mut DecisionModel,
    fleet: &Fleet,
    decisions: &DecisionVariables,
    config: &PlannerConfig,
) {
    let mut objective = LinearExpr::new();
    for (vehicle, vars) in decisions.matched(fleet) {
        objective.add_term(vars.in_service, service_coefficient(vehicle, config));
        objective.add_term(vars.being_cleaned, cleaning_coefficient(vehicle, config));
    }
    model.maximise(objective);
}
