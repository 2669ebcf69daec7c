//! Hard operational rules: quotas, capacities, exclusivity and safety lockout.
//!
//! The encoder only adds constraints. Whether they admit a solution is for the
//! solver to decide; an impossible quota must surface as infeasibility rather
//! than being clamped here.

use crate::config::PlannerConfig;
use crate::decision::{DecisionVariables, Status};
use crate::fleet::Fleet;
use crate::model::{Comparison, DecisionModel, LinearExpr};

/// Add every hard constraint for `fleet` under `config`.
///
/// - in-service count `==` `required_service_count`
/// - standby count `>=` `min_standby_count`
/// - maintenance count `<=` `max_maintenance_count`
/// - cleaning count `<=` `max_cleaning_count`
/// - per vehicle, exactly one status flag set
/// - unsafe vehicles never in service or on standby
pub fn apply_hard_constraints(
    model: &mut DecisionModel,
    fleet: &Fleet,
    decisions: &DecisionVariables,
    config: &PlannerConfig,
) {
    apply_fleet_quotas(model, decisions, config);
    apply_exclusivity(model, decisions);
    apply_safety_lockouts(model, fleet, decisions);
}

fn apply_fleet_quotas(
    model: &mut DecisionModel,
    decisions: &DecisionVariables,
    config: &PlannerConfig,
) {
    let quotas = [
        (
            Status::InService,
            "service_fleet",
            Comparison::Equal,
            config.required_service_count,
        ),
        (
            Status::OnStandby,
            "standby_fleet",
            Comparison::AtLeast,
            config.min_standby_count,
        ),
        (
            Status::InMaintenance,
            "maintenance_capacity",
            Comparison::AtMost,
            config.max_maintenance_count,
        ),
        (
            Status::BeingCleaned,
            "cleaning_capacity",
            Comparison::AtMost,
            config.max_cleaning_count,
        ),
    ];
    for (status, name, comparison, bound) in quotas {
        model.add_constraint(
            name,
            LinearExpr::sum(decisions.flags(status)),
            comparison,
            i64::from(bound),
        );
    }
}

fn apply_exclusivity(model: &mut DecisionModel, decisions: &DecisionVariables) {
    for (id, vars) in decisions.iter() {
        model.add_constraint(
            format!("{id}_one_status"),
            LinearExpr::sum(vars.all()),
            Comparison::Equal,
            1,
        );
    }
}

fn apply_safety_lockouts(model: &mut DecisionModel, fleet: &Fleet, decisions: &DecisionVariables) {
    let unsafe_vehicles = decisions
        .matched(fleet)
        .filter(|(vehicle, _)| vehicle.is_unsafe());
    for (vehicle, vars) in unsafe_vehicles {
        let id = vehicle.id();
        model.add_constraint(
            format!("{id}_lockout_service"),
            LinearExpr::sum([vars.in_service]),
            Comparison::Equal,
            0,
        );
        model.add_constraint(
            format!("{id}_lockout_standby"),
            LinearExpr::sum([vars.on_standby]),
            Comparison::Equal,
            0,
        );
    }
}
