//! Property-based tests for plans produced by `LpSolver`.
//!
//! Invariants tested over random fleets and quotas:
//!
//! - **Exclusivity:** every vehicle appears exactly once with one status.
//! - **Quotas:** service count is exact, standby meets its floor, maintenance
//!   and cleaning stay within capacity.
//! - **Lockout:** unsafe vehicles are never in service or on standby.
//! - **Feasibility:** a plan exists exactly when enough safe vehicles cover
//!   service plus standby and the bays absorb every unsafe vehicle.
//! - **Stability:** solving twice yields the same objective value.

use std::collections::HashSet;

use induction_core::{
    CertificateStatus, Certificates, ComplianceStatus, Fleet, InductionPlanner, JobPriority,
    PlanError, PlannerConfig, RiskLevel, Status, Vehicle,
};
use induction_solver_lp::LpSolver;
use proptest::prelude::*;

const LEVELS: [RiskLevel; 4] = [
    RiskLevel::Critical,
    RiskLevel::High,
    RiskLevel::Medium,
    RiskLevel::Low,
];

fn vehicle_strategy() -> impl Strategy<Value = (bool, bool, usize, usize, bool, u32, u32)> {
    (
        prop::bool::weighted(0.15),
        prop::bool::weighted(0.1),
        0..LEVELS.len(),
        0..LEVELS.len(),
        any::<bool>(),
        0_u32..40,
        0_u32..30,
    )
}

fn build_vehicle(
    position: usize,
    (expired, critical_job, branding, mileage, overdue, days, shunting): (
        bool,
        bool,
        usize,
        usize,
        bool,
        u32,
        u32,
    ),
) -> Vehicle {
    let mut builder = Vehicle::builder(format!("TS-{position:02}"))
        .branding_risk(LEVELS.get(branding).copied().unwrap_or(RiskLevel::Low))
        .mileage_urgency(LEVELS.get(mileage).copied().unwrap_or(RiskLevel::Low))
        .cleaning(
            if overdue {
                ComplianceStatus::Overdue
            } else {
                ComplianceStatus::Compliant
            },
            days,
        )
        .shunting_minutes(shunting);
    if expired {
        builder = builder.certificates(Certificates {
            signalling: CertificateStatus::Expired,
            ..Certificates::ALL_VALID
        });
    }
    if critical_job {
        builder = builder.open_job(JobPriority::Critical);
    }
    builder.build()
}

fn fleet_strategy() -> impl Strategy<Value = Fleet> {
    prop::collection::vec(vehicle_strategy(), 8..30).prop_map(|traits| {
        let vehicles = traits
            .into_iter()
            .enumerate()
            .map(|(index, sampled)| build_vehicle(index + 1, sampled))
            .collect();
        Fleet::new(vehicles).unwrap_or_default()
    })
}

fn config_strategy() -> impl Strategy<Value = PlannerConfig> {
    (7_u32..=12, 0_u32..5, 0_u32..6, 0_u32..8).prop_map(
        |(service, standby, maintenance, cleaning)| PlannerConfig {
            required_service_count: service,
            min_standby_count: standby,
            max_maintenance_count: maintenance,
            max_cleaning_count: cleaning,
            ..PlannerConfig::default()
        },
    )
}

fn is_satisfiable(fleet: &Fleet, config: &PlannerConfig) -> bool {
    let unsafe_count = fleet.unsafe_count();
    let safe_count = fleet.len() - unsafe_count;
    let needed = usize::try_from(config.required_service_count + config.min_standby_count)
        .unwrap_or(usize::MAX);
    let bays = usize::try_from(config.max_maintenance_count + config.max_cleaning_count)
        .unwrap_or(usize::MAX);
    safe_count >= needed && unsafe_count <= bays
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: a plan exists exactly when the quotas can be met.
    #[test]
    fn plans_exist_exactly_when_quotas_fit(
        fleet in fleet_strategy(),
        config in config_strategy(),
    ) {
        let result = InductionPlanner::new(LpSolver::new()).plan(&fleet, &config);
        if is_satisfiable(&fleet, &config) {
            prop_assert!(result.is_ok(), "expected a plan, got {result:?}");
        } else {
            prop_assert_eq!(result, Err(PlanError::Infeasible));
        }
    }

    /// Property: successful plans honour every hard constraint.
    #[test]
    fn plans_respect_hard_constraints(
        fleet in fleet_strategy(),
        config in config_strategy(),
    ) {
        let Ok(plan) = InductionPlanner::new(LpSolver::new()).plan(&fleet, &config) else {
            return Ok(());
        };

        let ids: HashSet<_> = plan.entries().iter().map(|entry| entry.vehicle_id.clone()).collect();
        prop_assert_eq!(ids.len(), fleet.len());
        prop_assert_eq!(plan.entries().len(), fleet.len());

        let counts = plan.status_counts();
        let as_count = |value: u32| usize::try_from(value).unwrap_or(usize::MAX);
        prop_assert_eq!(counts.in_service, as_count(config.required_service_count));
        prop_assert!(counts.on_standby >= as_count(config.min_standby_count));
        prop_assert!(counts.in_maintenance <= as_count(config.max_maintenance_count));
        prop_assert!(counts.being_cleaned <= as_count(config.max_cleaning_count));

        for (entry, vehicle) in plan.entries().iter().zip(fleet.iter()) {
            prop_assert_eq!(&entry.vehicle_id, vehicle.id());
            if vehicle.is_unsafe() {
                prop_assert!(
                    !matches!(entry.assigned_status, Status::InService | Status::OnStandby),
                    "unsafe vehicle {} assigned {}",
                    vehicle.id(),
                    entry.assigned_status
                );
            }
        }
    }

    /// Property: re-solving the same input yields the same objective value.
    #[test]
    fn resolving_is_stable(
        fleet in fleet_strategy(),
        config in config_strategy(),
    ) {
        let planner = InductionPlanner::new(LpSolver::new());
        let first = planner.plan(&fleet, &config).map(|plan| plan.objective_value());
        let second = planner.plan(&fleet, &config).map(|plan| plan.objective_value());
        prop_assert_eq!(first, second);
    }
}
