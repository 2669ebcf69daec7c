//! Integration tests for model construction over small fleets.

#![expect(clippy::expect_used, reason = "tests fail fast on setup errors")]

use induction_core::{
    Assignment, CertificateStatus, Certificates, Comparison, ComplianceStatus, Fleet,
    InductionModel, PlannerConfig, RiskLevel, Status, Vehicle,
};
use rstest::{fixture, rstest};

#[fixture]
fn fleet() -> Fleet {
    Fleet::new(vec![
        Vehicle::builder("TS-01")
            .branding_risk(RiskLevel::Critical)
            .mileage_urgency(RiskLevel::High)
            .shunting_minutes(4)
            .build(),
        Vehicle::builder("TS-02")
            .certificates(Certificates {
                rolling_stock: CertificateStatus::Expired,
                ..Certificates::ALL_VALID
            })
            .build(),
        Vehicle::builder("TS-03")
            .cleaning(ComplianceStatus::Overdue, 18)
            .build(),
    ])
    .expect("unique ids")
}

fn constraint_names(built: &InductionModel) -> Vec<&str> {
    built
        .model()
        .constraints()
        .iter()
        .map(|constraint| constraint.name())
        .collect()
}

#[rstest]
fn variables_follow_roster_order(fleet: Fleet) {
    let built = InductionModel::build(&fleet, &PlannerConfig::default());
    let names: Vec<_> = built
        .model()
        .variables()
        .iter()
        .take(4)
        .map(|var| var.name().to_owned())
        .collect();
    assert_eq!(
        names,
        ["TS-01_service", "TS-01_standby", "TS-01_maint", "TS-01_clean"]
    );
    assert_eq!(built.model().variables().len(), 12);
    assert_eq!(built.decisions().len(), 3);
}

#[rstest]
fn quotas_exclusivity_and_lockouts_are_encoded(fleet: Fleet) {
    let built = InductionModel::build(&fleet, &PlannerConfig::default());
    assert_eq!(
        constraint_names(&built),
        [
            "service_fleet",
            "standby_fleet",
            "maintenance_capacity",
            "cleaning_capacity",
            "TS-01_one_status",
            "TS-02_one_status",
            "TS-03_one_status",
            "TS-02_lockout_service",
            "TS-02_lockout_standby",
        ]
    );
    let service = built
        .model()
        .constraints()
        .first()
        .expect("service quota");
    assert_eq!(service.comparison(), Comparison::Equal);
    assert_eq!(service.rhs(), 8);
}

#[rstest]
fn unreachable_quota_is_encoded_unchanged(fleet: Fleet) {
    let config = PlannerConfig {
        required_service_count: 22,
        ..PlannerConfig::default()
    };
    let built = InductionModel::build(&fleet, &config);
    let service = built
        .model()
        .constraints()
        .iter()
        .find(|constraint| constraint.name() == "service_fleet")
        .expect("service quota");
    assert_eq!(service.rhs(), 22);
}

#[rstest]
#[case(Status::InService, 150 - 10 - 20)]
#[case(Status::OnStandby, 0)]
#[case(Status::InMaintenance, 0)]
#[case(Status::BeingCleaned, 0)]
fn objective_rewards_only_active_flags(
    fleet: Fleet,
    #[case] first_status: Status,
    #[case] expected: i64,
) {
    let built = InductionModel::build(&fleet, &PlannerConfig::default());
    let mut values = vec![false; built.model().variables().len()];
    let flag = built
        .decisions()
        .iter()
        .next()
        .map(|(_, vars)| vars.get(first_status))
        .expect("first vehicle");
    if let Some(slot) = values.get_mut(flag.index()) {
        *slot = true;
    }
    let assignment = Assignment::from_values(values);
    assert_eq!(built.model().objective().evaluate(&assignment), expected);
}

#[rstest]
fn overdue_cleaning_earns_cleaning_weight(fleet: Fleet) {
    let built = InductionModel::build(&fleet, &PlannerConfig::default());
    let (_, vars) = built.decisions().iter().nth(2).expect("third vehicle");
    let mut values = vec![false; built.model().variables().len()];
    if let Some(slot) = values.get_mut(vars.being_cleaned.index()) {
        *slot = true;
    }
    let assignment = Assignment::from_values(values);
    assert_eq!(built.model().objective().evaluate(&assignment), 20);
}

#[rstest]
fn rebuilding_yields_an_identical_model(fleet: Fleet) {
    let config = PlannerConfig::default();
    assert_eq!(
        InductionModel::build(&fleet, &config),
        InductionModel::build(&fleet, &config)
    );
}

#[rstest]
fn empty_fleet_keeps_quota_constraints() {
    let fleet = Fleet::new(Vec::new()).expect("empty fleet");
    let built = InductionModel::build(&fleet, &PlannerConfig::default());
    assert!(built.model().variables().is_empty());
    assert_eq!(built.model().constraints().len(), 4);
}
