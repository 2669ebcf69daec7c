//! Test helpers for writing master datasets and scripted solver builders.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use induction_core::test_support::{ScriptedSolver, vehicle_id};
use induction_core::{Assignment, Solver, SolverOutcome};
use induction_data::VehicleRecord;
use tempfile::TempDir;

use crate::CliError;
use crate::plan::{PlanConfig, PlanSolverBuilder};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

pub(super) fn utf8_tempdir() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

pub(super) fn record(position: usize, rolling_stock: &str) -> VehicleRecord {
    VehicleRecord {
        trainset_id: vehicle_id(position),
        rolling_stock_status: rolling_stock.to_owned(),
        signalling_status: "Valid".to_owned(),
        telecom_status: "Valid".to_owned(),
        highest_open_job_priority: None,
        compliance_status: "Compliant".to_owned(),
        days_since_last_clean: 3,
        urgency_level: "Low".to_owned(),
        penalty_risk_level: None,
        estimated_shunting_time_minutes: 10,
        extra: serde_json::Map::new(),
    }
}

/// Master dataset of `size` valid vehicles, `TS-01..`.
pub(super) fn write_healthy_dataset(path: &Utf8Path, size: usize) {
    let records: Vec<VehicleRecord> = (1..=size).map(|pos| record(pos, "Valid")).collect();
    let payload = serde_json::to_string_pretty(&records).expect("serialise records");
    write_utf8(path, payload.as_bytes());
}

/// Flags for `service` vehicles in service and the rest on standby.
pub(super) fn service_then_standby(size: usize, service: usize) -> Assignment {
    let values = (0..size)
        .flat_map(|pos| {
            let in_service = pos < service;
            [in_service, !in_service, false, false]
        })
        .collect();
    Assignment::from_values(values)
}

/// Hands out a clone of a scripted outcome for every plan invocation.
pub(super) struct ScriptedBuilder {
    pub(super) outcome: SolverOutcome,
}

impl PlanSolverBuilder for ScriptedBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
        Ok(Box::new(ScriptedSolver::new(self.outcome.clone())))
    }
}
