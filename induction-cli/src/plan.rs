//! Plan command implementation for the induction CLI.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use induction_core::{
    FleetSource, InductionPlan, InductionPlanner, PlanEntry, PlannerConfig, PlannerOverrides,
    SolveStatus, Solver, StatusCounts,
};
use induction_data::JsonFleetSource;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_FLEET_PATH, ARG_MAX_CLEANING, ARG_MAX_MAINTENANCE, ARG_MIN_STANDBY, ARG_SERVICE_FLEET,
    ARG_TIME_LIMIT, ARG_WEIGHT_CLEANING, ARG_WEIGHT_MILEAGE, ARG_WEIGHT_SHUNTING, ARG_WEIGHT_SLA,
    CliError, ENV_PLAN_FLEET_PATH, require_existing, write_json,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the consolidated master dataset, solve the induction \
                 model and print one justified status per vehicle as JSON. \
                 Quotas and weights can come from CLI flags, configuration \
                 files, or environment variables; absent values use the \
                 planner defaults.",
    about = "Plan tomorrow's induction"
)]
#[ortho_config(prefix = "INDUCTION")]
pub(crate) struct PlanArgs {
    /// Path to the master dataset (JSON records).
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) fleet_path: Option<Utf8PathBuf>,
    /// Exact number of vehicles to put into service (7 to 22).
    #[arg(long = ARG_SERVICE_FLEET, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) service_fleet: Option<i64>,
    /// Minimum number of vehicles held on standby.
    #[arg(long = ARG_MIN_STANDBY, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) min_standby: Option<i64>,
    /// Maintenance bay capacity.
    #[arg(long = ARG_MAX_MAINTENANCE, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_maintenance: Option<i64>,
    /// Cleaning slot capacity.
    #[arg(long = ARG_MAX_CLEANING, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_cleaning: Option<i64>,
    /// Reward per point of branding SLA exposure covered by service.
    #[arg(long = ARG_WEIGHT_SLA, value_name = "weight", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) weight_sla: Option<i64>,
    /// Reward for cleaning an overdue vehicle.
    #[arg(long = ARG_WEIGHT_CLEANING, value_name = "weight", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) weight_cleaning: Option<i64>,
    /// Penalty per point of mileage urgency put into service.
    #[arg(long = ARG_WEIGHT_MILEAGE, value_name = "weight", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) weight_mileage: Option<i64>,
    /// Penalty per shunting minute incurred by service.
    #[arg(long = ARG_WEIGHT_SHUNTING, value_name = "weight", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) weight_shunting: Option<i64>,
    /// Wall-clock limit for the solver, in seconds.
    #[arg(long = ARG_TIME_LIMIT, value_name = "seconds")]
    #[serde(default)]
    pub(crate) time_limit_secs: Option<u64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }

    const fn overrides(&self) -> PlannerOverrides {
        PlannerOverrides {
            required_service_count: self.service_fleet,
            min_standby_count: self.min_standby,
            max_maintenance_count: self.max_maintenance,
            max_cleaning_count: self.max_cleaning,
            weight_sla: self.weight_sla,
            weight_cleaning: self.weight_cleaning,
            weight_mileage: self.weight_mileage,
            weight_shunting: self.weight_shunting,
        }
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the master dataset.
    pub(crate) fleet_path: Utf8PathBuf,
    /// Validated quotas and weights.
    pub(crate) planner: PlannerConfig,
    /// Solver wall-clock limit.
    pub(crate) time_limit: Option<Duration>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.fleet_path, ARG_FLEET_PATH)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let planner = PlannerConfig::try_from(args.overrides())?;
        let fleet_path = args.fleet_path.ok_or(CliError::MissingArgument {
            field: ARG_FLEET_PATH,
            env: ENV_PLAN_FLEET_PATH,
        })?;
        Ok(Self {
            fleet_path,
            planner,
            time_limit: args.time_limit_secs.map(Duration::from_secs),
        })
    }
}

/// JSON document printed by the `plan` command.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PlanResponse {
    status: SolveStatus,
    objective_value: i64,
    summary: StatusCounts,
    alerts: Vec<String>,
    plan: Vec<PlanEntry>,
}

impl From<InductionPlan> for PlanResponse {
    fn from(plan: InductionPlan) -> Self {
        let summary = plan.status_counts();
        let status = plan.status();
        let objective_value = plan.objective_value();
        let alerts = plan.alerts().to_vec();
        Self {
            status,
            objective_value,
            summary,
            alerts,
            plan: plan.into_entries(),
        }
    }
}

/// Builds a solver instance for the current plan invocation.
pub(crate) trait PlanSolverBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Solver>, CliError>;
}

pub(crate) struct DefaultPlanSolverBuilder;

impl PlanSolverBuilder for DefaultPlanSolverBuilder {
    #[cfg(feature = "solver-lp")]
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
        use induction_solver_lp::{LpSolver, LpSolverConfig};

        Ok(Box::new(LpSolver::with_config(LpSolverConfig {
            time_limit: config.time_limit,
        })))
    }

    #[cfg(not(feature = "solver-lp"))]
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
        Err(CliError::MissingFeature {
            feature: "solver-lp",
            action: "planning",
        })
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlanSolverBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let response = execute_plan(args, builder)?;
    write_json(writer, &response)
}

fn execute_plan(args: PlanArgs, builder: &dyn PlanSolverBuilder) -> Result<PlanResponse, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let fleet = JsonFleetSource::new(config.fleet_path.clone())
        .load_fleet()
        .map_err(|source| CliError::LoadFleet {
            path: config.fleet_path.clone(),
            source,
        })?;
    let solver = builder.build(&config)?;
    let plan = InductionPlanner::new(solver).plan(&fleet, &config.planner)?;
    let counts = plan.status_counts();
    info!(
        "plan {}: {} in service, {} standby, {} maintenance, {} cleaning",
        plan.status(),
        counts.in_service,
        counts.on_standby,
        counts.in_maintenance,
        counts.being_cleaned
    );
    Ok(PlanResponse::from(plan))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
