//! Command-line interface for the fleet induction planner.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};

mod error;
mod fleet;
mod plan;

pub use error::CliError;

use fleet::{FleetArgs, run_fleet};
use plan::{PlanArgs, run_plan};

pub(crate) const ARG_FLEET_PATH: &str = "fleet-path";
pub(crate) const ARG_SERVICE_FLEET: &str = "service-fleet";
pub(crate) const ARG_MIN_STANDBY: &str = "min-standby";
pub(crate) const ARG_MAX_MAINTENANCE: &str = "max-maintenance";
pub(crate) const ARG_MAX_CLEANING: &str = "max-cleaning";
pub(crate) const ARG_WEIGHT_SLA: &str = "weight-sla";
pub(crate) const ARG_WEIGHT_CLEANING: &str = "weight-cleaning";
pub(crate) const ARG_WEIGHT_MILEAGE: &str = "weight-mileage";
pub(crate) const ARG_WEIGHT_SHUNTING: &str = "weight-shunting";
pub(crate) const ARG_TIME_LIMIT: &str = "time-limit-secs";
pub(crate) const ENV_PLAN_FLEET_PATH: &str = "INDUCTION_CMDS_PLAN_FLEET_PATH";
pub(crate) const ENV_FLEET_FLEET_PATH: &str = "INDUCTION_CMDS_FLEET_FLEET_PATH";

/// Run the induction CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments, configuration, the dataset or the
/// solve fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Fleet(args) => run_fleet(args),
    }
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match induction_data::fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Pretty-print `value` as JSON followed by a newline.
pub(crate) fn write_json<T: serde::Serialize>(
    writer: &mut dyn std::io::Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "induction",
    about = "Nightly induction planning for a rolling-stock fleet",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assign every vehicle a status for the next operating day.
    Plan(PlanArgs),
    /// Print the master dataset records as JSON.
    Fleet(FleetArgs),
}

#[cfg(test)]
mod tests;
