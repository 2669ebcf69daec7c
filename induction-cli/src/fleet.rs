//! Fleet command: print the raw master records the planner would read.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use induction_data::JsonFleetSource;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{ARG_FLEET_PATH, CliError, ENV_FLEET_FLEET_PATH, require_existing, write_json};

/// CLI arguments for the `fleet` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Show the master dataset")]
#[ortho_config(prefix = "INDUCTION")]
pub(crate) struct FleetArgs {
    /// Path to the master dataset (JSON records).
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) fleet_path: Option<Utf8PathBuf>,
}

pub(crate) fn run_fleet(args: FleetArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_fleet_with(args, &mut stdout)
}

pub(crate) fn run_fleet_with(args: FleetArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let path = merged.fleet_path.ok_or(CliError::MissingArgument {
        field: ARG_FLEET_PATH,
        env: ENV_FLEET_FLEET_PATH,
    })?;
    require_existing(&path, ARG_FLEET_PATH)?;
    let records = JsonFleetSource::new(path.clone())
        .read_records()
        .map_err(|source| CliError::LoadFleet { path, source })?;
    write_json(writer, &records)
}
