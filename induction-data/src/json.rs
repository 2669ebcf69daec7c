//! JSON-backed [`FleetSource`].

use camino::{Utf8Path, Utf8PathBuf};
use induction_core::{Fleet, FleetSource, FleetSourceError};
use log::{debug, info};

use crate::fs::{file_is_file, read_to_string};
use crate::record::VehicleRecord;

/// Parse master records from a JSON array.
pub fn parse_records(json: &str) -> Result<Vec<VehicleRecord>, FleetSourceError> {
    serde_json::from_str(json).map_err(|err| FleetSourceError::Malformed {
        reason: format!("master records are not valid JSON: {err}"),
        source: Some(Box::new(err)),
    })
}

/// Translate master records into a validated roster, keeping record order.
pub fn fleet_from_records(records: &[VehicleRecord]) -> Result<Fleet, FleetSourceError> {
    let vehicles = records
        .iter()
        .map(VehicleRecord::to_vehicle)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| FleetSourceError::Malformed {
            reason: err.to_string(),
            source: Some(Box::new(err)),
        })?;
    Ok(Fleet::new(vehicles)?)
}

/// Reads the consolidated master dataset from a JSON file.
///
/// The file holds an array of [`VehicleRecord`] objects. A missing file is
/// reported as [`FleetSourceError::Unavailable`].
///
/// # Examples
/// ```no_run
/// use induction_core::FleetSource;
/// use induction_data::JsonFleetSource;
///
/// let fleet = JsonFleetSource::new("data/master_train_data.json").load_fleet()?;
/// println!("{} vehicles", fleet.len());
/// # Ok::<(), induction_core::FleetSourceError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFleetSource {
    path: Utf8PathBuf,
}

impl JsonFleetSource {
    /// Source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the dataset.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read the raw records without interpreting their levels.
    pub fn read_records(&self) -> Result<Vec<VehicleRecord>, FleetSourceError> {
        let present = file_is_file(&self.path).map_err(|err| FleetSourceError::Unavailable {
            reason: format!("cannot inspect master dataset '{}'", self.path),
            source: Some(Box::new(err)),
        })?;
        if !present {
            return Err(FleetSourceError::unavailable(format!(
                "master dataset '{}' not found; generate and consolidate the fleet data first",
                self.path
            )));
        }
        let contents = read_to_string(&self.path).map_err(|err| FleetSourceError::Unavailable {
            reason: format!("cannot read master dataset '{}'", self.path),
            source: Some(Box::new(err)),
        })?;
        let records = parse_records(&contents)?;
        debug!("read {} master records from {}", records.len(), self.path);
        Ok(records)
    }
}

impl FleetSource for JsonFleetSource {
    fn load_fleet(&self) -> Result<Fleet, FleetSourceError> {
        let records = self.read_records()?;
        let fleet = fleet_from_records(&records)?;
        info!(
            "loaded {} vehicles ({} locked out) from {}",
            fleet.len(),
            fleet.unsafe_count(),
            self.path
        );
        Ok(fleet)
    }
}
