//! Fleet data access for the induction planner.
//!
//! Responsibilities:
//! - Read the consolidated master dataset exported as JSON records.
//! - Translate master columns into core [`Vehicle`](induction_core::Vehicle)
//!   values.
//! - Report a missing dataset distinctly from malformed content.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `induction-core`).
//! - Never write to the dataset.

#![forbid(unsafe_code)]

pub mod fs;
mod json;
mod record;

pub use json::{JsonFleetSource, fleet_from_records, parse_records};
pub use record::{RecordError, VehicleRecord};
