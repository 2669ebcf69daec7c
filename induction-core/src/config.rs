//! Business-rule parameters for one planning run.
//!
//! [`PlannerConfig`] is the immutable snapshot consumed by the model builder.
//! Request-level input arrives as [`PlannerOverrides`], whose optional signed
//! fields are validated into a config before any model is built.

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Service fleet sizes a planning request may ask for.
pub const SERVICE_FLEET_RANGE: RangeInclusive<u32> = 7..=22;

/// Quotas, capacities and objective weights for a solve.
///
/// # Examples
/// ```
/// use induction_core::PlannerConfig;
///
/// let config = PlannerConfig {
///     required_service_count: 10,
///     ..PlannerConfig::default()
/// };
/// assert_eq!(config.min_standby_count, 3);
/// assert_eq!(config.weight_sla, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerConfig {
    /// Exact number of vehicles that must enter service.
    pub required_service_count: u32,
    /// Lower bound on vehicles held on standby.
    pub min_standby_count: u32,
    /// Maintenance bay capacity.
    pub max_maintenance_count: u32,
    /// Cleaning slot capacity.
    pub max_cleaning_count: u32,
    /// Reward per point of branding SLA exposure covered by service.
    pub weight_sla: u32,
    /// Reward for cleaning an overdue vehicle.
    pub weight_cleaning: u32,
    /// Penalty per point of mileage urgency put into service.
    pub weight_mileage: u32,
    /// Penalty per shunting minute incurred by service.
    pub weight_shunting: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            required_service_count: 8,
            min_standby_count: 3,
            max_maintenance_count: 4,
            max_cleaning_count: 7,
            weight_sla: 50,
            weight_cleaning: 20,
            weight_mileage: 10,
            weight_shunting: 5,
        }
    }
}

/// Errors raised while validating request-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerConfigError {
    /// A field was negative.
    #[error("{field} must be a non-negative integer, got {value}")]
    Negative {
        /// Offending field.
        field: &'static str,
        /// Supplied value.
        value: i64,
    },
    /// A field does not fit the supported integer range.
    #[error("{field} value {value} is too large")]
    TooLarge {
        /// Offending field.
        field: &'static str,
        /// Supplied value.
        value: i64,
    },
    /// The requested service fleet is outside [`SERVICE_FLEET_RANGE`].
    #[error("required_service_count must be between {min} and {max}, got {requested}")]
    ServiceCountOutOfRange {
        /// Requested service fleet.
        requested: u32,
        /// Smallest accepted value.
        min: u32,
        /// Largest accepted value.
        max: u32,
    },
}

/// Optional, unvalidated configuration supplied with a planning request.
///
/// Absent fields fall back to [`PlannerConfig::default`].
///
/// # Examples
/// ```
/// use induction_core::{PlannerConfig, PlannerConfigError, PlannerOverrides};
///
/// let overrides = PlannerOverrides {
///     required_service_count: Some(12),
///     ..PlannerOverrides::default()
/// };
/// let config = PlannerConfig::try_from(overrides)?;
/// assert_eq!(config.required_service_count, 12);
///
/// let negative = PlannerOverrides {
///     weight_sla: Some(-1),
///     ..PlannerOverrides::default()
/// };
/// assert!(PlannerConfig::try_from(negative).is_err());
/// # Ok::<(), PlannerConfigError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlannerOverrides {
    /// See [`PlannerConfig::required_service_count`].
    pub required_service_count: Option<i64>,
    /// See [`PlannerConfig::min_standby_count`].
    pub min_standby_count: Option<i64>,
    /// See [`PlannerConfig::max_maintenance_count`].
    pub max_maintenance_count: Option<i64>,
    /// See [`PlannerConfig::max_cleaning_count`].
    pub max_cleaning_count: Option<i64>,
    /// See [`PlannerConfig::weight_sla`].
    pub weight_sla: Option<i64>,
    /// See [`PlannerConfig::weight_cleaning`].
    pub weight_cleaning: Option<i64>,
    /// See [`PlannerConfig::weight_mileage`].
    pub weight_mileage: Option<i64>,
    /// See [`PlannerConfig::weight_shunting`].
    pub weight_shunting: Option<i64>,
}

fn resolve(
    field: &'static str,
    value: Option<i64>,
    fallback: u32,
) -> Result<u32, PlannerConfigError> {
    let Some(raw) = value else {
        return Ok(fallback);
    };
    if raw < 0 {
        return Err(PlannerConfigError::Negative { field, value: raw });
    }
    u32::try_from(raw).map_err(|_| PlannerConfigError::TooLarge { field, value: raw })
}

impl TryFrom<PlannerOverrides> for PlannerConfig {
    type Error = PlannerConfigError;

    fn try_from(overrides: PlannerOverrides) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        let config = Self {
            required_service_count: resolve(
                "required_service_count",
                overrides.required_service_count,
                defaults.required_service_count,
            )?,
            min_standby_count: resolve(
                "min_standby_count",
                overrides.min_standby_count,
                defaults.min_standby_count,
            )?,
            max_maintenance_count: resolve(
                "max_maintenance_count",
                overrides.max_maintenance_count,
                defaults.max_maintenance_count,
            )?,
            max_cleaning_count: resolve(
                "max_cleaning_count",
                overrides.max_cleaning_count,
                defaults.max_cleaning_count,
            )?,
            weight_sla: resolve("weight_sla", overrides.weight_sla, defaults.weight_sla)?,
            weight_cleaning: resolve(
                "weight_cleaning",
                overrides.weight_cleaning,
                defaults.weight_cleaning,
            )?,
            weight_mileage: resolve(
                "weight_mileage",
                overrides.weight_mileage,
                defaults.weight_mileage,
            )?,
            weight_shunting: resolve(
                "weight_shunting",
                overrides.weight_shunting,
                defaults.weight_shunting,
            )?,
        };
        if !SERVICE_FLEET_RANGE.contains(&config.required_service_count) {
            return Err(PlannerConfigError::ServiceCountOutOfRange {
                requested: config.required_service_count,
                min: *SERVICE_FLEET_RANGE.start(),
                max: *SERVICE_FLEET_RANGE.end(),
            });
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_overrides_yield_defaults() {
        let config = PlannerConfig::try_from(PlannerOverrides::default()).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[rstest]
    #[case(7)]
    #[case(22)]
    fn accepts_service_fleet_bounds(#[case] requested: i64) {
        let overrides = PlannerOverrides {
            required_service_count: Some(requested),
            ..PlannerOverrides::default()
        };
        assert!(PlannerConfig::try_from(overrides).is_ok());
    }

    #[rstest]
    #[case(6)]
    #[case(23)]
    #[case(0)]
    fn rejects_service_fleet_outside_range(#[case] requested: i64) {
        let overrides = PlannerOverrides {
            required_service_count: Some(requested),
            ..PlannerOverrides::default()
        };
        let err = PlannerConfig::try_from(overrides).unwrap_err();
        assert!(matches!(err, PlannerConfigError::ServiceCountOutOfRange { min: 7, max: 22, .. }));
    }

    #[rstest]
    fn negative_fields_name_the_field() {
        let overrides = PlannerOverrides {
            max_cleaning_count: Some(-2),
            ..PlannerOverrides::default()
        };
        let err = PlannerConfig::try_from(overrides).unwrap_err();
        assert_eq!(
            err,
            PlannerConfigError::Negative {
                field: "max_cleaning_count",
                value: -2
            }
        );
    }

    #[rstest]
    fn oversized_fields_are_rejected() {
        let overrides = PlannerOverrides {
            weight_shunting: Some(i64::from(u32::MAX) + 1),
            ..PlannerOverrides::default()
        };
        let err = PlannerConfig::try_from(overrides).unwrap_err();
        assert!(matches!(err, PlannerConfigError::TooLarge { field: "weight_shunting", .. }));
    }
}
