//! Fleet state: the per-vehicle attributes that drive constraints and scoring.
//!
//! Every categorical attribute is a closed enum, so each vehicle carries
//! exactly one value per attribute. Risk, urgency and compliance levels are
//! computed upstream and treated as read-only here.
//!
//! # Examples
//! ```
//! use induction_core::{CertificateStatus, JobPriority, Vehicle};
//!
//! let vehicle = Vehicle::builder("TS-01")
//!     .open_job(JobPriority::Critical)
//!     .build();
//! assert!(vehicle.is_unsafe());
//! assert_eq!(vehicle.certificates().telecom, CertificateStatus::Valid);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Days between mandatory deep cleans.
pub const CLEANING_CYCLE_DAYS: u32 = 15;

/// Unique identifier of a fleet unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct VehicleId(String);

impl VehicleId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Error returned when parsing a categorical level from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseLevelError {
    /// Attribute being parsed.
    pub kind: &'static str,
    /// Offending input.
    pub value: String,
}

/// Declares a closed, textual level enum with `as_str`, `Display` and
/// `FromStr`. Parsing ignores ASCII case, spaces, hyphens and underscores.
macro_rules! level_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[cfg_attr(feature = "serde", serde(rename = $text))]
                $variant,
            )+
        }

        impl $name {
            /// Return the level as it appears in fleet datasets.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseLevelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalise(s);
                $(
                    if wanted == normalise($text) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(ParseLevelError {
                    kind: $kind,
                    value: s.to_owned(),
                })
            }
        }
    };
}

fn normalise(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

level_enum! {
    /// Fitness certificate state for one subsystem.
    CertificateStatus, "certificate status" {
        /// Certificate is in force.
        Valid => "Valid",
        /// Certificate is about to lapse but still in force.
        Expiring => "Expiring",
        /// Certificate has lapsed.
        Expired => "Expired",
    }
}

level_enum! {
    /// Priority of an open maintenance job card.
    JobPriority, "job priority" {
        /// Safety-relevant job; the vehicle may not run.
        Critical => "Critical",
        /// Urgent job.
        High => "High",
        /// Routine job.
        Medium => "Medium",
        /// Cosmetic or deferred job.
        Low => "Low",
    }
}

level_enum! {
    /// Deep-clean compliance relative to the cleaning cycle.
    ComplianceStatus, "compliance status" {
        /// Past the cleaning cycle.
        Overdue => "Overdue",
        /// Approaching the end of the cycle.
        DueSoon => "Due Soon",
        /// Within the cycle.
        Compliant => "Compliant",
    }
}

level_enum! {
    /// Graded level shared by mileage urgency and branding SLA risk.
    RiskLevel, "risk level" {
        /// Highest exposure.
        Critical => "Critical",
        /// Elevated exposure.
        High => "High",
        /// Moderate exposure.
        Medium => "Medium",
        /// Negligible exposure.
        Low => "Low",
    }
}

/// Fitness certificates for the three independently certified subsystems.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Certificates {
    /// Rolling-stock certificate.
    pub rolling_stock: CertificateStatus,
    /// Signalling certificate.
    pub signalling: CertificateStatus,
    /// Telecom certificate.
    pub telecom: CertificateStatus,
}

impl Certificates {
    /// All three certificates valid.
    pub const ALL_VALID: Self = Self {
        rolling_stock: CertificateStatus::Valid,
        signalling: CertificateStatus::Valid,
        telecom: CertificateStatus::Valid,
    };

    /// Whether any subsystem certificate has lapsed.
    #[must_use]
    pub fn any_expired(&self) -> bool {
        [self.rolling_stock, self.signalling, self.telecom].contains(&CertificateStatus::Expired)
    }
}

impl Default for Certificates {
    fn default() -> Self {
        Self::ALL_VALID
    }
}

/// Cleaning compliance and the age of the last deep clean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CleaningState {
    /// Compliance status.
    pub compliance: ComplianceStatus,
    /// Days elapsed since the last deep clean.
    pub days_since_last_clean: u32,
}

impl CleaningState {
    /// Days beyond the cleaning cycle, negative when still inside it.
    ///
    /// # Examples
    /// ```
    /// use induction_core::{CleaningState, ComplianceStatus};
    ///
    /// let state = CleaningState {
    ///     compliance: ComplianceStatus::Overdue,
    ///     days_since_last_clean: 20,
    /// };
    /// assert_eq!(state.days_overdue(), 5);
    /// ```
    #[must_use]
    pub fn days_overdue(&self) -> i64 {
        i64::from(self.days_since_last_clean) - i64::from(CLEANING_CYCLE_DAYS)
    }
}

impl Default for CleaningState {
    fn default() -> Self {
        Self {
            compliance: ComplianceStatus::Compliant,
            days_since_last_clean: 0,
        }
    }
}

/// One schedulable fleet unit and the state that drives its assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vehicle {
    id: VehicleId,
    certificates: Certificates,
    highest_open_job: Option<JobPriority>,
    cleaning: CleaningState,
    mileage_urgency: RiskLevel,
    branding_risk: RiskLevel,
    shunting_minutes: u32,
}

impl Vehicle {
    /// Start building a healthy, low-risk vehicle with the given id.
    #[must_use]
    pub fn builder(id: impl Into<String>) -> VehicleBuilder {
        VehicleBuilder::new(id)
    }

    /// Unique identifier.
    #[must_use]
    pub const fn id(&self) -> &VehicleId {
        &self.id
    }

    /// Subsystem certificates.
    #[must_use]
    pub const fn certificates(&self) -> &Certificates {
        &self.certificates
    }

    /// Highest open job priority, `None` when no job is open.
    #[must_use]
    pub const fn highest_open_job(&self) -> Option<JobPriority> {
        self.highest_open_job
    }

    /// Cleaning compliance state.
    #[must_use]
    pub const fn cleaning(&self) -> &CleaningState {
        &self.cleaning
    }

    /// Mileage urgency level.
    #[must_use]
    pub const fn mileage_urgency(&self) -> RiskLevel {
        self.mileage_urgency
    }

    /// Branding SLA penalty risk.
    #[must_use]
    pub const fn branding_risk(&self) -> RiskLevel {
        self.branding_risk
    }

    /// Estimated shunting time for the current stabling position.
    #[must_use]
    pub const fn shunting_minutes(&self) -> u32 {
        self.shunting_minutes
    }

    /// Whether a critical job card is open.
    #[must_use]
    pub fn has_critical_job(&self) -> bool {
        self.highest_open_job == Some(JobPriority::Critical)
    }

    /// Unsafe vehicles may only be sent to maintenance or cleaning.
    #[must_use]
    pub fn is_unsafe(&self) -> bool {
        self.certificates.any_expired() || self.has_critical_job()
    }
}

/// Builder for [`Vehicle`], defaulting to a healthy unit with no exposure.
#[derive(Debug, Clone)]
pub struct VehicleBuilder {
    vehicle: Vehicle,
}

impl VehicleBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            vehicle: Vehicle {
                id: VehicleId::new(id),
                certificates: Certificates::ALL_VALID,
                highest_open_job: None,
                cleaning: CleaningState::default(),
                mileage_urgency: RiskLevel::Low,
                branding_risk: RiskLevel::Low,
                shunting_minutes: 0,
            },
        }
    }

    /// Set all three certificates.
    #[must_use]
    pub fn certificates(mut self, certificates: Certificates) -> Self {
        self.vehicle.certificates = certificates;
        self
    }

    /// Set the highest open job priority.
    #[must_use]
    pub fn open_job(mut self, priority: JobPriority) -> Self {
        self.vehicle.highest_open_job = Some(priority);
        self
    }

    /// Set or clear the highest open job priority.
    #[must_use]
    pub fn highest_open_job(mut self, priority: Option<JobPriority>) -> Self {
        self.vehicle.highest_open_job = priority;
        self
    }

    /// Set cleaning compliance and days since the last clean.
    #[must_use]
    pub fn cleaning(mut self, compliance: ComplianceStatus, days_since_last_clean: u32) -> Self {
        self.vehicle.cleaning = CleaningState {
            compliance,
            days_since_last_clean,
        };
        self
    }

    /// Set mileage urgency.
    #[must_use]
    pub fn mileage_urgency(mut self, level: RiskLevel) -> Self {
        self.vehicle.mileage_urgency = level;
        self
    }

    /// Set branding SLA risk.
    #[must_use]
    pub fn branding_risk(mut self, level: RiskLevel) -> Self {
        self.vehicle.branding_risk = level;
        self
    }

    /// Set the estimated shunting time in minutes.
    #[must_use]
    pub fn shunting_minutes(mut self, minutes: u32) -> Self {
        self.vehicle.shunting_minutes = minutes;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Vehicle {
        self.vehicle
    }
}

/// Errors returned by [`Fleet::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    /// Two records share an identifier.
    #[error("vehicle id '{0}' appears more than once")]
    DuplicateId(VehicleId),
    /// A record has a blank identifier.
    #[error("vehicle at position {position} has an empty id")]
    EmptyId {
        /// Zero-based roster position.
        position: usize,
    },
}

/// Ordered vehicle roster. Roster order defines plan output order.
///
/// # Examples
/// ```
/// use induction_core::{Fleet, FleetError, Vehicle};
///
/// let fleet = Fleet::new(vec![Vehicle::builder("A").build(), Vehicle::builder("B").build()])?;
/// assert_eq!(fleet.len(), 2);
///
/// let duplicate = Fleet::new(vec![Vehicle::builder("A").build(), Vehicle::builder("A").build()]);
/// assert!(matches!(duplicate, Err(FleetError::DuplicateId(_))));
/// # Ok::<(), FleetError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

impl Fleet {
    /// Validate identifiers and construct a roster.
    pub fn new(vehicles: Vec<Vehicle>) -> Result<Self, FleetError> {
        let mut seen = HashSet::with_capacity(vehicles.len());
        for (position, vehicle) in vehicles.iter().enumerate() {
            if vehicle.id.as_str().trim().is_empty() {
                return Err(FleetError::EmptyId { position });
            }
            if !seen.insert(vehicle.id.as_str()) {
                return Err(FleetError::DuplicateId(vehicle.id.clone()));
            }
        }
        Ok(Self { vehicles })
    }

    /// Vehicles in roster order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Iterate over vehicles in roster order.
    pub fn iter(&self) -> std::slice::Iter<'_, Vehicle> {
        self.vehicles.iter()
    }

    /// Number of vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Look up a vehicle by id.
    #[must_use]
    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| &vehicle.id == id)
    }

    /// Number of vehicles barred from service and standby.
    #[must_use]
    pub fn unsafe_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_unsafe()).count()
    }
}

impl<'a> IntoIterator for &'a Fleet {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Fleet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let vehicles = Vec::<Vehicle>::deserialize(deserializer)?;
        Self::new(vehicles).map_err(serde::de::Error::custom)
    }
}
