//! Per-vehicle status variables.
//!
//! Each vehicle gets four boolean flags, one per [`Status`]. Exclusivity is
//! not assumed here; the constraint encoder adds it explicitly.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::fleet::{Fleet, Vehicle, VehicleId};
use crate::model::{Assignment, DecisionModel, VarId};

/// Daily operational status of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Status {
    /// Revenue service.
    InService,
    /// Held ready as a reserve.
    OnStandby,
    /// In a maintenance bay.
    InMaintenance,
    /// In a cleaning slot.
    BeingCleaned,
}

impl Status {
    /// Every status, in variable creation order.
    pub const ALL: [Self; 4] = [
        Self::InService,
        Self::OnStandby,
        Self::InMaintenance,
        Self::BeingCleaned,
    ];

    /// Upper-case label used in plans.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InService => "IN_SERVICE",
            Self::OnStandby => "ON_STANDBY",
            Self::InMaintenance => "IN_MAINTENANCE",
            Self::BeingCleaned => "BEING_CLEANED",
        }
    }

    const fn var_suffix(self) -> &'static str {
        match self {
            Self::InService => "service",
            Self::OnStandby => "standby",
            Self::InMaintenance => "maint",
            Self::BeingCleaned => "clean",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four flags belonging to one vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusVars {
    /// `in_service` flag.
    pub in_service: VarId,
    /// `on_standby` flag.
    pub on_standby: VarId,
    /// `in_maintenance` flag.
    pub in_maintenance: VarId,
    /// `being_cleaned` flag.
    pub being_cleaned: VarId,
}

impl StatusVars {
    /// Flag for a status.
    #[must_use]
    pub const fn get(&self, status: Status) -> VarId {
        match status {
            Status::InService => self.in_service,
            Status::OnStandby => self.on_standby,
            Status::InMaintenance => self.in_maintenance,
            Status::BeingCleaned => self.being_cleaned,
        }
    }

    /// All four flags in [`Status::ALL`] order.
    #[must_use]
    pub const fn all(&self) -> [VarId; 4] {
        [
            self.in_service,
            self.on_standby,
            self.in_maintenance,
            self.being_cleaned,
        ]
    }

    /// Statuses whose flag solved true.
    #[must_use]
    pub fn solved_statuses(&self, assignment: &Assignment) -> Vec<Status> {
        Status::ALL
            .into_iter()
            .filter(|status| assignment.value(self.get(*status)).unwrap_or(false))
            .collect()
    }
}

/// Status variables for a whole roster, in roster order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecisionVariables {
    entries: Vec<(VehicleId, StatusVars)>,
}

impl DecisionVariables {
    /// Register four flags per vehicle, named `<id>_service`, `<id>_standby`,
    /// `<id>_maint` and `<id>_clean`.
    ///
    /// # Examples
    /// ```
    /// use induction_core::{DecisionModel, DecisionVariables, Fleet, Vehicle};
    ///
    /// let fleet = Fleet::new(vec![Vehicle::builder("TS-01").build()])?;
    /// let mut model = DecisionModel::new();
    /// let decisions = DecisionVariables::create(&mut model, &fleet);
    /// assert_eq!(model.variables().len(), 4);
    /// assert_eq!(model.variables()[2].name(), "TS-01_maint");
    /// assert_eq!(decisions.len(), 1);
    /// # Ok::<(), induction_core::FleetError>(())
    /// ```
    #[must_use]
    pub fn create(model: &mut DecisionModel, fleet: &Fleet) -> Self {
        let entries = fleet
            .iter()
            .map(|vehicle| {
                let id = vehicle.id();
                let mut flag = |status: Status| {
                    model.new_bool_var(format!("{id}_{}", status.var_suffix()))
                };
                let vars = StatusVars {
                    in_service: flag(Status::InService),
                    on_standby: flag(Status::OnStandby),
                    in_maintenance: flag(Status::InMaintenance),
                    being_cleaned: flag(Status::BeingCleaned),
                };
                (id.clone(), vars)
            })
            .collect();
        Self { entries }
    }

    /// Vehicle ids with their flags, in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (&VehicleId, &StatusVars)> {
        self.entries.iter().map(|(id, vars)| (id, vars))
    }

    /// Walk `fleet` alongside the flags in a single pass.
    ///
    /// Both sides are in roster order. A vehicle whose slot holds another id,
    /// or lies past the last entry, is paired with `None`.
    pub fn pair_with<'a>(
        &'a self,
        fleet: &'a Fleet,
    ) -> impl Iterator<Item = (&'a Vehicle, Option<&'a StatusVars>)> + 'a {
        let mut entries = self.entries.iter();
        fleet.iter().map(move |vehicle| {
            let vars = entries
                .next()
                .and_then(|(id, vars)| (id == vehicle.id()).then_some(vars));
            (vehicle, vars)
        })
    }

    /// Vehicles of `fleet` that have flags, with those flags.
    pub fn matched<'a>(
        &'a self,
        fleet: &'a Fleet,
    ) -> impl Iterator<Item = (&'a Vehicle, &'a StatusVars)> + 'a {
        self.pair_with(fleet)
            .filter_map(|(vehicle, vars)| vars.map(|found| (vehicle, found)))
    }

    /// Flags for a vehicle, by linear search.
    #[must_use]
    pub fn get(&self, id: &VehicleId) -> Option<&StatusVars> {
        self.entries
            .iter()
            .find_map(|(candidate, vars)| (candidate == id).then_some(vars))
    }

    /// Flags for one status across the whole roster.
    pub fn flags(&self, status: Status) -> impl Iterator<Item = VarId> + '_ {
        self.entries.iter().map(move |(_, vars)| vars.get(status))
    }

    /// Number of vehicles covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no vehicle is covered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
